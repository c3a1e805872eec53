use crate::app::{Result, SitegrabError};

/// Scheme applied to inputs that arrive without one.
pub const DEFAULT_SCHEME: &str = "https://";

/// A single user-initiated scan target.
///
/// The target always carries an explicit scheme once constructed. Inputs that
/// already name a scheme are kept exactly as given (after trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalRequest {
    input: String,
    target: String,
}

impl RetrievalRequest {
    pub fn new(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SitegrabError::EmptyUrl);
        }

        let target = if has_scheme(input) {
            input.to_string()
        } else {
            format!("{}{}", DEFAULT_SCHEME, input)
        };

        Ok(Self {
            input: input.to_string(),
            target,
        })
    }

    /// The trimmed text the user entered.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The absolute URL handed to every relay strategy.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// True when `input` starts with `scheme://`, where the scheme follows the
/// usual `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` shape.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_https() {
        let req = RetrievalRequest::new("example.com").unwrap();
        assert_eq!(req.target(), "https://example.com");
        assert_eq!(req.input(), "example.com");
    }

    #[test]
    fn test_existing_scheme_untouched() {
        for url in [
            "http://example.com/page?q=1",
            "https://example.com",
            "HTTPS://Example.com/",
            "ftp://files.example.com/index.html",
        ] {
            let req = RetrievalRequest::new(url).unwrap();
            assert_eq!(req.target(), url);
        }
    }

    #[test]
    fn test_host_with_port_is_not_a_scheme() {
        let req = RetrievalRequest::new("localhost:8080/index.html").unwrap();
        assert_eq!(req.target(), "https://localhost:8080/index.html");
    }

    #[test]
    fn test_http_prefixed_host_gets_scheme() {
        // A host that merely starts with "http" is still scheme-less
        let req = RetrievalRequest::new("httpbin.org/html").unwrap();
        assert_eq!(req.target(), "https://httpbin.org/html");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let req = RetrievalRequest::new("  example.com/a \n").unwrap();
        assert_eq!(req.target(), "https://example.com/a");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            RetrievalRequest::new(""),
            Err(SitegrabError::EmptyUrl)
        ));
        assert!(matches!(
            RetrievalRequest::new("   "),
            Err(SitegrabError::EmptyUrl)
        ));
    }

    #[test]
    fn test_malformed_scheme_gets_prefixed() {
        let req = RetrievalRequest::new("1abc://weird").unwrap();
        assert_eq!(req.target(), "https://1abc://weird");
    }
}
