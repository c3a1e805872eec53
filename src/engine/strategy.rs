use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::app::{Result, SitegrabError};
use crate::config::ConfigError;

/// Placeholder in a relay template that receives the encoded target URL
pub const URL_PLACEHOLDER: &str = "{url}";

/// Characters left alone when a target is embedded as a query component:
/// alphanumerics plus `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How a relay wraps the page it fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResponseDecoding {
    /// JSON object with the markup under `field`
    JsonEnvelope { field: String },
    /// The response body is the markup
    Passthrough,
}

/// A relay endpoint plus the rule for decoding its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayStrategy {
    /// Short identifier, e.g. `allorigins`
    pub name: String,
    /// Human-readable name used in progress messages
    pub label: String,
    /// Request URL with a `{url}` placeholder
    pub template: String,
    pub decoding: ResponseDecoding,
}

impl RelayStrategy {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        template: impl Into<String>,
        decoding: ResponseDecoding,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            template: template.into(),
            decoding,
        }
    }

    /// The built-in chain, in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "allorigins",
                "Primary Proxy (JSON)",
                "https://api.allorigins.win/get?url={url}",
                ResponseDecoding::JsonEnvelope {
                    field: "contents".to_string(),
                },
            ),
            Self::new(
                "codetabs",
                "Secondary Proxy",
                "https://api.codetabs.com/v1/proxy?quest={url}",
                ResponseDecoding::Passthrough,
            ),
            Self::new(
                "corsproxy",
                "Tertiary Proxy",
                "https://corsproxy.io/?{url}",
                ResponseDecoding::Passthrough,
            ),
        ]
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Relay("relay name must not be empty".into()));
        }
        if !self.template.contains(URL_PLACEHOLDER) {
            return Err(ConfigError::Relay(format!(
                "relay '{}' template has no {} placeholder",
                self.name, URL_PLACEHOLDER
            )));
        }
        if let ResponseDecoding::JsonEnvelope { field } = &self.decoding {
            if field.is_empty() {
                return Err(ConfigError::Relay(format!(
                    "relay '{}' has an empty envelope field",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Substitute the query-encoded target into the template.
    pub fn relay_url(&self, target: &str) -> String {
        let encoded = utf8_percent_encode(target, COMPONENT).to_string();
        self.template.replace(URL_PLACEHOLDER, &encoded)
    }

    /// Extract the markup from a successful relay response.
    pub fn decode(&self, body: String) -> Result<String> {
        match &self.decoding {
            ResponseDecoding::Passthrough => Ok(body),
            ResponseDecoding::JsonEnvelope { field } => {
                let value: serde_json::Value = serde_json::from_str(&body)?;
                match value.get(field) {
                    Some(serde_json::Value::String(contents)) if !contents.is_empty() => {
                        Ok(contents.clone())
                    }
                    Some(serde_json::Value::String(_)) => Err(SitegrabError::Envelope(format!(
                        "field '{}' is empty",
                        field
                    ))),
                    Some(_) => Err(SitegrabError::Envelope(format!(
                        "field '{}' is not a string",
                        field
                    ))),
                    None => Err(SitegrabError::Envelope(format!("missing field '{}'", field))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> RelayStrategy {
        RelayStrategy::defaults().remove(0)
    }

    fn passthrough() -> RelayStrategy {
        RelayStrategy::defaults().remove(1)
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<_> = RelayStrategy::defaults()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["allorigins", "codetabs", "corsproxy"]);
    }

    #[test]
    fn test_defaults_are_valid() {
        for strategy in RelayStrategy::defaults() {
            strategy.validate().unwrap();
        }
    }

    #[test]
    fn test_relay_url_encodes_target() {
        assert_eq!(
            envelope().relay_url("https://example.com/a?b=c&d=e"),
            "https://api.allorigins.win/get?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc%26d%3De"
        );
        assert_eq!(
            RelayStrategy::defaults()[2].relay_url("https://example.com"),
            "https://corsproxy.io/?https%3A%2F%2Fexample.com"
        );
    }

    #[test]
    fn test_relay_url_encodes_space_as_percent_20() {
        assert_eq!(
            RelayStrategy::defaults()[2].relay_url("https://example.com/a b?q=x y"),
            "https://corsproxy.io/?https%3A%2F%2Fexample.com%2Fa%20b%3Fq%3Dx%20y"
        );
    }

    #[test]
    fn test_relay_url_keeps_component_safe_marks() {
        assert_eq!(
            passthrough().relay_url("https://e.com/~u/(a)*b!-_.'"),
            "https://api.codetabs.com/v1/proxy?quest=https%3A%2F%2Fe.com%2F~u%2F(a)*b!-_.'"
        );
        assert_eq!(
            passthrough().relay_url("https://e.com/é"),
            "https://api.codetabs.com/v1/proxy?quest=https%3A%2F%2Fe.com%2F%C3%A9"
        );
    }

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"contents":"<html><body>hi</body></html>","status":{"http_code":200}}"#;
        assert_eq!(
            envelope().decode(body.to_string()).unwrap(),
            "<html><body>hi</body></html>"
        );
    }

    #[test]
    fn test_decode_envelope_missing_field() {
        let err = envelope()
            .decode(r#"{"status":{"http_code":404}}"#.to_string())
            .unwrap_err();
        assert!(matches!(err, SitegrabError::Envelope(_)));
    }

    #[test]
    fn test_decode_envelope_null_or_empty_field() {
        assert!(matches!(
            envelope().decode(r#"{"contents":null}"#.to_string()),
            Err(SitegrabError::Envelope(_))
        ));
        assert!(matches!(
            envelope().decode(r#"{"contents":""}"#.to_string()),
            Err(SitegrabError::Envelope(_))
        ));
    }

    #[test]
    fn test_decode_envelope_not_json() {
        assert!(matches!(
            envelope().decode("<html></html>".to_string()),
            Err(SitegrabError::Json(_))
        ));
    }

    #[test]
    fn test_decode_passthrough_is_verbatim() {
        let body = r#"{"contents":"not unwrapped"}"#;
        assert_eq!(passthrough().decode(body.to_string()).unwrap(), body);
        assert_eq!(passthrough().decode(String::new()).unwrap(), "");
    }

    #[test]
    fn test_validate_rejects_template_without_placeholder() {
        let strategy = RelayStrategy::new(
            "broken",
            "Broken",
            "https://relay.example/?target=",
            ResponseDecoding::Passthrough,
        );
        assert!(matches!(strategy.validate(), Err(ConfigError::Relay(_))));
    }

    #[test]
    fn test_decoding_from_toml() {
        let strategy: RelayStrategy = toml::from_str(
            r#"
name = "mine"
label = "My Relay"
template = "https://relay.example/raw?u={url}"
decoding = { kind = "json-envelope", field = "html" }
"#,
        )
        .unwrap();
        assert_eq!(
            strategy.decoding,
            ResponseDecoding::JsonEnvelope {
                field: "html".into()
            }
        );
    }
}
