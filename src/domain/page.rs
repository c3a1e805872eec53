use chrono::{DateTime, Utc};

/// A retrieved document after base-reference injection, ready for editing.
#[derive(Debug, Clone)]
pub struct ScannedPage {
    pub source_url: String,
    pub strategy: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

impl ScannedPage {
    pub fn new(source_url: String, strategy: String, html: String) -> Self {
        Self {
            source_url,
            strategy,
            html,
            fetched_at: Utc::now(),
        }
    }

    /// File name for a saved document: the host plus a slug of the path,
    /// e.g. `example.com_docs_intro.html`
    pub fn file_name(&self) -> String {
        let Ok(url) = url::Url::parse(&self.source_url) else {
            return "sitegrab_scan.html".to_string();
        };
        let Some(host) = url.host_str() else {
            return "sitegrab_scan.html".to_string();
        };

        let mut name = slug(host);
        for segment in url.path().split('/').filter(|s| !s.is_empty()) {
            name.push('_');
            name.push_str(&slug(segment));
        }
        if let Some(query) = url.query().filter(|q| !q.is_empty()) {
            name.push('_');
            name.push_str(&slug(query));
        }
        if let Some(port) = url.port() {
            name = format!("{}-{}", name, port);
        }

        let stem = name.strip_suffix(".html").unwrap_or(&name);
        format!("{}.html", stem)
    }
}

/// Keep ASCII alphanumerics, `-` and `.`; everything else becomes `-`.
fn slug(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
