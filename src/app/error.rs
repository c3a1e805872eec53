use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitegrabError {
    #[error("No URL given")]
    EmptyUrl,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected relay payload: {0}")]
    Envelope(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SitegrabError>;
