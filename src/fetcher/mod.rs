pub mod http_fetcher;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::app::Result;

/// Transport used by relay strategies.
///
/// One call is one GET with no retry. Implementations return the body only
/// for success statuses and an error for everything else.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}
