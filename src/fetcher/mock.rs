use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, SitegrabError};
use crate::fetcher::Fetcher;

/// Canned reply for requests whose URL starts with a given prefix
#[derive(Clone)]
pub enum MockReply {
    Body(String),
    Status(u16),
    /// Transport-level failure, e.g. a refused connection
    Error(String),
}

/// Recording fetcher for engine tests. Unmatched URLs fail with a 404.
#[derive(Default)]
pub struct MockFetcher {
    replies: Vec<(String, MockReply)>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, prefix: &str, reply: MockReply) -> Self {
        self.replies.push((prefix.to_string(), reply));
        self
    }

    pub fn body(self, prefix: &str, body: &str) -> Self {
        self.reply(prefix, MockReply::Body(body.to_string()))
    }

    pub fn status(self, prefix: &str, status: u16) -> Self {
        self.reply(prefix, MockReply::Status(status))
    }

    pub fn error(self, prefix: &str, message: &str) -> Self {
        self.reply(prefix, MockReply::Error(message.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(MockReply::Status(404));

        match reply {
            MockReply::Body(body) => Ok(body),
            MockReply::Status(status) => Err(SitegrabError::Status {
                status,
                url: url.to_string(),
            }),
            MockReply::Error(message) => Err(SitegrabError::Other(message)),
        }
    }
}
