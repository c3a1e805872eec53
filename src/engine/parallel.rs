use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::{Result, SitegrabError};
use crate::domain::{RetrievalOutcome, TracingSink};
use crate::engine::RetrievalEngine;

pub const DEFAULT_WORKERS: usize = 4;

/// Runs independent scans of several URLs at once.
///
/// Each URL still walks its own relay chain sequentially; only distinct
/// scans overlap, bounded by the worker count.
pub struct ParallelRetriever {
    engine: Arc<RetrievalEngine>,
    semaphore: Arc<Semaphore>,
}

impl ParallelRetriever {
    pub fn with_workers(engine: Arc<RetrievalEngine>, workers: usize) -> Self {
        Self {
            engine,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Results come back in the order of `urls`.
    pub async fn retrieve_all(&self, urls: Vec<String>) -> Vec<(String, Result<RetrievalOutcome>)> {
        let mut handles = Vec::new();

        for url in urls {
            let engine = self.engine.clone();
            let semaphore = self.semaphore.clone();

            let task_url = url.clone();
            let handle = tokio::spawn(async move {
                match semaphore.acquire().await {
                    Ok(_permit) => {
                        let sink = TracingSink::new(task_url.as_str());
                        engine.retrieve(&task_url, &sink).await
                    }
                    Err(e) => Err(SitegrabError::Other(format!("worker pool closed: {}", e))),
                }
            });

            handles.push((url, handle));
        }

        let (urls, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let joined = futures::future::join_all(handles).await;

        urls.into_iter()
            .zip(joined)
            .map(|(url, joined)| match joined {
                Ok(result) => (url, result),
                Err(e) => {
                    tracing::error!(url = %url, "Task join error: {}", e);
                    let err = SitegrabError::Other(format!("scan task failed: {}", e));
                    (url, Err(err))
                }
            })
            .collect()
    }
}
