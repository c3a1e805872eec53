pub mod parallel;
pub mod strategy;

pub use parallel::{ParallelRetriever, DEFAULT_WORKERS};
pub use strategy::{RelayStrategy, ResponseDecoding};

use std::sync::Arc;

use crate::app::Result;
use crate::domain::{
    ProgressEvent, ProgressSink, RetrievalOutcome, RetrievalRequest, RetrievedPage,
};
use crate::fetcher::Fetcher;

/// Runs the relay chain for one URL.
///
/// Strategies are tried strictly in order, one request each. A failing
/// strategy is reported to the sink and the next one runs; the first
/// successful decode ends the chain.
pub struct RetrievalEngine {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    strategies: Vec<RelayStrategy>,
}

impl RetrievalEngine {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_strategies(fetcher, RelayStrategy::defaults())
    }

    pub fn with_strategies(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        strategies: Vec<RelayStrategy>,
    ) -> Self {
        Self {
            fetcher,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[RelayStrategy] {
        &self.strategies
    }

    /// Retrieve the raw markup of `url`.
    ///
    /// Only an empty `url` is an error. Running out of strategies is the
    /// normal [`RetrievalOutcome::Exhausted`] result.
    pub async fn retrieve(
        &self,
        url: &str,
        progress: &dyn ProgressSink,
    ) -> Result<RetrievalOutcome> {
        let request = RetrievalRequest::new(url)?;
        Ok(self.run(&request, progress).await)
    }

    pub async fn run(
        &self,
        request: &RetrievalRequest,
        progress: &dyn ProgressSink,
    ) -> RetrievalOutcome {
        let target = request.target();

        for strategy in &self.strategies {
            progress.emit(ProgressEvent::AttemptStarted {
                strategy: strategy.label.clone(),
            });

            match self.attempt(strategy, target).await {
                Ok(markup) => {
                    tracing::info!(
                        strategy = %strategy.name,
                        bytes = markup.len(),
                        "Retrieved {}",
                        target
                    );
                    progress.emit(ProgressEvent::AttemptSucceeded {
                        strategy: strategy.label.clone(),
                    });
                    return RetrievalOutcome::Success(RetrievedPage {
                        target: target.to_string(),
                        strategy: strategy.name.clone(),
                        markup,
                    });
                }
                Err(e) => {
                    tracing::warn!(strategy = %strategy.name, "Relay failed for {}: {}", target, e);
                    progress.emit(ProgressEvent::AttemptFailed {
                        strategy: strategy.label.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        progress.emit(ProgressEvent::Exhausted);
        RetrievalOutcome::Exhausted
    }

    async fn attempt(&self, strategy: &RelayStrategy, target: &str) -> Result<String> {
        let relay_url = strategy.relay_url(target);
        tracing::debug!(strategy = %strategy.name, "GET {}", relay_url);

        let body = self.fetcher.fetch(&relay_url).await?;
        strategy.decode(body)
    }
}
