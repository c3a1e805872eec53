use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::domain::{ProgressSink, RetrievalOutcome, ScannedPage};
use crate::engine::{ParallelRetriever, RetrievalEngine};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::normalizer::DocumentNormalizer;

pub struct AppContext {
    pub config: Config,
    pub engine: Arc<RetrievalEngine>,
    pub parallel_retriever: ParallelRetriever,
    pub normalizer: DocumentNormalizer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::from_config(&config.http)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let engine = Arc::new(RetrievalEngine::with_strategies(fetcher, config.relays()));
        let parallel_retriever = ParallelRetriever::with_workers(engine.clone(), config.engine.workers);
        let normalizer = DocumentNormalizer::new();

        Self {
            config,
            engine,
            parallel_retriever,
            normalizer,
        }
    }

    /// Retrieve `url` and inject the base directive exactly once.
    ///
    /// Returns `None` when every relay failed.
    pub async fn scan(&self, url: &str, progress: &dyn ProgressSink) -> Result<Option<ScannedPage>> {
        let outcome = self.engine.retrieve(url, progress).await?;
        Ok(self.finish(outcome))
    }

    /// Normalize a successful outcome into a page.
    pub fn finish(&self, outcome: RetrievalOutcome) -> Option<ScannedPage> {
        outcome.into_page().map(|page| {
            let html = self.normalizer.normalize(&page.markup, &page.target);
            ScannedPage::new(page.target, page.strategy, html)
        })
    }
}
