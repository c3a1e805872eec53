/// Raw markup returned by the first strategy that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedPage {
    /// Absolute URL the relays were asked for
    pub target: String,
    /// Name of the strategy that produced the body
    pub strategy: String,
    pub markup: String,
}

/// Result of running the whole relay chain once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    Success(RetrievedPage),
    /// Every strategy failed; the caller should offer manual entry.
    Exhausted,
}

impl RetrievalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_page(self) -> Option<RetrievedPage> {
        match self {
            Self::Success(page) => Some(page),
            Self::Exhausted => None,
        }
    }
}
