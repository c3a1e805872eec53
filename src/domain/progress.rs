use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

/// Status notification emitted at each attempt boundary of a retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    AttemptStarted { strategy: String },
    AttemptSucceeded { strategy: String },
    AttemptFailed { strategy: String, reason: String },
    /// Emitted once, after the last strategy failed
    Exhausted,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttemptStarted { strategy } => write!(f, "Engine: Trying {}...", strategy),
            Self::AttemptSucceeded { strategy } => write!(f, "Engine: {} succeeded.", strategy),
            Self::AttemptFailed { strategy, reason } => {
                write!(f, "Engine: {} failed ({}).", strategy, reason)
            }
            Self::Exhausted => write!(f, "Engine: All relays failed."),
        }
    }
}

/// Receiver for progress events. The engine keeps no history of its own.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards events into a tokio channel, e.g. for a UI task to drain.
pub struct ChannelSink(pub UnboundedSender<ProgressEvent>);

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        // A dropped receiver only means nobody is watching anymore
        let _ = self.0.send(event);
    }
}

/// Logs every event through tracing, tagged with the scanned URL.
pub struct TracingSink {
    url: String,
}

impl TracingSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ProgressSink for TracingSink {
    fn emit(&self, event: ProgressEvent) {
        match &event {
            ProgressEvent::AttemptFailed { .. } | ProgressEvent::Exhausted => {
                tracing::warn!(url = %self.url, "{}", event)
            }
            _ => tracing::info!(url = %self.url, "{}", event),
        }
    }
}
