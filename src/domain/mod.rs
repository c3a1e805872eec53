pub mod outcome;
pub mod page;
pub mod progress;
pub mod request;

pub use outcome::{RetrievalOutcome, RetrievedPage};
pub use page::ScannedPage;
pub use progress::{ChannelSink, ProgressEvent, ProgressSink, TracingSink};
pub use request::RetrievalRequest;
