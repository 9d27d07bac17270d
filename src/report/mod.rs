mod client;
mod reporter;
mod summary;
mod upload;

pub use client::{Identity, LogNotifier, Notice, Notifier, ReportingClient};
pub use reporter::{ResultReporter, UploadOutcome};
pub use summary::{GameSummary, HistoryEntry, ResultData};
pub use upload::{UploadAck, UploadPlayer, UploadRequest};
