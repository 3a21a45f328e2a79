pub mod entities;
pub mod queue;

pub use entities::{DrainReport, FailureKind, QueuedBookInfo, UpsertOutcome, UpsertSummary};
pub use queue::BookQueue;
