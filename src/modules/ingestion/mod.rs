/// Book ingestion pipeline: scrape -> enqueue -> drain -> upsert
///
/// Architecture:
/// - Domain: queue payloads, outcomes and the `BookQueue` trait
/// - Infrastructure: Redis and in-memory queues
/// - Application: `UpsertWorker`, one item at a time
/// - Worker: background drain loop
pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;
pub mod worker;

pub use application::UpsertWorker;
pub use domain::{
    BookQueue, DrainReport, FailureKind, QueuedBookInfo, UpsertOutcome, UpsertSummary,
};
pub use infrastructure::{InMemoryBookQueue, RedisBookQueue};
pub use worker::{BackgroundWorker, WorkerStatistics};
