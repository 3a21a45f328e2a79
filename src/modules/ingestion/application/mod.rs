pub mod upsert_worker;

pub use upsert_worker::UpsertWorker;
