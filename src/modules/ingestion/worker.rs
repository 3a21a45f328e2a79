/// Background worker draining the book ingestion queue
///
/// Each pass takes items off the head of the queue until it reports empty and
/// hands them to the `UpsertWorker`. Between empty passes the worker sleeps for
/// `poll_interval`. One worker per queue.
use crate::modules::ingestion::application::UpsertWorker;
use crate::modules::ingestion::domain::entities::{DrainReport, QueuedBookInfo, UpsertOutcome};
use crate::modules::ingestion::domain::queue::BookQueue;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_info, log_warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

pub struct BackgroundWorker {
    queue: Arc<dyn BookQueue>,
    upsert_worker: Arc<UpsertWorker>,
    poll_interval: Duration,
    is_running: Arc<RwLock<bool>>,
    totals: Mutex<WorkerTotals>,
}

#[derive(Debug, Clone, Default)]
struct WorkerTotals {
    drains: u64,
    items: DrainReport,
    last_drain: Option<DrainReport>,
    last_error: Option<String>,
}

impl BackgroundWorker {
    pub fn new(
        queue: Arc<dyn BookQueue>,
        upsert_worker: Arc<UpsertWorker>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            upsert_worker,
            poll_interval,
            is_running: Arc::new(RwLock::new(false)),
            totals: Mutex::new(WorkerTotals::default()),
        }
    }

    /// Process queued items until the queue reports empty.
    ///
    /// Malformed payloads are skipped and failed upserts are counted; both let
    /// the loop continue. A queue error ends the pass early and is returned,
    /// leaving the remaining items queued.
    pub async fn drain(&self) -> AppResult<DrainReport> {
        let mut report = DrainReport::default();
        let timer = TimedOperation::new("drain_book_queue");

        loop {
            let raw = match self.queue.dequeue().await {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(e) => {
                    log_error!(
                        "Queue {} failed after {} items: {}",
                        self.queue.name(),
                        report.processed,
                        e
                    );
                    self.record(&report, Some(e.to_string())).await;
                    return Err(e);
                }
            };
            report.processed += 1;

            let item = match QueuedBookInfo::from_payload(&raw) {
                Ok(item) => item,
                Err(e) => {
                    log_error!("Skipping malformed queue payload: {}", e);
                    report.skipped += 1;
                    continue;
                }
            };

            let isbn = item.isbn().map(str::to_string);
            match self
                .upsert_worker
                .upsert(item.author_info, item.book_info)
                .await
            {
                UpsertOutcome::Success(_) => report.succeeded += 1,
                UpsertOutcome::Failure { kind, reason } => {
                    log_warn!(
                        "Upsert failed for isbn {} ({}): {}",
                        isbn.as_deref().unwrap_or("-"),
                        kind,
                        reason
                    );
                    report.failed += 1;
                }
            }
            LogContext::queue_progress(self.queue.name(), report.processed, isbn.as_deref());
        }

        if report.is_empty() {
            log_debug!("Queue {} is empty", self.queue.name());
        } else {
            timer.finish_with_info(&format!(
                "{} processed, {} succeeded, {} failed, {} skipped",
                report.processed, report.succeeded, report.failed, report.skipped
            ));
        }
        self.record(&report, None).await;
        Ok(report)
    }

    async fn record(&self, report: &DrainReport, error: Option<String>) {
        let mut totals = self.totals.lock().await;
        totals.drains += 1;
        totals.items.absorb(report);
        totals.last_drain = Some(*report);
        totals.last_error = error;
    }

    /// Spawn the poll loop on the tokio runtime
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let worker = Arc::clone(self);
        tokio::spawn(async move { worker.run().await })
    }

    /// Run the poll loop until `stop` is called
    pub async fn run(self: Arc<Self>) {
        log_info!(
            "Background worker started on queue {} (poll every {:?})",
            self.queue.name(),
            self.poll_interval
        );

        {
            let mut running = self.is_running.write().await;
            *running = true;
        }

        loop {
            {
                let running = self.is_running.read().await;
                if !*running {
                    log_info!("Background worker stopped");
                    break;
                }
            }

            match self.drain().await {
                Ok(report) => {
                    if report.is_empty() {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
                Err(e) => {
                    log_error!("Error in worker loop: {}", e);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    pub async fn stop(&self) {
        let mut running = self.is_running.write().await;
        *running = false;
        log_info!("Background worker stop requested");
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub async fn get_statistics(&self) -> WorkerStatistics {
        let queue_length = match self.queue.len().await {
            Ok(length) => Some(length),
            Err(e) => {
                log_warn!("Could not read length of queue {}: {}", self.queue.name(), e);
                None
            }
        };
        let totals = self.totals.lock().await.clone();

        WorkerStatistics {
            is_running: self.is_running().await,
            queue_name: self.queue.name().to_string(),
            queue_length,
            drains: totals.drains,
            totals: totals.items,
            last_drain: totals.last_drain,
            last_error: totals.last_error,
        }
    }
}

/// Worker statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct WorkerStatistics {
    pub is_running: bool,
    pub queue_name: String,
    /// `None` when the queue backend could not be reached
    pub queue_length: Option<u64>,
    pub drains: u64,
    pub totals: DrainReport,
    pub last_drain: Option<DrainReport>,
    pub last_error: Option<String>,
}
