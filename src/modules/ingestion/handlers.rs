use super::domain::queue::BookQueue;
use super::worker::{BackgroundWorker, WorkerStatistics};
use crate::modules::scraper::{AladinScraper, BookScraper};
use crate::{log_error, log_info};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SCRAPE_ACCEPTED_MESSAGE: &str = "Book information processing started";

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScrapeResponse {
    pub status: String,
    pub message: String,
}

impl ScrapeResponse {
    fn accepted() -> Self {
        Self {
            status: "success".to_string(),
            message: SCRAPE_ACCEPTED_MESSAGE.to_string(),
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/books/scrape", post(handle_scrape))
        .route("/api/ingestion/status", get(handle_status))
}

/// Scrape an Aladin page and queue the result.
///
/// The acknowledgement is the same whether or not anything was queued; the
/// upsert happens later in the background worker.
pub async fn handle_scrape(
    Extension(scraper): Extension<Arc<dyn BookScraper>>,
    Extension(queue): Extension<Arc<dyn BookQueue>>,
    Json(req): Json<ScrapeRequest>,
) -> Json<ScrapeResponse> {
    if AladinScraper::is_supported_url(&req.url) {
        if let Some((author_info, book_info)) = scraper.scrape(&req.url).await {
            let isbn = book_info.isbn.clone().unwrap_or_default();
            match queue.enqueue(author_info, book_info).await {
                Ok(()) => log_info!("Queued book {} on {}", isbn, queue.name()),
                Err(e) => log_error!("Failed to queue book {}: {}", isbn, e),
            }
        }
    } else {
        log_info!("Ignoring unsupported scrape URL {}", req.url);
    }

    Json(ScrapeResponse::accepted())
}

pub async fn handle_status(
    Extension(worker): Extension<Arc<BackgroundWorker>>,
) -> Json<WorkerStatistics> {
    Json(worker.get_statistics().await)
}
