/// Test helper functions and service builders
use async_trait::async_trait;
use axum::http::header;
use axum::routing::get;
use axum::Router;
use lms_lib::modules::catalog::{AuthorInfo, BookInfo};
use lms_lib::modules::ingestion::{BookQueue, InMemoryBookQueue};
use lms_lib::modules::scraper::BookScraper;
use lms_lib::modules::storage::LocalFileStorage;
use lms_lib::shared::Database;
use lms_lib::{build_router, AppServices};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const PUBLIC_BASE_URL: &str = "http://localhost:8012/media";
pub const QUEUE_NAME: &str = "book_info_queue";

/// Scraper double returning one fixed record for every URL
pub struct FixtureScraper {
    result: Option<(AuthorInfo, BookInfo)>,
    calls: AtomicUsize,
}

impl FixtureScraper {
    pub fn returning(author_info: AuthorInfo, book_info: BookInfo) -> Self {
        Self {
            result: Some((author_info, book_info)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookScraper for FixtureScraper {
    async fn scrape(&self, _url: &str) -> Option<(AuthorInfo, BookInfo)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct TestServices {
    pub services: AppServices,
    pub queue: Arc<InMemoryBookQueue>,
}

/// Build the application on an in-memory queue and a local storage root
pub fn build_test_services(
    database: Arc<Database>,
    storage_root: &Path,
    scraper: Arc<dyn BookScraper>,
) -> TestServices {
    let queue = Arc::new(InMemoryBookQueue::new(QUEUE_NAME));
    let storage = Arc::new(LocalFileStorage::new(storage_root, PUBLIC_BASE_URL));
    let services = AppServices::new(
        database,
        Arc::clone(&queue) as Arc<dyn BookQueue>,
        storage,
        scraper,
        Duration::from_millis(50),
    )
    .expect("Failed to build test services");

    TestServices { services, queue }
}

/// Serve the application router on an ephemeral port; returns its base URL
pub async fn spawn_app(services: &AppServices) -> String {
    let app = build_router(services);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Serve `bytes` as a JPEG at `/cover.jpg`; returns the image URL
pub async fn spawn_image_server(bytes: &'static [u8]) -> String {
    let app = Router::new().route(
        "/cover.jpg",
        get(move || async move { ([(header::CONTENT_TYPE, "image/jpeg")], bytes) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind image listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Image server failed");
    });
    format!("http://{}/cover.jpg", addr)
}
