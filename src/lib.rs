pub mod modules;
mod schema;
pub mod shared;

use axum::{Extension, Router};
use modules::{
    catalog::{
        handlers as catalog_handlers, AuthorRepository, AuthorRepositoryImpl, AuthorService,
        BookRepository, BookRepositoryImpl, BookService, CatalogRepository, CatalogRepositoryImpl,
    },
    ingestion::{
        handlers as ingestion_handlers, BackgroundWorker, BookQueue, InMemoryBookQueue,
        RedisBookQueue, UpsertWorker,
    },
    scraper::{AladinScraper, BookScraper},
    storage::{handlers as storage_handlers, FileStorage, ImageResolver, LocalFileStorage},
};
use shared::errors::AppResult;
use shared::utils::logger::init_logger;
use shared::{AppConfig, Database};
use std::sync::Arc;
use std::time::Duration;

/// Everything the HTTP layer and the background worker share
#[derive(Clone)]
pub struct AppServices {
    pub author_service: Arc<AuthorService>,
    pub book_service: Arc<BookService>,
    pub scraper: Arc<dyn BookScraper>,
    pub queue: Arc<dyn BookQueue>,
    pub worker: Arc<BackgroundWorker>,
    pub storage: Arc<LocalFileStorage>,
}

impl AppServices {
    /// Wire repositories and services on top of an already migrated database
    pub fn new(
        database: Arc<Database>,
        queue: Arc<dyn BookQueue>,
        storage: Arc<LocalFileStorage>,
        scraper: Arc<dyn BookScraper>,
        poll_interval: Duration,
    ) -> AppResult<Self> {
        let author_repo: Arc<dyn AuthorRepository> =
            Arc::new(AuthorRepositoryImpl::new(Arc::clone(&database)));
        let book_repo: Arc<dyn BookRepository> =
            Arc::new(BookRepositoryImpl::new(Arc::clone(&database)));
        let catalog_repo: Arc<dyn CatalogRepository> =
            Arc::new(CatalogRepositoryImpl::new(Arc::clone(&database)));

        let author_service = Arc::new(AuthorService::new(Arc::clone(&author_repo)));
        let book_service = Arc::new(BookService::new(book_repo, author_repo));

        let file_storage: Arc<dyn FileStorage> = storage.clone();
        let images = Arc::new(ImageResolver::new(file_storage)?);
        let upsert_worker = Arc::new(UpsertWorker::new(catalog_repo, images));
        let worker = Arc::new(BackgroundWorker::new(
            Arc::clone(&queue),
            upsert_worker,
            poll_interval,
        ));

        Ok(Self {
            author_service,
            book_service,
            scraper,
            queue,
            worker,
            storage,
        })
    }

    pub fn from_config(config: &AppConfig, database: Arc<Database>) -> AppResult<Self> {
        let queue = build_queue(config)?;
        let storage = Arc::new(LocalFileStorage::new(
            config.storage_root.clone(),
            &config.storage_public_base_url,
        ));
        let scraper: Arc<dyn BookScraper> =
            Arc::new(AladinScraper::new(config.scraper_requests_per_second)?);

        Self::new(
            database,
            queue,
            storage,
            scraper,
            config.worker_poll_interval,
        )
    }
}

/// Redis when `REDIS_URL` is set, otherwise a process-local queue
pub fn build_queue(config: &AppConfig) -> AppResult<Arc<dyn BookQueue>> {
    match &config.redis_url {
        Some(url) => {
            log_info!("Using Redis queue {} at {}", config.queue_name, url);
            Ok(Arc::new(RedisBookQueue::new(url, config.queue_name.clone())?))
        }
        None => {
            log_warn!(
                "REDIS_URL not set, queue {} lives in memory only",
                config.queue_name
            );
            Ok(Arc::new(InMemoryBookQueue::new(config.queue_name.clone())))
        }
    }
}

pub fn build_router(services: &AppServices) -> Router {
    Router::new()
        .merge(catalog_handlers::router())
        .merge(ingestion_handlers::router())
        .merge(storage_handlers::router())
        .layer(Extension(Arc::clone(&services.author_service)))
        .layer(Extension(Arc::clone(&services.book_service)))
        .layer(Extension(Arc::clone(&services.scraper)))
        .layer(Extension(Arc::clone(&services.queue)))
        .layer(Extension(Arc::clone(&services.worker)))
        .layer(Extension(Arc::clone(&services.storage)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for shutdown signal: {}", e);
    }
}

pub async fn run() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env()?;
    let database = Arc::new(Database::new(&config.database_url)?);
    database.run_migrations()?;

    let services = AppServices::from_config(&config, Arc::clone(&database))?;
    let worker_handle = services.worker.start();

    let app = build_router(&services);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    log_info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.worker.stop().await;
    if let Err(e) = worker_handle.await {
        log_error!("Background worker ended abnormally: {}", e);
    }
    Ok(())
}
