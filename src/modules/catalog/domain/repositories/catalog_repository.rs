use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use crate::modules::catalog::domain::services::CatalogUpsert;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Transactional write path used by the ingestion pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Resolve or create the author, resolve or create the book, link them.
    ///
    /// Runs as a single transaction; on error nothing is persisted.
    async fn upsert_entry(
        &self,
        author_info: AuthorInfo,
        book_info: BookInfo,
    ) -> AppResult<CatalogUpsert>;
}
