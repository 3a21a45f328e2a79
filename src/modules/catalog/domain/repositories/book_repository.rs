use crate::modules::catalog::domain::entities::{Book, BookDetails};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;

/// Optional list filters; both match case-insensitive substrings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author_name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_manage_id(&self, book_manage_id: &str) -> AppResult<Option<BookDetails>>;

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Newest first
    async fn list(
        &self,
        filter: BookFilter,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<BookDetails>>;

    async fn save(&self, book: &Book) -> AppResult<BookDetails>;

    async fn update(&self, book: &Book) -> AppResult<BookDetails>;

    async fn delete_by_manage_id(&self, book_manage_id: &str) -> AppResult<bool>;
}
