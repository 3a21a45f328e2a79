use crate::modules::catalog::domain::entities::Author;
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;

    /// Exact name match; the first author created wins when names repeat
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>>;

    /// Page through authors, optionally filtered by a case-insensitive name fragment
    async fn list(
        &self,
        name: Option<String>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Author>>;

    async fn save(&self, author: &Author) -> AppResult<Author>;

    async fn update(&self, author: &Author) -> AppResult<Author>;

    /// Returns false when no row matched
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
