use crate::modules::catalog::domain::{
    entities::{Author, AuthorInfo},
    repositories::AuthorRepository,
};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct AuthorService {
    author_repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(author_repo: Arc<dyn AuthorRepository>) -> Self {
        Self { author_repo }
    }

    pub async fn create_author(&self, request: CreateAuthorRequest) -> AppResult<Author> {
        let author = Author::new(request.name.trim().to_string(), request.description)?;
        let saved = self.author_repo.save(&author).await?;
        log_info!("Created author '{}' ({})", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        self.author_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with ID {} not found", id)))
    }

    pub async fn list_authors(
        &self,
        name: Option<String>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Author>> {
        self.author_repo.list(name, pagination.normalized()).await
    }

    /// Partial update: only fields present in `changes` are written
    pub async fn update_author(&self, id: Uuid, changes: AuthorInfo) -> AppResult<Author> {
        let mut author = self.get_author(id).await?;
        author.apply_info(&changes)?;
        let updated = self.author_repo.update(&author).await?;
        log_debug!("Updated author {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        if !self.author_repo.delete(id).await? {
            return Err(AppError::NotFound(format!("Author with ID {} not found", id)));
        }
        log_info!("Deleted author {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::repositories::author_repository::MockAuthorRepository;

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_save().never();

        let service = AuthorService::new(Arc::new(repo));
        let err = service
            .create_author(CreateAuthorRequest {
                name: "  ".to_string(),
                description: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn update_merges_present_fields_only() {
        let existing = Author::new("Kim".to_string(), Some("old".to_string())).unwrap();
        let id = existing.id;

        let mut repo = MockAuthorRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().returning(|author| Ok(author.clone()));

        let service = AuthorService::new(Arc::new(repo));
        let updated = service
            .update_author(id, AuthorInfo::named("Kim Young-ha"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Kim Young-ha");
        assert_eq!(updated.description.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn delete_missing_author_is_not_found() {
        let mut repo = MockAuthorRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = AuthorService::new(Arc::new(repo));
        let err = service.delete_author(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
