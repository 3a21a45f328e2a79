use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use crate::modules::catalog::domain::repositories::CatalogRepository;
use crate::modules::ingestion::domain::entities::{FailureKind, UpsertOutcome, UpsertSummary};
use crate::modules::storage::{ImageResolver, COVER_IMAGE_PREFIX, PUBLISHER_IMAGE_PREFIX};
use crate::shared::errors::AppError;
use crate::{log_info, log_warn};
use std::sync::Arc;

/// Persists one `(author_info, book_info)` pair.
///
/// Remote images are copied into storage first, then author and book are
/// written in a single transaction. Errors are reported through
/// `UpsertOutcome::Failure`, never raised.
pub struct UpsertWorker {
    catalog: Arc<dyn CatalogRepository>,
    images: Arc<ImageResolver>,
}

impl UpsertWorker {
    pub fn new(catalog: Arc<dyn CatalogRepository>, images: Arc<ImageResolver>) -> Self {
        Self { catalog, images }
    }

    pub async fn upsert(&self, author_info: AuthorInfo, book_info: BookInfo) -> UpsertOutcome {
        let Some(isbn) = book_info.normalized_isbn().map(str::to_string) else {
            log_warn!("Skipping book without ISBN");
            return UpsertOutcome::failure(FailureKind::MissingRequiredField, "book_info.isbn");
        };
        if author_info.present_name().is_none() {
            log_warn!("Skipping book {}: author has no name", isbn);
            return UpsertOutcome::failure(FailureKind::MissingRequiredField, "author_info.name");
        }

        let book_info = self.resolve_images(book_info).await;

        match self.catalog.upsert_entry(author_info, book_info).await {
            Ok(upsert) => {
                let summary = UpsertSummary::from(&upsert);
                log_info!(
                    "Saved book {} by '{}' (book created: {}, author created: {})",
                    summary.isbn,
                    summary.author_name,
                    summary.book_created,
                    summary.author_created
                );
                UpsertOutcome::Success(summary)
            }
            Err(e) => {
                let kind = Self::classify(&e);
                log_warn!("Failed to save book {} ({}): {}", isbn, kind, e);
                UpsertOutcome::failure(kind, e.to_string())
            }
        }
    }

    fn classify(error: &AppError) -> FailureKind {
        match error {
            AppError::MissingField(_) => FailureKind::MissingRequiredField,
            AppError::ValidationError(_) | AppError::InvalidInput(_) => FailureKind::InvalidField,
            _ => FailureKind::Persistence,
        }
    }

    /// A publisher image that points at the cover URL reuses the cover copy.
    async fn resolve_images(&self, mut book_info: BookInfo) -> BookInfo {
        let mut cover_copy: Option<(String, String)> = None;
        if let Some(cover) = book_info.cover_image.as_deref().filter(|v| !v.is_empty()) {
            let resolved = self.images.resolve(cover, COVER_IMAGE_PREFIX).await;
            cover_copy = Some((cover.to_string(), resolved.clone()));
            book_info.cover_image = Some(resolved);
        }
        if let Some(logo) = book_info.publisher_image.as_deref().filter(|v| !v.is_empty()) {
            let resolved = match &cover_copy {
                Some((source, copy)) if source == logo => copy.clone(),
                _ => self.images.resolve(logo, PUBLISHER_IMAGE_PREFIX).await,
            };
            book_info.publisher_image = Some(resolved);
        }
        book_info
    }
}
