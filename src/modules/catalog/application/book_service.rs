use crate::modules::catalog::domain::{
    entities::{Book, BookDetails, BookInfo},
    repositories::{AuthorRepository, BookFilter, BookRepository},
};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Body of `POST /api/books`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub author_id: Uuid,
    #[serde(flatten)]
    pub book: BookInfo,
}

/// Body of `PUT /api/books/{book_manage_id}`; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(flatten)]
    pub book: BookInfo,
}

pub struct BookService {
    book_repo: Arc<dyn BookRepository>,
    author_repo: Arc<dyn AuthorRepository>,
}

impl BookService {
    pub fn new(book_repo: Arc<dyn BookRepository>, author_repo: Arc<dyn AuthorRepository>) -> Self {
        Self {
            book_repo,
            author_repo,
        }
    }

    async fn ensure_author_exists(&self, author_id: Uuid) -> AppResult<()> {
        match self.author_repo.find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Author with ID {} not found",
                author_id
            ))),
        }
    }

    pub async fn create_book(&self, request: CreateBookRequest) -> AppResult<BookDetails> {
        self.ensure_author_exists(request.author_id).await?;

        let book = Book::from_info(&request.book, request.author_id)?;

        if self.book_repo.find_by_isbn(&book.isbn).await?.is_some() {
            return Err(AppError::ValidationError(format!(
                "Book with ISBN '{}' already exists",
                book.isbn
            )));
        }
        if self
            .book_repo
            .find_by_manage_id(&book.book_manage_id)
            .await?
            .is_some()
        {
            return Err(AppError::ValidationError(format!(
                "Book with manage id '{}' already exists",
                book.book_manage_id
            )));
        }

        let saved = self.book_repo.save(&book).await?;
        log_info!(
            "Created book {} '{}'",
            saved.book.book_manage_id,
            saved.book.title
        );
        Ok(saved)
    }

    pub async fn get_book(&self, book_manage_id: &str) -> AppResult<BookDetails> {
        self.book_repo
            .find_by_manage_id(book_manage_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book '{}' not found", book_manage_id)))
    }

    pub async fn list_books(
        &self,
        filter: BookFilter,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<BookDetails>> {
        self.book_repo.list(filter, pagination.normalized()).await
    }

    pub async fn update_book(
        &self,
        book_manage_id: &str,
        request: UpdateBookRequest,
    ) -> AppResult<BookDetails> {
        let BookDetails { mut book, .. } = self.get_book(book_manage_id).await?;

        if let Some(author_id) = request.author_id {
            self.ensure_author_exists(author_id).await?;
            book.assign_author(author_id);
        }

        if let Some(isbn) = request.book.normalized_isbn() {
            if isbn != book.isbn {
                if let Some(other) = self.book_repo.find_by_isbn(isbn).await? {
                    if other.id != book.id {
                        return Err(AppError::ValidationError(format!(
                            "Book with ISBN '{}' already exists",
                            isbn
                        )));
                    }
                }
            }
        }

        book.apply_info(&request.book)?;
        let updated = self.book_repo.update(&book).await?;
        log_debug!("Updated book {}", updated.book.book_manage_id);
        Ok(updated)
    }

    pub async fn delete_book(&self, book_manage_id: &str) -> AppResult<()> {
        if !self.book_repo.delete_by_manage_id(book_manage_id).await? {
            return Err(AppError::NotFound(format!(
                "Book '{}' not found",
                book_manage_id
            )));
        }
        log_info!("Deleted book {}", book_manage_id);
        Ok(())
    }
}
