use super::application::{
    AuthorService, BookService, CreateAuthorRequest, CreateBookRequest, UpdateBookRequest,
};
use super::domain::entities::{Author, AuthorInfo, BookDetails};
use super::domain::repositories::BookFilter;
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct BookListParams {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorListParams {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn pagination(page: Option<u32>, size: Option<u32>) -> PaginationParams {
    let defaults = PaginationParams::default();
    PaginationParams::new(page.unwrap_or(defaults.page), size.unwrap_or(defaults.size))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/books", get(handle_list_books).post(handle_create_book))
        .route(
            "/api/books/:book_manage_id",
            get(handle_get_book)
                .put(handle_update_book)
                .delete(handle_delete_book),
        )
        .route(
            "/api/authors",
            get(handle_list_authors).post(handle_create_author),
        )
        .route(
            "/api/authors/:id",
            get(handle_get_author)
                .put(handle_update_author)
                .delete(handle_delete_author),
        )
}

// ================== BOOKS ==================

pub async fn handle_list_books(
    Query(params): Query<BookListParams>,
    Extension(books): Extension<Arc<BookService>>,
) -> AppResult<Json<PaginatedResult<BookDetails>>> {
    let filter = BookFilter {
        title: params.title,
        author_name: params.author_name,
    };
    let pagination = pagination(params.page, params.size);
    Ok(Json(books.list_books(filter, pagination).await?))
}

pub async fn handle_get_book(
    Path(book_manage_id): Path<String>,
    Extension(books): Extension<Arc<BookService>>,
) -> AppResult<Json<BookDetails>> {
    Ok(Json(books.get_book(&book_manage_id).await?))
}

pub async fn handle_create_book(
    Extension(books): Extension<Arc<BookService>>,
    Json(req): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookDetails>)> {
    let created = books.create_book(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn handle_update_book(
    Path(book_manage_id): Path<String>,
    Extension(books): Extension<Arc<BookService>>,
    Json(req): Json<UpdateBookRequest>,
) -> AppResult<Json<BookDetails>> {
    Ok(Json(books.update_book(&book_manage_id, req).await?))
}

pub async fn handle_delete_book(
    Path(book_manage_id): Path<String>,
    Extension(books): Extension<Arc<BookService>>,
) -> AppResult<StatusCode> {
    books.delete_book(&book_manage_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ================== AUTHORS ==================

pub async fn handle_list_authors(
    Query(params): Query<AuthorListParams>,
    Extension(authors): Extension<Arc<AuthorService>>,
) -> AppResult<Json<PaginatedResult<Author>>> {
    let pagination = pagination(params.page, params.size);
    Ok(Json(authors.list_authors(params.name, pagination).await?))
}

pub async fn handle_get_author(
    Path(id): Path<Uuid>,
    Extension(authors): Extension<Arc<AuthorService>>,
) -> AppResult<Json<Author>> {
    Ok(Json(authors.get_author(id).await?))
}

pub async fn handle_create_author(
    Extension(authors): Extension<Arc<AuthorService>>,
    Json(req): Json<CreateAuthorRequest>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = authors.create_author(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn handle_update_author(
    Path(id): Path<Uuid>,
    Extension(authors): Extension<Arc<AuthorService>>,
    Json(req): Json<AuthorInfo>,
) -> AppResult<Json<Author>> {
    Ok(Json(authors.update_author(id, req).await?))
}

pub async fn handle_delete_author(
    Path(id): Path<Uuid>,
    Extension(authors): Extension<Arc<AuthorService>>,
) -> AppResult<StatusCode> {
    authors.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
