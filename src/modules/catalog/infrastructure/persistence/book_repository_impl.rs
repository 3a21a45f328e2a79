use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::{
    entities::{Book, BookDetails},
    repositories::{BookFilter, BookRepository},
};
use crate::modules::catalog::infrastructure::models::{AuthorModel, BookModel};
use crate::schema::{authors, books};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;
use crate::log_debug;

pub struct BookRepositoryImpl {
    db: Arc<Database>,
}

impl BookRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn to_details((book, author): (BookModel, AuthorModel)) -> BookDetails {
        BookDetails {
            book: book.into(),
            author: author.into(),
        }
    }

    /// Load a book with its author on an already acquired connection
    fn load_details(conn: &mut PgConnection, id: Uuid) -> AppResult<BookDetails> {
        let row = books::table
            .inner_join(authors::table)
            .filter(books::id.eq(id))
            .select((BookModel::as_select(), AuthorModel::as_select()))
            .first::<(BookModel, AuthorModel)>(conn)?;
        Ok(Self::to_details(row))
    }
}

fn like_pattern(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("%{}%", v))
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn find_by_manage_id(&self, book_manage_id: &str) -> AppResult<Option<BookDetails>> {
        let db = Arc::clone(&self.db);
        let book_manage_id = book_manage_id.to_string();
        let row = task::spawn_blocking(move || -> AppResult<Option<(BookModel, AuthorModel)>> {
            let mut conn = db.get_connection()?;
            let row = books::table
                .inner_join(authors::table)
                .filter(books::book_manage_id.eq(&book_manage_id))
                .select((BookModel::as_select(), AuthorModel::as_select()))
                .first::<(BookModel, AuthorModel)>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(row.map(Self::to_details))
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let db = Arc::clone(&self.db);
        let isbn = isbn.to_string();
        let model = task::spawn_blocking(move || -> AppResult<Option<BookModel>> {
            let mut conn = db.get_connection()?;
            let m = books::table
                .filter(books::isbn.eq(&isbn))
                .select(BookModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(Book::from))
    }

    async fn list(
        &self,
        filter: BookFilter,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<BookDetails>> {
        let db = Arc::clone(&self.db);
        let title = like_pattern(&filter.title);
        let author_name = like_pattern(&filter.author_name);
        let timer = TimedOperation::new("list_books");

        let (rows, total) = task::spawn_blocking(
            move || -> AppResult<(Vec<(BookModel, AuthorModel)>, i64)> {
                let mut conn = db.get_connection()?;
                let filtered = || {
                    let mut query = books::table
                        .inner_join(authors::table)
                        .into_boxed::<diesel::pg::Pg>();
                    if let Some(title) = &title {
                        query = query.filter(books::title.ilike(title.clone()));
                    }
                    if let Some(author_name) = &author_name {
                        query = query.filter(authors::name.ilike(author_name.clone()));
                    }
                    query
                };

                let total: i64 = filtered().count().get_result(&mut conn)?;
                let rows = filtered()
                    .order(books::created.desc())
                    .offset(pagination.offset())
                    .limit(pagination.limit())
                    .select((BookModel::as_select(), AuthorModel::as_select()))
                    .load::<(BookModel, AuthorModel)>(&mut conn)?;
                Ok((rows, total))
            },
        )
        .await??;

        timer.finish_with_info(&format!("{} of {} books", rows.len(), total));

        Ok(PaginatedResult::new(
            rows.into_iter().map(Self::to_details).collect(),
            total.max(0) as u64,
            &pagination,
        ))
    }

    async fn save(&self, book: &Book) -> AppResult<BookDetails> {
        let db = Arc::clone(&self.db);
        let model = BookModel::from(book);
        let details = task::spawn_blocking(move || -> AppResult<BookDetails> {
            let mut conn = db.get_connection()?;
            diesel::insert_into(books::table)
                .values(&model)
                .execute(&mut conn)?;
            Self::load_details(&mut conn, model.id)
        })
        .await??;

        log_debug!(
            "Saved book {} (isbn {})",
            details.book.book_manage_id,
            details.book.isbn
        );
        Ok(details)
    }

    async fn update(&self, book: &Book) -> AppResult<BookDetails> {
        let db = Arc::clone(&self.db);
        let model = BookModel::from(book);
        task::spawn_blocking(move || -> AppResult<BookDetails> {
            let mut conn = db.get_connection()?;
            diesel::update(books::table.find(model.id))
                .set(&model)
                .execute(&mut conn)?;
            Self::load_details(&mut conn, model.id)
        })
        .await?
    }

    async fn delete_by_manage_id(&self, book_manage_id: &str) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        let book_manage_id = book_manage_id.to_string();
        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let deleted =
                diesel::delete(books::table.filter(books::book_manage_id.eq(&book_manage_id)))
                    .execute(&mut conn)?;
            Ok(deleted > 0)
        })
        .await?
    }
}
