use std::sync::Arc;

use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::prelude::*;
use tokio::task;

use crate::modules::catalog::domain::{
    entities::{Author, AuthorInfo, Book, BookInfo},
    repositories::CatalogRepository,
    services::{upsert_catalog_entry, CatalogStore, CatalogUpsert},
};
use crate::modules::catalog::infrastructure::models::{AuthorModel, BookModel};
use crate::schema::{authors, books};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;
use crate::shared::Database;
use crate::{log_debug, log_warn};

/// `CatalogStore` over a pooled connection
struct PgCatalogStore<'a> {
    conn: &'a mut PgConnection,
}

impl CatalogStore for PgCatalogStore<'_> {
    fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> AppResult<T>) -> AppResult<T> {
        AnsiTransactionManager::begin_transaction(&mut *self.conn)?;
        log_debug!("Starting catalog upsert transaction");

        match f(self) {
            Ok(value) => match AnsiTransactionManager::commit_transaction(&mut *self.conn) {
                Ok(()) => Ok(value),
                Err(err) => {
                    if let Err(rollback) = AnsiTransactionManager::rollback_transaction(&mut *self.conn) {
                        log_warn!("Rollback after failed commit also failed: {}", rollback);
                    }
                    Err(err.into())
                }
            },
            Err(err) => {
                if let Err(rollback) = AnsiTransactionManager::rollback_transaction(&mut *self.conn) {
                    log_warn!("Catalog upsert rollback failed: {}", rollback);
                }
                Err(err)
            }
        }
    }

    fn find_author_by_name(&mut self, name: &str) -> AppResult<Option<Author>> {
        let model = authors::table
            .filter(authors::name.eq(name))
            .order(authors::created.asc())
            .select(AuthorModel::as_select())
            .first(self.conn)
            .optional()?;
        Ok(model.map(Author::from))
    }

    fn insert_author(&mut self, author: &Author) -> AppResult<Author> {
        let model = diesel::insert_into(authors::table)
            .values(AuthorModel::from(author))
            .returning(AuthorModel::as_returning())
            .get_result(self.conn)?;
        Ok(model.into())
    }

    fn update_author(&mut self, author: &Author) -> AppResult<Author> {
        let model = AuthorModel::from(author);
        let updated = diesel::update(authors::table.find(author.id))
            .set(&model)
            .returning(AuthorModel::as_returning())
            .get_result(self.conn)?;
        Ok(updated.into())
    }

    fn find_book_by_isbn(&mut self, isbn: &str) -> AppResult<Option<Book>> {
        let model = books::table
            .filter(books::isbn.eq(isbn))
            .select(BookModel::as_select())
            .first(self.conn)
            .optional()?;
        Ok(model.map(Book::from))
    }

    fn insert_book(&mut self, book: &Book) -> AppResult<Book> {
        let model = diesel::insert_into(books::table)
            .values(BookModel::from(book))
            .returning(BookModel::as_returning())
            .get_result(self.conn)?;
        Ok(model.into())
    }

    fn update_book(&mut self, book: &Book) -> AppResult<Book> {
        let model = BookModel::from(book);
        let updated = diesel::update(books::table.find(book.id))
            .set(&model)
            .returning(BookModel::as_returning())
            .get_result(self.conn)?;
        Ok(updated.into())
    }
}

pub struct CatalogRepositoryImpl {
    db: Arc<Database>,
}

impl CatalogRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn upsert_entry(
        &self,
        author_info: AuthorInfo,
        book_info: BookInfo,
    ) -> AppResult<CatalogUpsert> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<CatalogUpsert> {
            let mut conn = db.get_connection()?;
            let start = std::time::Instant::now();

            let mut store = PgCatalogStore { conn: &mut *conn };
            let result = upsert_catalog_entry(&mut store, &author_info, &book_info)?;

            LogContext::db_operation(
                "upsert",
                "authors+books",
                Some(start.elapsed().as_millis() as u64),
            );
            Ok(result)
        })
        .await?
    }
}
