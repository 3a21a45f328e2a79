use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::modules::catalog::domain::{entities::Author, repositories::AuthorRepository};
use crate::modules::catalog::infrastructure::models::AuthorModel;
use crate::schema::authors;
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::shared::Database;
use crate::log_debug;

pub struct AuthorRepositoryImpl {
    db: Arc<Database>,
}

impl AuthorRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn filtered(name: Option<&str>) -> authors::BoxedQuery<'static, diesel::pg::Pg> {
        let mut query = authors::table.into_boxed();
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            query = query.filter(authors::name.ilike(format!("%{}%", name)));
        }
        query
    }
}

#[async_trait]
impl AuthorRepository for AuthorRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let db = Arc::clone(&self.db);
        let model = task::spawn_blocking(move || -> AppResult<Option<AuthorModel>> {
            let mut conn = db.get_connection()?;
            let m = authors::table
                .find(id)
                .select(AuthorModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(Author::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let db = Arc::clone(&self.db);
        let name = name.to_string();
        let model = task::spawn_blocking(move || -> AppResult<Option<AuthorModel>> {
            let mut conn = db.get_connection()?;
            let m = authors::table
                .filter(authors::name.eq(&name))
                .order(authors::created.asc())
                .select(AuthorModel::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(m)
        })
        .await??;

        Ok(model.map(Author::from))
    }

    async fn list(
        &self,
        name: Option<String>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Author>> {
        let db = Arc::clone(&self.db);
        let timer = TimedOperation::new("list_authors");

        let (models, total) = task::spawn_blocking(move || -> AppResult<(Vec<AuthorModel>, i64)> {
            let mut conn = db.get_connection()?;
            let total: i64 = Self::filtered(name.as_deref())
                .count()
                .get_result(&mut conn)?;
            let models = Self::filtered(name.as_deref())
                .order(authors::created.desc())
                .offset(pagination.offset())
                .limit(pagination.limit())
                .select(AuthorModel::as_select())
                .load(&mut conn)?;
            Ok((models, total))
        })
        .await??;

        timer.finish_with_info(&format!("{} of {} authors", models.len(), total));

        Ok(PaginatedResult::new(
            models.into_iter().map(Author::from).collect(),
            total.max(0) as u64,
            &pagination,
        ))
    }

    async fn save(&self, author: &Author) -> AppResult<Author> {
        let db = Arc::clone(&self.db);
        let model = AuthorModel::from(author);
        let saved = task::spawn_blocking(move || -> AppResult<AuthorModel> {
            let mut conn = db.get_connection()?;
            let m = diesel::insert_into(authors::table)
                .values(&model)
                .returning(AuthorModel::as_returning())
                .get_result(&mut conn)?;
            Ok(m)
        })
        .await??;

        log_debug!("Saved author {} ({})", saved.name, saved.id);
        Ok(saved.into())
    }

    async fn update(&self, author: &Author) -> AppResult<Author> {
        let db = Arc::clone(&self.db);
        let model = AuthorModel::from(author);
        let updated = task::spawn_blocking(move || -> AppResult<AuthorModel> {
            let mut conn = db.get_connection()?;
            let m = diesel::update(authors::table.find(model.id))
                .set(&model)
                .returning(AuthorModel::as_returning())
                .get_result(&mut conn)?;
            Ok(m)
        })
        .await??;

        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> AppResult<bool> {
            let mut conn = db.get_connection()?;
            let deleted = diesel::delete(authors::table.find(id))
                .execute(&mut conn)
                .map_err(|e| match AppError::from(e) {
                    AppError::Conflict(_) => AppError::Conflict(format!(
                        "Author {} still has books and cannot be deleted",
                        id
                    )),
                    other => other,
                })?;
            Ok(deleted > 0)
        })
        .await?
    }
}
