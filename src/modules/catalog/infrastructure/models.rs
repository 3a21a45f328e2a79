use crate::modules::catalog::domain::entities::{Author, Book};
use crate::schema::{authors, books};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

// ================== AUTHOR MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = authors)]
#[diesel(treat_none_as_null = true)]
pub struct AuthorModel {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl From<AuthorModel> for Author {
    fn from(model: AuthorModel) -> Self {
        Author {
            id: model.id,
            name: model.name,
            description: model.description,
            created: model.created,
            modified: model.modified,
        }
    }
}

impl From<&Author> for AuthorModel {
    fn from(author: &Author) -> Self {
        AuthorModel {
            id: author.id,
            name: author.name.clone(),
            description: author.description.clone(),
            created: author.created,
            modified: author.modified,
        }
    }
}

// ================== BOOK MODELS ==================

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub struct BookModel {
    pub id: Uuid,
    pub book_manage_id: String,
    pub title: String,
    pub author_id: Uuid,
    pub isbn: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: i32,
    pub page_count: Option<i32>,
    pub dimensions: Option<String>,
    pub weight: Option<f64>,
    pub cover_image: String,
    pub table_of_contents: Option<String>,
    pub introduction: Option<String>,
    pub publisher_image: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl From<BookModel> for Book {
    fn from(model: BookModel) -> Self {
        Book {
            id: model.id,
            book_manage_id: model.book_manage_id,
            title: model.title,
            author_id: model.author_id,
            isbn: model.isbn,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
            page_count: model.page_count,
            dimensions: model.dimensions,
            weight: model.weight,
            cover_image: model.cover_image,
            table_of_contents: model.table_of_contents,
            introduction: model.introduction,
            publisher_image: model.publisher_image,
            created: model.created,
            modified: model.modified,
        }
    }
}

impl From<&Book> for BookModel {
    fn from(book: &Book) -> Self {
        BookModel {
            id: book.id,
            book_manage_id: book.book_manage_id.clone(),
            title: book.title.clone(),
            author_id: book.author_id,
            isbn: book.isbn.clone(),
            description: book.description.clone(),
            price: book.price,
            quantity: book.quantity,
            page_count: book.page_count,
            dimensions: book.dimensions.clone(),
            weight: book.weight,
            cover_image: book.cover_image.clone(),
            table_of_contents: book.table_of_contents.clone(),
            introduction: book.introduction.clone(),
            publisher_image: book.publisher_image.clone(),
            created: book.created,
            modified: book.modified,
        }
    }
}
