use super::author::Author;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for catalog ids of books ingested from the Aladin bookstore
pub const ALADIN_MANAGE_ID_PREFIX: &str = "ALADIN_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
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

/// Partial book record (scraper output, queue payload, update request body).
///
/// The scraper historically emits the cover under `_cover_image`; both spellings
/// are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInfo {
    pub book_manage_id: Option<String>,
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub page_count: Option<i32>,
    pub dimensions: Option<String>,
    pub weight: Option<f64>,
    #[serde(alias = "_cover_image")]
    pub cover_image: Option<String>,
    pub table_of_contents: Option<String>,
    pub introduction: Option<String>,
    pub publisher_image: Option<String>,
}

impl BookInfo {
    pub fn with_isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: Some(isbn.into()),
            ..Default::default()
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// ISBN with surrounding whitespace removed, if present and non-empty
    pub fn normalized_isbn(&self) -> Option<&str> {
        self.isbn
            .as_deref()
            .map(str::trim)
            .filter(|isbn| !isbn.is_empty())
    }
}

/// A book together with its owning author, as returned by the read API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl Book {
    /// Build a new book owned by `author_id` from the full incoming record.
    ///
    /// `isbn` and `title` are required. A missing `book_manage_id` falls back to
    /// the Aladin catalog id derived from the isbn.
    pub fn from_info(info: &BookInfo, author_id: Uuid) -> AppResult<Self> {
        let isbn = info
            .normalized_isbn()
            .ok_or_else(|| AppError::MissingField("book_info.isbn".to_string()))?
            .to_string();
        let title = non_blank(&info.title)
            .ok_or_else(|| AppError::MissingField("book_info.title".to_string()))?
            .to_string();
        let book_manage_id = non_blank(&info.book_manage_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", ALADIN_MANAGE_ID_PREFIX, isbn));

        Validator::validate_isbn(&isbn)?;
        Validator::validate_book_title(&title)?;
        Validator::validate_book_manage_id(&book_manage_id)?;

        let now = Utc::now();
        let mut book = Self {
            id: Uuid::new_v4(),
            book_manage_id,
            title,
            author_id,
            isbn,
            description: None,
            price: None,
            quantity: 0,
            page_count: None,
            dimensions: None,
            weight: None,
            cover_image: String::new(),
            table_of_contents: None,
            introduction: None,
            publisher_image: None,
            created: now,
            modified: now,
        };
        book.merge_optional_fields(info)?;
        Ok(book)
    }

    /// Overwrite every field that is present in `info` (present-and-non-null wins).
    pub fn apply_info(&mut self, info: &BookInfo) -> AppResult<()> {
        if let Some(isbn) = info.normalized_isbn() {
            Validator::validate_isbn(isbn)?;
            self.isbn = isbn.to_string();
        }
        if let Some(title) = non_blank(&info.title) {
            Validator::validate_book_title(title)?;
            self.title = title.to_string();
        }
        if let Some(book_manage_id) = non_blank(&info.book_manage_id) {
            Validator::validate_book_manage_id(book_manage_id)?;
            self.book_manage_id = book_manage_id.to_string();
        }
        self.merge_optional_fields(info)?;
        self.touch();
        Ok(())
    }

    fn merge_optional_fields(&mut self, info: &BookInfo) -> AppResult<()> {
        if let Some(description) = &info.description {
            self.description = Some(description.clone());
        }
        if let Some(price) = info.price {
            Validator::validate_price(price)?;
            self.price = Some(price);
        }
        if let Some(quantity) = info.quantity {
            Validator::validate_quantity(quantity)?;
            self.quantity = quantity;
        }
        if let Some(page_count) = info.page_count {
            self.page_count = Some(page_count);
        }
        if let Some(dimensions) = &info.dimensions {
            Validator::validate_dimensions(dimensions)?;
            self.dimensions = Some(dimensions.clone());
        }
        if let Some(weight) = info.weight {
            self.weight = Some(weight);
        }
        if let Some(cover_image) = &info.cover_image {
            self.cover_image = cover_image.clone();
        }
        if let Some(table_of_contents) = &info.table_of_contents {
            self.table_of_contents = Some(table_of_contents.clone());
        }
        if let Some(introduction) = &info.introduction {
            self.introduction = Some(introduction.clone());
        }
        if let Some(publisher_image) = &info.publisher_image {
            self.publisher_image = Some(publisher_image.clone());
        }
        Ok(())
    }

    pub fn assign_author(&mut self, author_id: Uuid) {
        if self.author_id != author_id {
            self.author_id = author_id;
            self.touch();
        }
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
