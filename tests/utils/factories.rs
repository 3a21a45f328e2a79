/// Test data factories using builder pattern
///
/// Provides queue payload halves with sensible defaults
use lms_lib::modules::catalog::{AuthorInfo, BookInfo};

pub struct AuthorInfoFactory {
    name: Option<String>,
    description: Option<String>,
}

impl AuthorInfoFactory {
    pub fn new() -> Self {
        Self {
            name: Some("Kim Yeon-su".to_string()),
            description: Some("Novelist".to_string()),
        }
    }

    pub fn named(name: &str) -> Self {
        Self::new().with_name(name)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    pub fn build(self) -> AuthorInfo {
        AuthorInfo {
            name: self.name,
            description: self.description,
        }
    }
}

pub struct BookInfoFactory {
    info: BookInfo,
}

impl BookInfoFactory {
    /// Full scraper-shaped record for `isbn`
    pub fn new(isbn: &str) -> Self {
        Self {
            info: BookInfo {
                book_manage_id: None,
                title: Some(format!("Book {}", isbn)),
                isbn: Some(isbn.to_string()),
                description: Some("A story".to_string()),
                price: Some(0.0),
                quantity: Some(0),
                page_count: Some(320),
                dimensions: Some("128*188*20mm".to_string()),
                weight: Some(350.0),
                cover_image: None,
                table_of_contents: None,
                introduction: None,
                publisher_image: None,
            },
        }
    }

    /// Record without an ISBN; never persisted
    pub fn without_isbn() -> Self {
        let mut factory = Self::new("0000000000");
        factory.info.isbn = None;
        factory
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.info.title = Some(title.to_string());
        self
    }

    pub fn without_title(mut self) -> Self {
        self.info.title = None;
        self
    }

    pub fn with_manage_id(mut self, book_manage_id: &str) -> Self {
        self.info.book_manage_id = Some(book_manage_id.to_string());
        self
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.info.description = description.map(str::to_string);
        self
    }

    pub fn with_cover(mut self, cover_image: &str) -> Self {
        self.info.cover_image = Some(cover_image.to_string());
        self
    }

    pub fn with_publisher_image(mut self, publisher_image: &str) -> Self {
        self.info.publisher_image = Some(publisher_image.to_string());
        self
    }

    pub fn build(self) -> BookInfo {
        self.info
    }
}
