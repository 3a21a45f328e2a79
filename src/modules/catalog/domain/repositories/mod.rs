pub mod author_repository;
pub mod book_repository;
pub mod catalog_repository;

pub use author_repository::AuthorRepository;
pub use book_repository::{BookFilter, BookRepository};
pub use catalog_repository::CatalogRepository;
