pub mod entities;
pub mod repositories;
pub mod services;

pub use entities::{Author, AuthorInfo, Book, BookDetails, BookInfo};
pub use repositories::{AuthorRepository, BookFilter, BookRepository, CatalogRepository};
pub use services::{upsert_catalog_entry, CatalogStore, CatalogUpsert};
