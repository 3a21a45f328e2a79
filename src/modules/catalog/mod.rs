/// Catalog module: authors and books
///
/// Architecture:
/// - Domain: entities, repository traits and the ingestion upsert
/// - Application: CRUD services used by the HTTP layer
/// - Infrastructure: Diesel models and repository implementations
pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::{AuthorService, BookService};
pub use domain::{
    entities::{Author, AuthorInfo, Book, BookDetails, BookInfo},
    repositories::{AuthorRepository, BookRepository, CatalogRepository},
    services::CatalogUpsert,
};
pub use infrastructure::{AuthorRepositoryImpl, BookRepositoryImpl, CatalogRepositoryImpl};
