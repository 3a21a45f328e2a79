pub mod author_repository_impl;
pub mod book_repository_impl;
pub mod catalog_repository_impl;

pub use author_repository_impl::AuthorRepositoryImpl;
pub use book_repository_impl::BookRepositoryImpl;
pub use catalog_repository_impl::CatalogRepositoryImpl;
