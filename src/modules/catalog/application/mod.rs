pub mod author_service;
pub mod book_service;

pub use author_service::{AuthorService, CreateAuthorRequest};
pub use book_service::{BookService, CreateBookRequest, UpdateBookRequest};
