pub mod author;
pub mod book;

pub use author::{Author, AuthorInfo};
pub use book::{Book, BookDetails, BookInfo, ALADIN_MANAGE_ID_PREFIX};
