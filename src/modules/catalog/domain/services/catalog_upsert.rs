/// Author/book upsert used by the ingestion pipeline
///
/// The algorithm is written once against `CatalogStore`, a synchronous view of
/// the catalog tables. Every write happens inside `CatalogStore::atomically`, so a
/// failure part-way leaves the store as it was.
use crate::modules::catalog::domain::entities::{Author, AuthorInfo, Book, BookInfo};
use crate::shared::errors::{AppError, AppResult};
use crate::log_debug;
use serde::Serialize;

/// Row-level operations the upsert needs. Lookups return `None` when absent.
pub trait CatalogStore {
    /// Run `f` so that either all of its writes persist or none do.
    fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> AppResult<T>) -> AppResult<T>;

    fn find_author_by_name(&mut self, name: &str) -> AppResult<Option<Author>>;
    fn insert_author(&mut self, author: &Author) -> AppResult<Author>;
    fn update_author(&mut self, author: &Author) -> AppResult<Author>;
    fn find_book_by_isbn(&mut self, isbn: &str) -> AppResult<Option<Book>>;
    fn insert_book(&mut self, book: &Book) -> AppResult<Book>;
    fn update_book(&mut self, book: &Book) -> AppResult<Book>;
}

/// Rows written by one upsert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogUpsert {
    pub author: Author,
    pub book: Book,
    pub author_created: bool,
    pub book_created: bool,
}

/// Resolve-or-create the author by exact name, then resolve-or-create the book by
/// exact isbn and link it to that author.
///
/// Present fields overwrite stored ones; absent or null fields never do. Both
/// `author_info.name` and `book_info.isbn` are checked before anything is
/// written.
pub fn upsert_catalog_entry<S: CatalogStore>(
    store: &mut S,
    author_info: &AuthorInfo,
    book_info: &BookInfo,
) -> AppResult<CatalogUpsert> {
    let author_name = author_info
        .present_name()
        .ok_or_else(|| AppError::MissingField("author_info.name".to_string()))?;
    let isbn = book_info
        .normalized_isbn()
        .ok_or_else(|| AppError::MissingField("book_info.isbn".to_string()))?;

    store.atomically(|store| write_entry(store, author_name, isbn, author_info, book_info))
}

fn write_entry<S: CatalogStore>(
    store: &mut S,
    author_name: &str,
    isbn: &str,
    author_info: &AuthorInfo,
    book_info: &BookInfo,
) -> AppResult<CatalogUpsert> {
    let (author, author_created) = match store.find_author_by_name(author_name)? {
        Some(mut existing) => {
            existing.apply_info(author_info)?;
            (store.update_author(&existing)?, false)
        }
        None => {
            let author = Author::from_info(author_info)?;
            log_debug!("Creating author '{}'", author.name);
            (store.insert_author(&author)?, true)
        }
    };

    let (book, book_created) = match store.find_book_by_isbn(isbn)? {
        Some(mut existing) => {
            existing.apply_info(book_info)?;
            existing.assign_author(author.id);
            (store.update_book(&existing)?, false)
        }
        None => {
            let book = Book::from_info(book_info, author.id)?;
            log_debug!("Creating book '{}' (isbn {})", book.title, book.isbn);
            (store.insert_book(&book)?, true)
        }
    };

    Ok(CatalogUpsert {
        author,
        book,
        author_created,
        book_created,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// Store backed by plain maps; `fail_book_writes` simulates a DB failure
    #[derive(Default, Clone)]
    pub(crate) struct InMemoryCatalog {
        pub authors: HashMap<Uuid, Author>,
        pub books: HashMap<Uuid, Book>,
        pub fail_book_writes: bool,
    }

    impl CatalogStore for InMemoryCatalog {
        fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> AppResult<T>) -> AppResult<T> {
            let snapshot = (self.authors.clone(), self.books.clone());
            let result = f(self);
            if result.is_err() {
                (self.authors, self.books) = snapshot;
            }
            result
        }

        fn find_author_by_name(&mut self, name: &str) -> AppResult<Option<Author>> {
            Ok(self.authors.values().find(|a| a.name == name).cloned())
        }

        fn insert_author(&mut self, author: &Author) -> AppResult<Author> {
            self.authors.insert(author.id, author.clone());
            Ok(author.clone())
        }

        fn update_author(&mut self, author: &Author) -> AppResult<Author> {
            self.insert_author(author)
        }

        fn find_book_by_isbn(&mut self, isbn: &str) -> AppResult<Option<Book>> {
            Ok(self.books.values().find(|b| b.isbn == isbn).cloned())
        }

        fn insert_book(&mut self, book: &Book) -> AppResult<Book> {
            if self.fail_book_writes {
                return Err(AppError::DatabaseError("connection reset".to_string()));
            }
            self.books.insert(book.id, book.clone());
            Ok(book.clone())
        }

        fn update_book(&mut self, book: &Book) -> AppResult<Book> {
            self.insert_book(book)
        }
    }

    fn kim() -> AuthorInfo {
        AuthorInfo::named("Kim")
    }

    fn t1() -> BookInfo {
        BookInfo::with_isbn("123").titled("T1")
    }

    #[test]
    fn creates_author_and_book() {
        let mut store = InMemoryCatalog::default();
        let result = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();

        assert!(result.author_created);
        assert!(result.book_created);
        assert_eq!(result.book.author_id, result.author.id);
        assert_eq!(result.book.book_manage_id, "ALADIN_123");
        assert_eq!(store.authors.len(), 1);
        assert_eq!(store.books.len(), 1);
    }

    #[test]
    fn repeated_upsert_is_idempotent() {
        let mut store = InMemoryCatalog::default();
        let first = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();
        let second = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();

        assert_eq!(store.authors.len(), 1);
        assert_eq!(store.books.len(), 1);
        assert!(!second.author_created);
        assert!(!second.book_created);
        assert_eq!(first.author.id, second.author.id);
        assert_eq!(first.book.id, second.book.id);
        assert_eq!(first.book.title, second.book.title);
        assert_eq!(first.book.created, second.book.created);
    }

    #[test]
    fn null_description_keeps_stored_value() {
        let mut store = InMemoryCatalog::default();
        upsert_catalog_entry(&mut store, &AuthorInfo::named("A").with_description("old"), &t1())
            .unwrap();

        let incoming = AuthorInfo {
            name: Some("A".to_string()),
            description: None,
        };
        let result = upsert_catalog_entry(&mut store, &incoming, &t1()).unwrap();

        assert_eq!(result.author.description.as_deref(), Some("old"));
    }

    #[test]
    fn isbn_match_updates_in_place() {
        let mut store = InMemoryCatalog::default();
        let first = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();

        let mut changed = t1();
        changed.book_manage_id = Some("MANUAL_0001".to_string());
        changed.title = Some("T1 (2nd edition)".to_string());
        let second = upsert_catalog_entry(&mut store, &kim(), &changed).unwrap();

        assert_eq!(store.books.len(), 1);
        assert_eq!(second.book.id, first.book.id);
        assert_eq!(second.book.book_manage_id, "MANUAL_0001");
        assert_eq!(second.book.title, "T1 (2nd edition)");
    }

    #[test]
    fn missing_isbn_writes_nothing() {
        let mut store = InMemoryCatalog::default();
        let no_isbn = BookInfo::default().titled("T1");

        let err = upsert_catalog_entry(&mut store, &kim(), &no_isbn).unwrap_err();

        assert!(matches!(err, AppError::MissingField(field) if field == "book_info.isbn"));
        assert!(store.authors.is_empty());
        assert!(store.books.is_empty());
    }

    #[test]
    fn relinks_book_to_new_author() {
        let mut store = InMemoryCatalog::default();
        let first = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();

        let second =
            upsert_catalog_entry(&mut store, &AuthorInfo::named("Lee"), &BookInfo::with_isbn("123"))
                .unwrap();

        assert_ne!(first.author.id, second.author.id);
        assert_eq!(second.book.id, first.book.id);
        assert_eq!(store.books[&first.book.id].author_id, second.author.id);
        assert_eq!(store.authors.len(), 2);
    }

    #[test]
    fn new_book_without_title_is_rejected() {
        let mut store = InMemoryCatalog::default();
        let err = upsert_catalog_entry(&mut store, &kim(), &BookInfo::with_isbn("999")).unwrap_err();
        assert!(matches!(err, AppError::MissingField(field) if field == "book_info.title"));
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = InMemoryCatalog {
            fail_book_writes: true,
            ..Default::default()
        };
        let err = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn failed_book_write_rolls_back_new_author() {
        let mut store = InMemoryCatalog {
            fail_book_writes: true,
            ..Default::default()
        };

        upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap_err();

        assert!(store.authors.is_empty());
        assert!(store.books.is_empty());
    }

    #[test]
    fn failed_book_write_rolls_back_author_update() {
        let mut store = InMemoryCatalog::default();
        let first =
            upsert_catalog_entry(&mut store, &kim().with_description("old"), &t1()).unwrap();

        store.fail_book_writes = true;
        upsert_catalog_entry(&mut store, &kim().with_description("new"), &t1()).unwrap_err();

        assert_eq!(store.authors.len(), 1);
        assert_eq!(
            store.authors[&first.author.id].description.as_deref(),
            Some("old")
        );
        assert_eq!(store.books[&first.book.id].author_id, first.author.id);
    }

    #[test]
    fn author_names_match_exactly() {
        let mut store = InMemoryCatalog::default();
        let plain = upsert_catalog_entry(&mut store, &kim(), &t1()).unwrap();
        let padded = upsert_catalog_entry(
            &mut store,
            &AuthorInfo::named("  Kim  "),
            &BookInfo::with_isbn("456").titled("T2"),
        )
        .unwrap();

        assert!(padded.author_created);
        assert_ne!(plain.author.id, padded.author.id);
        assert_eq!(padded.author.name, "  Kim  ");
        assert_eq!(store.authors.len(), 2);
    }
}
