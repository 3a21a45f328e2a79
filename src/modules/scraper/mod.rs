/// Bookstore page scraping
pub mod aladin;
pub mod parser;

use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use async_trait::async_trait;

pub use aladin::{AladinScraper, ALADIN_BASE_URL};
pub use parser::AladinPageParser;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookScraper: Send + Sync {
    /// Fetch and parse one product page.
    ///
    /// Network and parse failures are logged and reported as `None`.
    async fn scrape(&self, url: &str) -> Option<(AuthorInfo, BookInfo)>;
}
