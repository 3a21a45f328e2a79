pub mod catalog;
pub mod ingestion;
pub mod scraper;
pub mod storage;
