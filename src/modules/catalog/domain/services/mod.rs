pub mod catalog_upsert;

pub use catalog_upsert::{upsert_catalog_entry, CatalogStore, CatalogUpsert};
