/// File storage for scraped images
///
/// `FileStorage` is the seam; `LocalFileStorage` writes to disk and hands back
/// public URLs. `ImageResolver` copies remote images in and falls back to the
/// source URL on any failure.
pub mod file_storage;
pub mod handlers;
pub mod image_resolver;
pub mod local_storage;

pub use file_storage::{unique_file_name, FileStorage};
pub use image_resolver::{ImageResolver, COVER_IMAGE_PREFIX, PUBLISHER_IMAGE_PREFIX};
pub use local_storage::LocalFileStorage;
