use super::file_storage::FileStorage;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::{log_debug, log_warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const COVER_IMAGE_PREFIX: &str = "media/cover";
pub const PUBLISHER_IMAGE_PREFIX: &str = "media/publisher";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest image body we copy; anything bigger keeps its source URL
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Copies remote images into our storage.
///
/// Resolution never fails: when the download or the store step fails, or the
/// body exceeds the size limit, the original URL is returned unchanged.
pub struct ImageResolver {
    http: reqwest::Client,
    storage: Arc<dyn FileStorage>,
    max_bytes: usize,
}

impl ImageResolver {
    pub fn new(storage: Arc<dyn FileStorage>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            storage,
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Stored reference for `value`, or `value` itself when it is not a remote
    /// URL, already ours, or could not be copied.
    pub async fn resolve(&self, value: &str, path_prefix: &str) -> String {
        let is_remote = value.starts_with("http://") || value.starts_with("https://");
        if !is_remote || self.storage.is_stored_reference(value) {
            return value.to_string();
        }

        match self.copy_to_storage(value, path_prefix).await {
            Ok(reference) => reference,
            Err(e) => {
                log_warn!("Keeping original image URL {}: {}", value, e);
                value.to_string()
            }
        }
    }

    async fn copy_to_storage(&self, url: &str, path_prefix: &str) -> AppResult<String> {
        let start = Instant::now();
        LogContext::http_fetch("image", url, "started", None);

        let mut response = self.http.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(self.too_large(length));
            }
        }
        // Content-Length may be absent or wrong, so the streamed total is checked too.
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large((bytes.len() + chunk.len()) as u64));
            }
            bytes.extend_from_slice(&chunk);
        }

        LogContext::http_fetch(
            "image",
            url,
            "ok",
            Some(start.elapsed().as_millis() as u64),
        );

        let file_name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or("image");

        let reference = self
            .storage
            .store(path_prefix, file_name, bytes, content_type)
            .await?;
        log_debug!("Copied {} to {}", url, reference);
        Ok(reference)
    }

    fn too_large(&self, size: u64) -> AppError {
        AppError::ExternalServiceError(format!(
            "Image body of at least {} bytes exceeds the {} byte limit",
            size, self.max_bytes
        ))
    }
}
