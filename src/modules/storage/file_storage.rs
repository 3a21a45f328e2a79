use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Byte storage addressed by a path prefix such as `media/cover`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist `bytes` under `path_prefix` and return a retrievable reference (URL)
    async fn store(
        &self,
        path_prefix: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> AppResult<String>;

    /// Remove a reference previously returned by `store`.
    ///
    /// Returns false when the reference is not ours or is already gone.
    async fn delete(&self, reference: &str) -> AppResult<bool>;

    /// True when `value` points into this storage
    fn is_stored_reference(&self, value: &str) -> bool;
}

/// `cover.jpg` -> `cover_1a2b3c4d.jpg`
///
/// Falls back to an extension derived from `content_type` when the name has none.
pub fn unique_file_name(file_name: &str, content_type: Option<&str>) -> String {
    let suffix = &Uuid::new_v4().simple().to_string()[..8];
    let file_name = file_name.rsplit('/').next().unwrap_or(file_name);
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext.to_string())),
        _ => (file_name, None),
    };
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "file".to_string() } else { stem };

    match ext.or_else(|| content_type.and_then(extension_for).map(str::to_string)) {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_ascii_lowercase()),
        None => format!("{}_{}", stem, suffix),
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    match mime {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}
