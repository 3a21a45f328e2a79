use crate::modules::catalog::domain::entities::{AuthorInfo, BookInfo};
use crate::modules::catalog::domain::services::CatalogUpsert;
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One queued item: `{"author_info": {...}, "book_info": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedBookInfo {
    pub author_info: AuthorInfo,
    pub book_info: BookInfo,
}

impl QueuedBookInfo {
    pub fn new(author_info: AuthorInfo, book_info: BookInfo) -> Self {
        Self {
            author_info,
            book_info,
        }
    }

    pub fn to_payload(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a raw queue payload.
    ///
    /// Both `author_info` and `book_info` must be present JSON objects; anything
    /// else is rejected before it reaches the upsert.
    pub fn from_payload(raw: &str) -> AppResult<Self> {
        let value: JsonValue = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or_else(|| {
            AppError::SerializationError("Queue payload is not a JSON object".to_string())
        })?;

        // An empty section carries nothing to upsert and is treated as absent.
        for key in ["author_info", "book_info"] {
            match object.get(key) {
                Some(JsonValue::Object(section)) if !section.is_empty() => {}
                Some(JsonValue::Object(_)) | Some(JsonValue::Null) | None => {
                    return Err(AppError::MissingField(key.to_string()));
                }
                Some(_) => {
                    return Err(AppError::SerializationError(format!(
                        "{} must be a JSON object",
                        key
                    )));
                }
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn isbn(&self) -> Option<&str> {
        self.book_info.normalized_isbn()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingRequiredField,
    InvalidField,
    Persistence,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::MissingRequiredField => write!(f, "missing_required_field"),
            FailureKind::InvalidField => write!(f, "invalid_field"),
            FailureKind::Persistence => write!(f, "persistence"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertSummary {
    pub author_id: Uuid,
    pub author_name: String,
    pub book_id: Uuid,
    pub book_title: String,
    pub isbn: String,
    pub author_created: bool,
    pub book_created: bool,
}

impl From<&CatalogUpsert> for UpsertSummary {
    fn from(upsert: &CatalogUpsert) -> Self {
        Self {
            author_id: upsert.author.id,
            author_name: upsert.author.name.clone(),
            book_id: upsert.book.id,
            book_title: upsert.book.title.clone(),
            isbn: upsert.book.isbn.clone(),
            author_created: upsert.author_created,
            book_created: upsert.book_created,
        }
    }
}

/// Result of processing one queued item; the upsert never raises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpsertOutcome {
    Success(UpsertSummary),
    Failure { kind: FailureKind, reason: String },
}

impl UpsertOutcome {
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        UpsertOutcome::Failure {
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpsertOutcome::Success(_))
    }
}

/// Counters for one drain pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    /// Items taken off the queue
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Malformed payloads that never reached the upsert
    pub skipped: usize,
}

impl DrainReport {
    pub fn is_empty(&self) -> bool {
        self.processed == 0
    }

    pub fn absorb(&mut self, other: &DrainReport) {
        self.processed += other.processed;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_wire_keys() {
        let item = QueuedBookInfo::new(
            AuthorInfo::named("Kim"),
            BookInfo::with_isbn("123").titled("T1"),
        );
        let raw = item.to_payload().unwrap();
        let value: JsonValue = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["author_info"]["name"], "Kim");
        assert_eq!(value["book_info"]["isbn"], "123");
        assert_eq!(QueuedBookInfo::from_payload(&raw).unwrap(), item);
    }

    #[test]
    fn rejects_missing_or_null_sections() {
        let missing = QueuedBookInfo::from_payload(r#"{"author_info": {"name": "Kim"}}"#);
        assert!(matches!(missing, Err(AppError::MissingField(key)) if key == "book_info"));

        let null = QueuedBookInfo::from_payload(r#"{"author_info": null, "book_info": {}}"#);
        assert!(matches!(null, Err(AppError::MissingField(key)) if key == "author_info"));

        let wrong_type = QueuedBookInfo::from_payload(r#"{"author_info": "Kim", "book_info": {}}"#);
        assert!(matches!(wrong_type, Err(AppError::SerializationError(_))));
    }

    #[test]
    fn rejects_empty_sections() {
        let both = QueuedBookInfo::from_payload(r#"{"author_info": {}, "book_info": {}}"#);
        assert!(matches!(both, Err(AppError::MissingField(key)) if key == "author_info"));

        let book = QueuedBookInfo::from_payload(
            r#"{"author_info": {"name": "Kim"}, "book_info": {}}"#,
        );
        assert!(matches!(book, Err(AppError::MissingField(key)) if key == "book_info"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            QueuedBookInfo::from_payload("not json"),
            Err(AppError::SerializationError(_))
        ));
        assert!(matches!(
            QueuedBookInfo::from_payload("[1, 2]"),
            Err(AppError::SerializationError(_))
        ));
    }

    #[test]
    fn accepts_scraper_cover_key() {
        let item = QueuedBookInfo::from_payload(
            r#"{"author_info": {"name": "Kim", "description": null},
                "book_info": {"isbn": "123", "_cover_image": "https://image.aladin.co.kr/a.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(
            item.book_info.cover_image.as_deref(),
            Some("https://image.aladin.co.kr/a.jpg")
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = UpsertOutcome::failure(FailureKind::MissingRequiredField, "book_info.isbn");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "failure");
        assert_eq!(value["kind"], "missing_required_field");
    }
}
