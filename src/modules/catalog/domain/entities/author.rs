use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Partial author record as produced by the scraper or sent by clients.
///
/// Every field is optional; `None` (absent or JSON `null`) never overwrites
/// a stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl AuthorInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name exactly as sent, if present and not blank.
    ///
    /// Author matching is an exact comparison, so the value is not trimmed.
    pub fn present_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

impl Author {
    pub fn new(name: String, description: Option<String>) -> AppResult<Self> {
        Validator::validate_author_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description,
            created: now,
            modified: now,
        })
    }

    /// Build a brand-new author from the full incoming record
    pub fn from_info(info: &AuthorInfo) -> AppResult<Self> {
        let name = info
            .present_name()
            .ok_or_else(|| AppError::MissingField("author_info.name".to_string()))?;

        Self::new(name.to_string(), info.description.clone())
    }

    /// Overwrite every field that is present in `info`.
    ///
    /// Only `name` and `description` are mergeable; `id` and `created` never change.
    pub fn apply_info(&mut self, info: &AuthorInfo) -> AppResult<()> {
        if let Some(name) = info.present_name() {
            Validator::validate_author_name(name)?;
            self.name = name.to_string();
        }
        if let Some(description) = &info.description {
            self.description = Some(description.clone());
        }
        self.touch();
        Ok(())
    }

    pub fn rename(&mut self, name: String) -> AppResult<()> {
        Validator::validate_author_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
