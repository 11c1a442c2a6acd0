use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One authored article, materialized once per build.
///
/// Items are only ever constructed through [`RawContentItem`] validation (or the
/// builder methods below), so every required field is present and optional
/// strings are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContentItem")]
pub struct ContentItem {
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
    pub draft: bool,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub body: String,
}

impl ContentItem {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            date,
            updated: None,
            draft: false,
            description: None,
            tags: Vec::new(),
            category: None,
            author: None,
            body: String::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Timestamp used for feed "updated" fields.
    pub fn updated_or_date(&self) -> DateTime<Utc> {
        self.updated.unwrap_or(self.date)
    }

    /// Tags with duplicates removed, first occurrence wins.
    pub fn unique_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Unvalidated item as read from front matter or a JSON payload.
///
/// Dates are kept as text here; they are parsed during conversion so every
/// source shares the same accepted formats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContentItem {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl TryFrom<RawContentItem> for ContentItem {
    type Error = ValidationError;

    fn try_from(raw: RawContentItem) -> Result<Self, Self::Error> {
        let slug = validate_slug(raw.slug)?;

        if raw.title.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }

        let date = match raw.date.as_deref() {
            Some(value) => parse_content_date("date", value)?,
            None => return Err(ValidationError::MissingField { field: "date" }),
        };
        let updated = raw
            .updated
            .as_deref()
            .map(|value| parse_content_date("updated", value))
            .transpose()?;

        let tags = raw
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Self {
            slug,
            title: raw.title,
            date,
            updated,
            draft: raw.draft,
            description: non_blank(raw.description),
            tags,
            category: non_blank(raw.category),
            author: non_blank(raw.author),
            body: raw.body,
        })
    }
}

impl From<ContentItem> for RawContentItem {
    fn from(item: ContentItem) -> Self {
        Self {
            slug: item.slug,
            title: item.title,
            date: Some(item.date.to_rfc3339()),
            updated: item.updated.map(|d| d.to_rfc3339()),
            draft: item.draft,
            description: item.description,
            tags: item.tags,
            category: item.category,
            author: item.author,
            body: item.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid slug {slug:?}: {reason}")]
    InvalidSlug { slug: String, reason: &'static str },

    #[error("invalid `{field}` timestamp: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Parses an authored timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T09:30:00+09:00`), a naive date-time
/// (`2024-01-15T09:30:00`, read as UTC) or a bare date (`2024-01-15`, midnight UTC).
pub fn parse_content_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn validate_slug(slug: String) -> Result<String, ValidationError> {
    let slug = slug.trim().trim_matches('/').to_string();
    if slug.is_empty() {
        return Err(ValidationError::MissingField { field: "slug" });
    }
    if slug.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidSlug {
            slug,
            reason: "contains whitespace",
        });
    }
    if slug.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(ValidationError::InvalidSlug {
            slug,
            reason: "contains an empty or relative path segment",
        });
    }
    Ok(slug)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
