use serde::{Deserialize, Serialize};

pub use interfaces::defs::{ContentItem, RawContentItem, ValidationError};

/// Flattened, serializable projection of a published item for client-side search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub slug: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A candidate with its relatedness score, only alive inside one scoring pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub item: &'a ContentItem,
    pub score: u32,
}

/// Deduplicated, sorted tag and category lists over published items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content provider error: {0}")]
    Provider(String),

    #[error("Front matter error in {path}: {message}")]
    FrontMatter { path: String, message: String },

    #[error("Invalid content item {source_name}: {error}")]
    Validation {
        source_name: String,
        error: ValidationError,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
