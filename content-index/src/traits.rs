use crate::types::{ContentItem, Result};
use async_trait::async_trait;

/// Source of the content set for one build.
///
/// Implementations own storage and rendering; the engine only sees validated
/// [`ContentItem`] snapshots.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Human-readable name for logs (a directory path, a URL, ...).
    fn source_name(&self) -> String;

    /// Load every item, drafts included.
    ///
    /// Must fail as a whole when any single item cannot be read or validated.
    async fn load(&self) -> Result<Vec<ContentItem>>;
}
