pub mod directory;
pub mod http;
pub mod memory;

pub use directory::DirectorySource;
pub use http::HttpSource;
pub use memory::StaticSource;

use crate::types::{ContentItem, IndexError, RawContentItem, Result};
use std::collections::HashSet;

/// Validates raw items, failing on the first invalid one.
///
/// Each entry carries a name (file path, payload index) used in the error.
pub(crate) fn validate_all<I>(raw_items: I) -> Result<Vec<ContentItem>>
where
    I: IntoIterator<Item = (String, RawContentItem)>,
{
    let items = raw_items
        .into_iter()
        .map(|(source_name, raw)| {
            ContentItem::try_from(raw).map_err(|error| IndexError::Validation { source_name, error })
        })
        .collect::<Result<Vec<_>>>()?;

    ensure_unique_slugs(&items)?;
    Ok(items)
}

pub(crate) fn ensure_unique_slugs(items: &[ContentItem]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.slug.as_str()) {
            return Err(IndexError::Provider(format!("duplicate slug: {}", item.slug)));
        }
    }
    Ok(())
}
