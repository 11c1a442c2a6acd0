//! Flat search index projection.

use crate::traits::ContentProvider;
use crate::types::{ContentItem, Result, SearchRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

/// Characters removed from bodies when deriving plain text.
///
/// This is a character filter, not a markup parser: literal parentheses or
/// asterisks in prose are removed too.
pub const MARKUP_CHARS: [char; 7] = ['#', '*', '`', '[', ']', '(', ')'];

pub fn plain_text(body: &str) -> String {
    body.chars()
        .filter(|c| !MARKUP_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-15T00:00:00.000Z`.
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Projects every non-draft item into a [`SearchRecord`], newest first.
///
/// Accepts the full content set; ordering is computed here and does not rely
/// on the input already being sorted.
pub fn build_index(items: &[ContentItem]) -> Vec<SearchRecord> {
    let mut published: Vec<&ContentItem> = items.iter().filter(|item| !item.draft).collect();
    published.sort_by(|a, b| b.date.cmp(&a.date));

    let records: Vec<SearchRecord> = published.into_iter().map(to_record).collect();
    debug!("Built {} search records from {} items", records.len(), items.len());
    records
}

fn to_record(item: &ContentItem) -> SearchRecord {
    SearchRecord {
        title: item.title.clone(),
        content: plain_text(&item.body),
        tags: item.tags.clone(),
        category: item.category.clone(),
        slug: item.slug.clone(),
        date: iso_timestamp(&item.date),
        description: item.description.clone(),
    }
}

/// Loads the current content set and builds the index from it.
///
/// Any provider failure fails the whole build; no partial index is returned.
pub async fn generate_search_index(provider: &dyn ContentProvider) -> Result<Vec<SearchRecord>> {
    let items = provider.load().await?;
    let records = build_index(&items);
    info!("Generated search index with {} records from {}", records.len(), provider.source_name());
    Ok(records)
}
