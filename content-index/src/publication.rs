//! Draft filtering, recency ordering and taxonomy listings.

use crate::types::{ContentItem, Taxonomy};
use std::collections::BTreeSet;
use tracing::debug;

/// Drops drafts and orders the rest newest first.
///
/// Stable sort by descending date: items sharing a date keep their input order.
/// The input slice is left untouched.
pub fn publish(items: &[ContentItem]) -> Vec<ContentItem> {
    let mut published: Vec<ContentItem> = items.iter().filter(|item| !item.draft).cloned().collect();
    published.sort_by(|a, b| b.date.cmp(&a.date));

    debug!(
        "Published {} of {} items ({} drafts)",
        published.len(),
        items.len(),
        items.len() - published.len()
    );
    published
}

/// Published items carrying `tag`, newest first.
pub fn by_tag(items: &[ContentItem], tag: &str) -> Vec<ContentItem> {
    publish(items).into_iter().filter(|item| item.has_tag(tag)).collect()
}

/// Published items in `category`, newest first.
pub fn by_category(items: &[ContentItem], category: &str) -> Vec<ContentItem> {
    publish(items)
        .into_iter()
        .filter(|item| item.category.as_deref() == Some(category))
        .collect()
}

/// Every distinct tag, ascending.
pub fn all_tags(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every distinct category, ascending.
pub fn all_categories(items: &[ContentItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn taxonomy(published: &[ContentItem]) -> Taxonomy {
    Taxonomy {
        tags: all_tags(published),
        categories: all_categories(published),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(slug: &str, day: u32) -> ContentItem {
        ContentItem::new(slug, slug.to_uppercase(), Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_publish_filters_and_sorts() {
        let items = vec![
            item("old", 1),
            item("draft", 20).with_draft(true),
            item("new", 10),
            item("mid", 5),
        ];

        let slugs: Vec<_> = publish(&items).into_iter().map(|i| i.slug).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_publish_is_stable_for_equal_dates() {
        let items = vec![item("b", 3), item("a", 3), item("c", 3), item("z", 4)];
        let slugs: Vec<_> = publish(&items).into_iter().map(|i| i.slug).collect();
        assert_eq!(slugs, vec!["z", "b", "a", "c"]);
    }

    #[test]
    fn test_publish_empty() {
        assert!(publish(&[]).is_empty());
    }

    #[test]
    fn test_taxonomy_lists_are_sorted_and_unique() {
        let items = vec![
            item("a", 1).with_tags(["rust", "cli"]).with_category("dev"),
            item("b", 2).with_tags(["cli", "perf", "cli"]),
            item("c", 3).with_category("ops"),
            item("d", 4).with_category("dev"),
        ];

        assert_eq!(all_tags(&items), vec!["cli", "perf", "rust"]);
        assert_eq!(all_categories(&items), vec!["dev", "ops"]);
    }

    #[test]
    fn test_by_tag_and_category_skip_drafts() {
        let items = vec![
            item("a", 1).with_tags(["rust"]).with_category("dev"),
            item("b", 2).with_tags(["rust"]).with_category("dev").with_draft(true),
            item("c", 3).with_tags(["rust"]),
        ];

        let tagged: Vec<_> = by_tag(&items, "rust").into_iter().map(|i| i.slug).collect();
        assert_eq!(tagged, vec!["c", "a"]);

        let dev: Vec<_> = by_category(&items, "dev").into_iter().map(|i| i.slug).collect();
        assert_eq!(dev, vec!["a"]);
    }
}
