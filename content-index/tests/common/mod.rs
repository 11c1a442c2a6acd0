#![allow(dead_code)]

// Shared fixtures for the content-index integration tests
pub use content_index::{ContentItem, ContentProvider, IndexError, SiteConfig, StaticSource};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Midnight UTC, `offset` days after 2024-01-01.
pub fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(offset)
}

pub fn article(slug: &str, offset: i64) -> ContentItem {
    ContentItem::new(slug, format!("Article {}", slug), day(offset))
}

pub fn site() -> SiteConfig {
    SiteConfig::default()
        .with_site_url("https://blog.example.com/")
        .unwrap()
}

/// Writes a Markdown file with the given front matter under `root`.
pub fn write_article(root: &Path, relative: &str, front_matter: &str, body: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("+++\n{}\n+++\n{}", front_matter.trim(), body)).unwrap();
}

/// Provider whose load always fails, standing in for a broken store.
pub struct FailingSource;

#[async_trait]
impl ContentProvider for FailingSource {
    fn source_name(&self) -> String {
        "failing".to_string()
    }

    async fn load(&self) -> content_index::Result<Vec<ContentItem>> {
        Err(IndexError::Provider("store unavailable".to_string()))
    }
}
