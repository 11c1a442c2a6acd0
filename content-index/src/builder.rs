use crate::config::SiteConfig;
use crate::feed::{to_atom_at, to_rss_at, FeedFormat};
use crate::publication::{publish, taxonomy};
use crate::related::related_map;
use crate::search_index::build_index;
use crate::traits::ContentProvider;
use crate::types::{ContentItem, Result, SearchRecord, Taxonomy};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const SEARCH_INDEX_FILE: &str = "search.json";
pub const RELATED_FILE: &str = "related.json";
pub const TAXONOMY_FILE: &str = "taxonomy.json";

/// Everything derived from one content snapshot.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub published: Vec<ContentItem>,
    pub search_index: Vec<SearchRecord>,
    pub atom: String,
    pub rss: String,
    pub related: BTreeMap<String, Vec<String>>,
    pub taxonomy: Taxonomy,
    pub built_at: DateTime<Utc>,
}

impl BuildOutput {
    /// Projects a loaded snapshot. Pure apart from the clock used for empty feeds.
    pub fn from_items(items: &[ContentItem], site: &SiteConfig, now: DateTime<Utc>) -> Self {
        let published = publish(items);

        Self {
            search_index: build_index(items),
            atom: to_atom_at(&published, site, now),
            rss: to_rss_at(&published, site, now),
            related: related_map(&published, site.related_limit),
            taxonomy: taxonomy(&published),
            published,
            built_at: now,
        }
    }

    pub fn feed(&self, format: FeedFormat) -> &str {
        match format {
            FeedFormat::Atom => &self.atom,
            FeedFormat::Rss => &self.rss,
        }
    }

    /// Writes every artifact into `dir`, creating it if needed.
    pub async fn write_to(&self, dir: &Path) -> Result<Vec<String>> {
        tokio::fs::create_dir_all(dir).await?;

        let files = vec![
            (SEARCH_INDEX_FILE, serde_json::to_string(&self.search_index)?),
            (FeedFormat::Atom.file_name(), self.atom.clone()),
            (FeedFormat::Rss.file_name(), self.rss.clone()),
            (RELATED_FILE, serde_json::to_string_pretty(&self.related)?),
            (TAXONOMY_FILE, serde_json::to_string_pretty(&self.taxonomy)?),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = dir.join(name);
            tokio::fs::write(&path, contents).await?;
            debug!("Wrote {}", path.display());
            written.push(name.to_string());
        }

        info!("Wrote {} files to {}", written.len(), dir.display());
        Ok(written)
    }
}

/// Loads content once from a provider and derives all outputs from that snapshot.
pub struct SiteBuilder {
    provider: Arc<dyn ContentProvider>,
    site: SiteConfig,
}

impl SiteBuilder {
    pub fn new(provider: Arc<dyn ContentProvider>, site: SiteConfig) -> Self {
        Self { provider, site }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    /// Full rebuild. A provider failure fails the whole build.
    pub async fn build(&self) -> Result<BuildOutput> {
        info!("Building content index from {}", self.provider.source_name());

        let items = self.provider.load().await?;
        let output = BuildOutput::from_items(&items, &self.site, Utc::now());

        info!(
            "Built index: {} published, {} search records, {} tags, {} categories",
            output.published.len(),
            output.search_index.len(),
            output.taxonomy.tags.len(),
            output.taxonomy.categories.len()
        );
        Ok(output)
    }

    /// Published items related to `slug`, or `None` when no published item has that slug.
    pub async fn related_to(&self, slug: &str, limit: usize) -> Result<Option<Vec<ContentItem>>> {
        let items = self.provider.load().await?;
        let published = publish(&items);

        let target = match published.iter().find(|item| item.slug == slug) {
            Some(target) => target,
            None => return Ok(None),
        };

        Ok(Some(
            crate::related::related(&published, target, limit)
                .into_iter()
                .cloned()
                .collect(),
        ))
    }
}
