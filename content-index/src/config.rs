use crate::types::{IndexError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_FEED_LIMIT: usize = 20;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Site-wide settings shared by the feed projectors and the build.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub site_url: Url,
    /// Locale tag written to the RSS channel.
    pub language: String,
    /// Feed-level author name in the Atom document.
    pub author_name: String,
    /// Path segment between the site URL and an article slug.
    pub article_path: String,
    pub feed_limit: usize,
    pub related_limit: usize,
    /// Appended to the title when an item has no description.
    pub summary_suffix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Tech Blog".to_string(),
            description: "Articles and notes about technology".to_string(),
            site_url: Url::parse("http://localhost:4321/").expect("static URL is valid"),
            language: "en-us".to_string(),
            author_name: "Tech Blog".to_string(),
            article_path: "articles/".to_string(),
            feed_limit: DEFAULT_FEED_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
            summary_suffix: " article".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_site_url(mut self, site_url: &str) -> Result<Self> {
        self.site_url = Url::parse(site_url)?;
        Ok(self.normalized())
    }

    pub async fn from_toml_file(path: &Path) -> Result<Self> {
        debug!("Loading site config from {}", path.display());
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        if config.feed_limit == 0 {
            return Err(IndexError::General("feed_limit must be at least 1".to_string()));
        }
        Ok(config.normalized())
    }

    /// Site URL and article path both end with `/` so links are plain concatenation.
    fn normalized(mut self) -> Self {
        if !self.site_url.path().ends_with('/') {
            let path = format!("{}/", self.site_url.path());
            self.site_url.set_path(&path);
        }
        let trimmed = self.article_path.trim_matches('/');
        self.article_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}/", trimmed)
        };
        self
    }

    pub fn site_root(&self) -> &str {
        self.site_url.as_str()
    }

    pub fn article_url(&self, slug: &str) -> String {
        format!("{}{}{}/", self.site_root(), self.article_path, slug)
    }

    pub fn fallback_summary(&self, title: &str) -> String {
        format!("{}{}", title, self.summary_suffix)
    }
}

/// Transport settings for [`crate::sources::HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            user_agent: "Content-Index/1.0".to_string(),
            timeout_seconds: 30,
            max_redirects: 5,
        }
    }
}

impl HttpSourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
