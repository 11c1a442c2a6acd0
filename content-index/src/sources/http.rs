use super::validate_all;
use crate::config::HttpSourceConfig;
use crate::traits::ContentProvider;
use crate::types::{ContentItem, IndexError, RawContentItem, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Content served as a JSON array of items by a remote endpoint.
///
/// Each element uses the item field names (`slug`, `title`, `date`, ...).
/// A failed request or a non-success status fails the load; there are no retries.
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(url: &str, config: HttpSourceConfig) -> Result<Self> {
        let url = Url::parse(url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(IndexError::General(format!(
                "unsupported content URL scheme: {}",
                url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ContentProvider for HttpSource {
    fn source_name(&self) -> String {
        self.url.to_string()
    }

    async fn load(&self) -> Result<Vec<ContentItem>> {
        let start_time = Instant::now();
        debug!("Fetching content from {}", self.url);

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Content fetch from {} returned {}", self.url, status);
            return Err(IndexError::Provider(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let raw_items: Vec<RawContentItem> = response.json().await?;
        let items = validate_all(
            raw_items
                .into_iter()
                .enumerate()
                .map(|(index, raw)| (format!("{}[{}]", self.url, index), raw)),
        )?;

        info!(
            "Loaded {} items from {} in {}ms",
            items.len(),
            self.url,
            start_time.elapsed().as_millis()
        );
        Ok(items)
    }
}
