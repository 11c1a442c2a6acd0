//! Framework-agnostic responses for the search index and feed endpoints.

use crate::config::SiteConfig;
use crate::feed::FeedFormat;
use crate::publication::publish;
use crate::search_index::generate_search_index;
use crate::traits::ContentProvider;
use crate::types::Result;
use serde::Serialize;
use tracing::{error, info};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const SEARCH_CACHE_CONTROL: &str = "public, max-age=3600";
pub const SEARCH_INDEX_ERROR: &str = "Failed to generate search index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Search index endpoint.
///
/// This is the only place errors are caught: any failure is logged and turned
/// into a `{"error": ...}` object with status 500, so consumers can tell
/// success (a top-level array) from failure (an object).
pub async fn search_index(provider: &dyn ContentProvider) -> Response {
    let result = generate_search_index(provider)
        .await
        .and_then(|records| Ok(serde_json::to_string(&records)?));

    match result {
        Ok(body) => Response {
            status: 200,
            content_type: JSON_CONTENT_TYPE,
            cache_control: Some(SEARCH_CACHE_CONTROL),
            body,
        },
        Err(e) => {
            error!("Search index generation failed: {}", e);
            Response {
                status: 500,
                content_type: JSON_CONTENT_TYPE,
                cache_control: None,
                body: error_body(SEARCH_INDEX_ERROR),
            }
        }
    }
}

/// Feed endpoint. Provider failures propagate to the caller.
pub async fn feed(provider: &dyn ContentProvider, site: &SiteConfig, format: FeedFormat) -> Result<Response> {
    let items = provider.load().await?;
    let published = publish(&items);
    info!("Serving {:?} feed from {} published items", format, published.len());

    Ok(Response {
        status: 200,
        content_type: format.content_type(),
        cache_control: None,
        body: format.render(&published, site),
    })
}

fn error_body(message: &str) -> String {
    serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", message))
}
