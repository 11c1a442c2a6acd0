//! Syndication feed projections over the published item list.

pub mod atom;
pub mod escape;
pub mod rss;

pub use atom::{to_atom, to_atom_at};
pub use escape::escape_xml;
pub use rss::{to_rss, to_rss_at};

use crate::config::SiteConfig;
use crate::types::ContentItem;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FeedFormat {
    Atom,
    Rss,
}

impl FeedFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            FeedFormat::Atom => "application/atom+xml; charset=utf-8",
            FeedFormat::Rss => "application/rss+xml; charset=utf-8",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            FeedFormat::Atom => "atom.xml",
            FeedFormat::Rss => "rss.xml",
        }
    }

    pub fn render(&self, published: &[ContentItem], site: &SiteConfig) -> String {
        match self {
            FeedFormat::Atom => to_atom(published, site),
            FeedFormat::Rss => to_rss(published, site),
        }
    }
}

/// Per-entry values shared by both dialects. Text fields are already escaped.
struct EntryView<'a> {
    item: &'a ContentItem,
    title: String,
    link: String,
    summary: String,
}

/// The newest `site.feed_limit` items from an already date-sorted list.
fn entry_views<'a>(published: &'a [ContentItem], site: &SiteConfig) -> Vec<EntryView<'a>> {
    published
        .iter()
        .take(site.feed_limit)
        .map(|item| {
            let summary = match &item.description {
                Some(description) => description.clone(),
                None => site.fallback_summary(&item.title),
            };
            EntryView {
                item,
                title: escape_xml(&item.title),
                link: escape_xml(&site.article_url(&item.slug)),
                summary: escape_xml(&summary),
            }
        })
        .collect()
}

/// Top-level "last updated" stamp: the newest publication date, or `now` for an empty feed.
fn feed_timestamp(published: &[ContentItem], now: DateTime<Utc>) -> DateTime<Utc> {
    published.iter().map(|item| item.date).max().unwrap_or(now)
}
