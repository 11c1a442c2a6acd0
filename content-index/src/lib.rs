pub mod types;
pub mod config;
pub mod traits;
pub mod publication;
pub mod related;
pub mod search_index;
pub mod feed;
pub mod sources;
pub mod handlers;
pub mod builder;

pub use types::*;
pub use config::{HttpSourceConfig, SiteConfig};
pub use traits::ContentProvider;
pub use publication::{all_categories, all_tags, by_category, by_tag, publish};
pub use related::{related, related_map, relatedness};
pub use search_index::{build_index, generate_search_index};
pub use feed::{escape_xml, to_atom, to_rss, FeedFormat};
pub use sources::{DirectorySource, HttpSource, StaticSource};
pub use builder::{BuildOutput, SiteBuilder};
