pub mod defs;

pub use defs::{parse_content_date, ContentItem, RawContentItem, ValidationError};
