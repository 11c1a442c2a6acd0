use super::{ensure_unique_slugs, validate_all};
use crate::traits::ContentProvider;
use crate::types::{ContentItem, RawContentItem, Result};
use async_trait::async_trait;
use tracing::debug;

/// Fixed in-memory snapshot, returned as-is on every load.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    items: Vec<ContentItem>,
}

impl StaticSource {
    pub fn new(items: Vec<ContentItem>) -> Result<Self> {
        ensure_unique_slugs(&items)?;
        Ok(Self {
            name: "memory".to_string(),
            items,
        })
    }

    pub fn from_raw(raw_items: Vec<RawContentItem>) -> Result<Self> {
        let items = validate_all(
            raw_items
                .into_iter()
                .enumerate()
                .map(|(index, raw)| (format!("memory[{}]", index), raw)),
        )?;
        Self::new(items)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl ContentProvider for StaticSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    async fn load(&self) -> Result<Vec<ContentItem>> {
        debug!("Serving {} items from {}", self.items.len(), self.name);
        Ok(self.items.clone())
    }
}
