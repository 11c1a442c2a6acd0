use super::ensure_unique_slugs;
use crate::traits::ContentProvider;
use crate::types::{ContentItem, IndexError, RawContentItem, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FRONT_MATTER_DELIMITER: &str = "+++";
const CONTENT_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

/// Markdown files with TOML front matter under one directory.
///
/// ```text
/// +++
/// title = "Hello"
/// date = 2024-01-15
/// tags = ["rust"]
/// +++
/// Body text...
/// ```
///
/// The slug is the file path relative to the root, without extension
/// (`guides/setup.md` becomes `guides/setup`) unless the front matter sets one.
/// Files and directories starting with `_` or `.` are skipped.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name.starts_with('_') || name.starts_with('.') {
                    continue;
                }

                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if is_content_file(&path) {
                    files.push(path);
                }
            }
        }

        // read_dir order is platform dependent; sort so equal-date ties are reproducible
        files.sort();
        Ok(files)
    }

    async fn read_item(&self, path: PathBuf) -> Result<ContentItem> {
        let text = tokio::fs::read_to_string(&path).await?;
        let slug = self.slug_for(&path);
        let shown = path.display().to_string();

        let raw = parse_document(&slug, &text).map_err(|message| IndexError::FrontMatter {
            path: shown.clone(),
            message,
        })?;

        debug!("Read {} as {}", shown, slug);
        ContentItem::try_from(raw).map_err(|error| IndexError::Validation {
            source_name: shown,
            error,
        })
    }

    fn slug_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path).with_extension("");
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[async_trait]
impl ContentProvider for DirectorySource {
    fn source_name(&self) -> String {
        self.root.display().to_string()
    }

    async fn load(&self) -> Result<Vec<ContentItem>> {
        let files = self.collect_files().await?;
        debug!("Found {} content files under {}", files.len(), self.root.display());

        let items = try_join_all(files.into_iter().map(|path| self.read_item(path))).await?;
        ensure_unique_slugs(&items)?;

        info!("Loaded {} items from {}", items.len(), self.root.display());
        Ok(items)
    }
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CONTENT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Splits a document into its front matter block and body.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parses a document into an unvalidated item.
///
/// TOML dates (`date = 2024-01-15`) and quoted strings are both accepted for
/// `date` and `updated`; validation parses them afterwards.
pub fn parse_document(slug: &str, text: &str) -> std::result::Result<RawContentItem, String> {
    let (front, body) = split_front_matter(text)
        .ok_or_else(|| format!("missing {} front matter block", FRONT_MATTER_DELIMITER))?;

    let mut table: toml::Table = toml::from_str(front).map_err(|e| e.to_string())?;
    for key in ["date", "updated"] {
        let text = match table.get(key) {
            Some(toml::Value::Datetime(dt)) => dt.to_string(),
            _ => continue,
        };
        table.insert(key.to_string(), toml::Value::String(text));
    }

    let mut raw: RawContentItem = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| e.to_string())?;
    if raw.slug.trim().is_empty() {
        raw.slug = slug.to_string();
    }
    raw.body = body.to_string();
    Ok(raw)
}
