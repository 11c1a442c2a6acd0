use super::{entry_views, escape_xml, feed_timestamp, EntryView};
use crate::config::SiteConfig;
use crate::search_index::iso_timestamp;
use crate::types::ContentItem;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Atom document for the newest published items.
pub fn to_atom(published: &[ContentItem], site: &SiteConfig) -> String {
    to_atom_at(published, site, Utc::now())
}

/// Same as [`to_atom`] with an explicit fallback clock for empty feeds.
pub fn to_atom_at(published: &[ContentItem], site: &SiteConfig, now: DateTime<Utc>) -> String {
    let root = escape_xml(site.site_root());
    let entries = entry_views(published, site);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    xml.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
    xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&site.title)));
    xml.push_str(&format!("  <subtitle>{}</subtitle>\n", escape_xml(&site.description)));
    xml.push_str(&format!("  <link href=\"{}atom.xml\" rel=\"self\"/>\n", root));
    xml.push_str(&format!("  <link href=\"{}\"/>\n", root));
    xml.push_str(&format!(
        "  <updated>{}</updated>\n",
        iso_timestamp(&feed_timestamp(published, now))
    ));
    xml.push_str(&format!("  <id>{}</id>\n", root));
    xml.push_str("  <author>\n");
    xml.push_str(&format!("    <name>{}</name>\n", escape_xml(&site.author_name)));
    xml.push_str("  </author>\n");

    for entry in &entries {
        push_entry(&mut xml, entry);
    }

    xml.push_str("</feed>\n");

    debug!("Rendered Atom feed with {} entries", entries.len());
    xml
}

fn push_entry(xml: &mut String, entry: &EntryView<'_>) {
    let item = entry.item;

    xml.push_str("  <entry>\n");
    xml.push_str(&format!("    <title>{}</title>\n", entry.title));
    xml.push_str(&format!("    <link href=\"{}\"/>\n", entry.link));
    xml.push_str(&format!("    <updated>{}</updated>\n", iso_timestamp(&item.updated_or_date())));
    xml.push_str(&format!("    <published>{}</published>\n", iso_timestamp(&item.date)));
    xml.push_str(&format!("    <id>{}</id>\n", entry.link));
    xml.push_str(&format!("    <summary type=\"text\">{}</summary>\n", entry.summary));

    if let Some(category) = &item.category {
        xml.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(category)));
    }
    for tag in item.unique_tags() {
        xml.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
    }
    if let Some(author) = &item.author {
        xml.push_str(&format!("    <author><name>{}</name></author>\n", escape_xml(author)));
    }

    xml.push_str("  </entry>\n");
}
