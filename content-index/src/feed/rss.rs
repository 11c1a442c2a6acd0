use super::{entry_views, escape_xml, feed_timestamp, EntryView};
use crate::config::SiteConfig;
use crate::types::ContentItem;
use chrono::{DateTime, Utc};
use tracing::debug;

/// RFC 822 date as used by RSS, e.g. `Mon, 15 Jan 2024 00:00:00 GMT`.
pub fn rfc822_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// RSS 2.0 document for the newest published items.
pub fn to_rss(published: &[ContentItem], site: &SiteConfig) -> String {
    to_rss_at(published, site, Utc::now())
}

/// Same as [`to_rss`] with an explicit fallback clock for empty feeds.
pub fn to_rss_at(published: &[ContentItem], site: &SiteConfig, now: DateTime<Utc>) -> String {
    let entries = entry_views(published, site);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\">\n");
    xml.push_str("  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&site.title)));
    xml.push_str(&format!("    <description>{}</description>\n", escape_xml(&site.description)));
    xml.push_str(&format!("    <link>{}</link>\n", escape_xml(site.site_root())));
    xml.push_str(&format!("    <language>{}</language>\n", escape_xml(&site.language)));
    xml.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        rfc822_timestamp(&feed_timestamp(published, now))
    ));

    for entry in &entries {
        push_item(&mut xml, entry);
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");

    debug!("Rendered RSS feed with {} items", entries.len());
    xml
}

fn push_item(xml: &mut String, entry: &EntryView<'_>) {
    let item = entry.item;

    xml.push_str("    <item>\n");
    xml.push_str(&format!("      <title>{}</title>\n", entry.title));
    xml.push_str(&format!("      <link>{}</link>\n", entry.link));
    xml.push_str(&format!("      <guid isPermaLink=\"true\">{}</guid>\n", entry.link));
    xml.push_str(&format!("      <description>{}</description>\n", entry.summary));
    xml.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc822_timestamp(&item.date)));

    if let Some(category) = &item.category {
        xml.push_str(&format!("      <category>{}</category>\n", escape_xml(category)));
    }

    let tags = item.unique_tags();
    if !tags.is_empty() {
        let block: String = tags
            .into_iter()
            .map(|tag| format!("<tag>{}</tag>", escape_xml(tag)))
            .collect();
        xml.push_str(&format!("      <tags>{}</tags>\n", block));
    }

    xml.push_str("    </item>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn site() -> SiteConfig {
        let mut site = SiteConfig::default().with_site_url("https://example.com/").unwrap();
        site.language = "ja-jp".to_string();
        site
    }

    #[test]
    fn test_rfc822() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(rfc822_timestamp(&date), "Mon, 15 Jan 2024 08:30:00 GMT");
    }

    #[test]
    fn test_item_fields() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let item = ContentItem::new("hello", "Hello", date)
            .with_description("Fish & chips")
            .with_category("food")
            .with_tags(["a&b", "c"]);

        let xml = to_rss(&[item], &site());

        assert!(xml.contains("<language>ja-jp</language>"));
        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("<link>https://example.com/articles/hello/</link>"));
        assert!(xml.contains("<description>Fish &amp; chips</description>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 00:00:00 GMT</pubDate>"));
        assert!(xml.contains("<category>food</category>"));
        assert!(xml.contains("<tags><tag>a&amp;b</tag><tag>c</tag></tags>"));
    }

    #[test]
    fn test_no_tags_block_without_tags() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let xml = to_rss(&[ContentItem::new("a", "A", date)], &site());
        assert!(!xml.contains("<tags>"));
        assert!(!xml.contains("<category>"));
        assert!(xml.contains("<description>A article</description>"));
    }

    #[test]
    fn test_empty_feed_uses_clock() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let xml = to_rss_at(&[], &site(), now);
        assert!(xml.contains("<lastBuildDate>Sun, 01 Jun 2025 12:00:00 GMT</lastBuildDate>"));
        assert!(!xml.contains("<item>"));
    }
}
