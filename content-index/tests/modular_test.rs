mod common;

use common::*;
use content_index::feed::{to_atom_at, to_rss_at};
use content_index::handlers::{self, SEARCH_CACHE_CONTROL};
use content_index::{build_index, escape_xml, publish, related, FeedFormat};
use serde_json::Value;

#[test]
fn test_related_prefers_category_then_recency() {
    init_tracing();

    let target = article("target", 30).with_category("go").with_tags(["cli", "perf"]);
    let items = vec![
        article("a", 1).with_category("go"),
        article("b", 2).with_category("rust").with_tags(["cli"]),
        article("c", 3).with_category("python").with_tags(["web"]),
        article("d", 4).with_category("rust").with_tags(["perf"]),
        target.clone(),
    ];
    let pool = publish(&items);

    let slugs: Vec<_> = related(&pool, &target, 3).iter().map(|i| i.slug.clone()).collect();
    // "d" and "b" both score 1; "d" is newer so it comes first
    assert_eq!(slugs, vec!["a", "d", "b"]);

    let slugs: Vec<_> = related(&pool, &target, 1).iter().map(|i| i.slug.clone()).collect();
    assert_eq!(slugs, vec!["a"]);
}

#[test]
fn test_related_empty_pool_and_no_matches() {
    let target = article("t", 0).with_tags(["x"]);
    assert!(related(&[], &target, 3).is_empty());

    let pool = vec![article("u", 1).with_tags(["y"]), article("v", 2)];
    assert!(related(&pool, &target, 3).is_empty());
}

#[test]
fn test_build_index_excludes_drafts_and_sorts() {
    let items = vec![
        article("older", 1).with_body("# Older *post*").with_tags(["a"]),
        article("draft", 9).with_draft(true),
        article("newer", 5)
            .with_body("  [link](https://example.com) and `code`  ")
            .with_category("notes")
            .with_description("Newer post"),
    ];

    let records = build_index(&items);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].slug, "newer");
    assert_eq!(records[0].content, "linkhttps://example.com and code");
    assert_eq!(records[0].date, "2024-01-06T00:00:00.000Z");
    assert_eq!(records[0].category.as_deref(), Some("notes"));
    assert_eq!(records[1].slug, "older");
    assert_eq!(records[1].content, "Older post");
    assert_eq!(records[1].tags, vec!["a"]);
}

#[test]
fn test_search_record_copies_tags_as_authored() {
    let items = vec![article("a", 1).with_tags(["rust", "cli", "rust"])];
    let records = build_index(&items);
    assert_eq!(records[0].tags, vec!["rust", "cli", "rust"]);
}

#[test]
fn test_search_record_json_shape() {
    let items = vec![article("plain", 1).with_body("text")];
    let json = serde_json::to_value(build_index(&items)).unwrap();

    let record = &json[0];
    assert_eq!(record["slug"], "plain");
    assert_eq!(record["title"], "Article plain");
    assert_eq!(record["content"], "text");
    assert_eq!(record["tags"], Value::Array(vec![]));
    assert!(record.get("category").is_none());
    assert!(record.get("description").is_none());
}

#[test]
fn test_escape_is_applied_once() {
    assert_eq!(escape_xml("A & B"), "A &amp; B");
    assert_eq!(escape_xml("A &amp; B"), "A &amp;amp; B");

    let item = article("amp", 1).with_description("A & B");
    let now = day(100);
    let atom = to_atom_at(&[item.clone()], &site(), now);
    let rss = to_rss_at(&[item], &site(), now);

    assert!(atom.contains("<summary type=\"text\">A &amp; B</summary>"));
    assert!(rss.contains("<description>A &amp; B</description>"));
    assert!(!atom.contains("&amp;amp;"));
    assert!(!rss.contains("&amp;amp;"));
}

#[test]
fn test_feeds_cap_to_twenty_newest() {
    let items: Vec<_> = (0..25).map(|i| article(&format!("post-{:02}", i), i)).collect();
    let published = publish(&items);
    let now = day(100);

    let atom = to_atom_at(&published, &site(), now);
    let rss = to_rss_at(&published, &site(), now);

    assert_eq!(atom.matches("<entry>").count(), 20);
    assert_eq!(rss.matches("<item>").count(), 20);
    assert!(atom.contains("articles/post-24/"));
    assert!(atom.contains("articles/post-05/"));
    assert!(!atom.contains("articles/post-04/"));
    assert!(atom.find("post-24").unwrap() < atom.find("post-23").unwrap());
}

#[tokio::test]
async fn test_search_endpoint_success() {
    init_tracing();

    let source = StaticSource::new(vec![
        article("one", 1).with_body("*hello*"),
        article("two", 2).with_draft(true),
    ])
    .unwrap();

    let response = handlers::search_index(&source).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(response.cache_control, Some(SEARCH_CACHE_CONTROL));

    let body: Value = serde_json::from_str(&response.body).unwrap();
    let records = body.as_array().expect("success payload is an array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["content"], "hello");
}

#[tokio::test]
async fn test_search_endpoint_failure_is_an_object() {
    init_tracing();

    let response = handlers::search_index(&FailingSource).await;

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
    assert_eq!(response.cache_control, None);

    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert!(body.is_object());
    assert_eq!(body["error"], "Failed to generate search index");
}

#[tokio::test]
async fn test_feed_endpoint_propagates_provider_failure() {
    init_tracing();

    let result = handlers::feed(&FailingSource, &site(), FeedFormat::Rss).await;
    assert!(matches!(result, Err(IndexError::Provider(_))));

    let source = StaticSource::new(vec![article("one", 1)]).unwrap();
    let response = handlers::feed(&source, &site(), FeedFormat::Atom).await.unwrap();
    assert_eq!(response.content_type, "application/atom+xml; charset=utf-8");
    assert!(response.body.contains("<entry>"));
}

#[test]
fn test_static_source_rejects_duplicate_slugs() {
    let result = StaticSource::new(vec![article("same", 1), article("same", 2)]);
    assert!(matches!(result, Err(IndexError::Provider(_))));
}
