//! Category/tag relatedness scoring for "related articles" recommendations.

use crate::types::{ContentItem, ScoredCandidate};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub const CATEGORY_MATCH_SCORE: u32 = 3;
pub const SHARED_TAG_SCORE: u32 = 1;

/// Relatedness of `candidate` to `target`.
///
/// +3 when both items carry the same category, +1 per distinct shared tag.
pub fn relatedness(target: &ContentItem, candidate: &ContentItem) -> u32 {
    let mut score = 0;

    if let (Some(a), Some(b)) = (target.category.as_deref(), candidate.category.as_deref()) {
        if !a.is_empty() && a == b {
            score += CATEGORY_MATCH_SCORE;
        }
    }

    let target_tags: HashSet<&str> = target.tags.iter().map(String::as_str).collect();
    let shared = candidate
        .unique_tags()
        .into_iter()
        .filter(|tag| target_tags.contains(tag))
        .count() as u32;

    score + shared * SHARED_TAG_SCORE
}

/// Up to `limit` items from `pool` most related to `target`.
///
/// `target` is excluded by slug, and candidates with a zero score are dropped.
/// Results are ordered by score descending; equal scores keep their order in
/// `pool`. Callers are expected to pass a pool already sorted newest first (as
/// returned by [`crate::publication::publish`]) so ties resolve to the most
/// recent item. The pool is never re-sorted here.
pub fn related<'a>(pool: &'a [ContentItem], target: &ContentItem, limit: usize) -> Vec<&'a ContentItem> {
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredCandidate<'a>> = pool
        .iter()
        .filter(|candidate| candidate.slug != target.slug)
        .map(|candidate| ScoredCandidate {
            item: candidate,
            score: relatedness(target, candidate),
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);

    debug!("Found {} related items for {}", scored.len(), target.slug);
    scored.into_iter().map(|candidate| candidate.item).collect()
}

/// Related slugs for every item in `published`, keyed by slug.
pub fn related_map(published: &[ContentItem], limit: usize) -> BTreeMap<String, Vec<String>> {
    published
        .iter()
        .map(|target| {
            let slugs = related(published, target, limit)
                .into_iter()
                .map(|item| item.slug.clone())
                .collect();
            (target.slug.clone(), slugs)
        })
        .collect()
}
