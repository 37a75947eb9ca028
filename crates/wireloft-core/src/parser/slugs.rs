//! Episode slug extraction from arbitrarily shaped JSON
//!
//! Walks the whole document and collects every episode identifier it can
//! find, whether as an explicit `slug` on an episode-like object or
//! embedded in an `/episode/<slug>` URL inside any string.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::EpisodeSlug;

/// Path segment that precedes an episode slug in public URLs
const EPISODE_MARKER: &str = "/episode/";

/// Extract every episode slug from a page, in first-seen order without
/// duplicates.
///
/// Never fails: values that are not objects, arrays or strings are ignored.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wireloft_core::parser::extract_episode_slugs;
///
/// let page = json!({
///     "items": [
///         {"showEpisode": {"slug": "ep-1"}},
///         {"link": "https://www.dailywire.com/episode/ep-2?ref=home"}
///     ]
/// });
/// let slugs: Vec<String> = extract_episode_slugs(&page)
///     .into_iter()
///     .map(|s| s.into_inner())
///     .collect();
/// assert_eq!(slugs, ["ep-1", "ep-2"]);
/// ```
pub fn extract_episode_slugs(doc: &Value) -> Vec<EpisodeSlug> {
    let mut collector = SlugCollector::default();
    collector.walk(doc, None);
    collector.slugs
}

/// Pull the slug out of a string containing `/episode/<slug>`.
///
/// Only the first marker is considered. The slug ends at the first `?`,
/// `#`, `/`, quote or space; an empty remainder yields `None`.
///
/// # Examples
/// ```
/// use wireloft_core::parser::slug_from_episode_url;
///
/// assert_eq!(slug_from_episode_url("https://x.test/episode/abc-123?ref=foo"), Some("abc-123"));
/// assert_eq!(slug_from_episode_url("https://x.test/show/abc"), None);
/// ```
pub fn slug_from_episode_url(text: &str) -> Option<&str> {
    let start = text.find(EPISODE_MARKER)? + EPISODE_MARKER.len();
    let rest = &text[start..];
    let end = rest
        .find(|c: char| matches!(c, '?' | '#' | '/' | '"' | '\'' | ' '))
        .unwrap_or(rest.len());
    let slug = &rest[..end];
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Keys whose object values (or array elements) are episodes.
///
/// Matches `episode`/`episodes` and compound keys ending in them, such as
/// `showEpisode` or `latestEpisodes`.
fn is_episode_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.ends_with("episode") || key.ends_with("episodes")
}

#[derive(Default)]
struct SlugCollector {
    seen: HashSet<EpisodeSlug>,
    slugs: Vec<EpisodeSlug>,
}

impl SlugCollector {
    fn add(&mut self, raw: &str) {
        if let Some(slug) = EpisodeSlug::new(raw) {
            if self.seen.insert(slug.clone()) {
                self.slugs.push(slug);
            }
        }
    }

    fn walk(&mut self, value: &Value, parent_key: Option<&str>) {
        match value {
            Value::Object(obj) => {
                if let Some(Value::Object(episode)) = obj.get("episode") {
                    if let Some(Value::String(slug)) = episode.get("slug") {
                        self.add(slug);
                    }
                }
                if parent_key.is_some_and(is_episode_key) {
                    if let Some(Value::String(slug)) = obj.get("slug") {
                        self.add(slug);
                    }
                }
                for (key, child) in obj {
                    self.walk(child, Some(key.as_str()));
                }
            }
            // Elements inherit the key of the list that holds them.
            Value::Array(items) => {
                for item in items {
                    self.walk(item, parent_key);
                }
            }
            Value::String(text) => {
                if let Some(slug) = slug_from_episode_url(text) {
                    self.add(slug);
                }
            }
            _ => {}
        }
    }
}
