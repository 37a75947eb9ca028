//! Data types for Wireloft
//!
//! This module contains the core data structures used throughout the library.
//! Public records implement Serialize and Deserialize for JSON output.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Public URL prefix for canonical episode pages
pub const EPISODE_URL_BASE: &str = "https://www.dailywire.com/episode/";

/// Identifier of a single episode in the catalog.
///
/// Always non-empty after trimming. The contents are opaque and never
/// parsed further.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeSlug(String);

impl EpisodeSlug {
    /// Build a slug from a raw candidate, trimming surrounding whitespace.
    ///
    /// Returns `None` when nothing is left after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EpisodeSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EpisodeSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical reference to a discovered episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRef {
    /// Episode identifier
    pub slug: EpisodeSlug,
    /// Public episode URL derived from the slug
    pub url: String,
    /// Season whose enumeration pass discovered this episode, if any
    pub season_slug: Option<String>,
}

impl EpisodeRef {
    /// Create a reference, deriving the URL from the slug.
    pub fn new(slug: EpisodeSlug, season_slug: Option<String>) -> Self {
        let url = episode_url(&slug);
        Self {
            slug,
            url,
            season_slug,
        }
    }
}

/// Build the canonical public URL for an episode slug.
///
/// # Examples
/// ```
/// use wireloft_core::types::{episode_url, EpisodeSlug};
///
/// let slug = EpisodeSlug::new("ep-1").unwrap();
/// assert_eq!(episode_url(&slug), "https://www.dailywire.com/episode/ep-1");
/// ```
pub fn episode_url(slug: &EpisodeSlug) -> String {
    format!("{}{}", EPISODE_URL_BASE, slug.as_str())
}

/// Season information within a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonInfo {
    /// Season identifier used for scoping requests
    pub id: String,
    /// Display name of the season
    pub name: Option<String>,
    /// Season slug used for scoping requests
    pub slug: String,
}

/// Canonical show descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowInfo {
    /// Show identifier (falls back to the slug, then `"unknown"`)
    pub id: String,
    /// Display name of the show
    pub name: Option<String>,
    pub description: Option<String>,
    /// Primary image URL
    pub image: Option<String>,
    /// Enumerable seasons in listed order
    pub seasons: Vec<SeasonInfo>,
}

/// Thumbnail variants attached to an episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub landscape: Option<String>,
    pub portrait: Option<String>,
    pub square: Option<String>,
}

impl Thumbnail {
    /// True when no variant carries a URL
    pub fn is_empty(&self) -> bool {
        self.landscape.is_none() && self.portrait.is_none() && self.square.is_none()
    }
}

/// Detailed information about a single episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeInfo {
    pub id: String,
    pub slug: EpisodeSlug,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Episode number from the API, or parsed from an "Ep. N" title
    pub episode_number: Option<u32>,
    pub thumbnail: Option<Thumbnail>,
    /// Canonical public URL
    pub url: String,
}

/// Scalar value of a request parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

/// Extra query parameters for a show page request.
///
/// Also used as the continuation token produced by the pagination
/// detector. Keys are kept sorted so the serialized form is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageParams(BTreeMap<String, ParamValue>);

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry `{cursor: value}` map
    pub fn cursor(value: impl Into<String>) -> Self {
        let mut params = Self::new();
        params.insert("cursor", ParamValue::Text(value.into()));
        params
    }

    /// Single-entry `{page: n}` map
    pub fn page(number: i64) -> Self {
        let mut params = Self::new();
        params.insert("page", ParamValue::Int(number));
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of `self` with every entry of `other` applied on top.
    pub fn merged_with(&self, other: &PageParams) -> PageParams {
        let mut merged = self.clone();
        for (key, value) in &other.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Stable serialization used to compare parameter sets.
    ///
    /// Keys are emitted in sorted order and values keep their JSON type,
    /// so `{"page": "2"}` and `{"page": 2}` compare as different.
    pub fn canonical(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_slug_trims() {
        let slug = EpisodeSlug::new("  ep-42 \n").unwrap();
        assert_eq!(slug.as_str(), "ep-42");
    }

    #[test]
    fn test_episode_slug_rejects_blank() {
        assert!(EpisodeSlug::new("").is_none());
        assert!(EpisodeSlug::new("   \t").is_none());
    }

    #[test]
    fn test_episode_ref_url() {
        let slug = EpisodeSlug::new("abc-123").unwrap();
        let episode = EpisodeRef::new(slug, Some("season-1".to_string()));
        assert_eq!(episode.url, "https://www.dailywire.com/episode/abc-123");
        assert_eq!(episode.season_slug.as_deref(), Some("season-1"));
    }

    #[test]
    fn test_episode_ref_serialization() {
        let episode = EpisodeRef::new(EpisodeSlug::new("ep-1").unwrap(), None);
        let json = serde_json::to_value(&episode).unwrap();
        assert_eq!(json["slug"], "ep-1");
        assert_eq!(json["url"], "https://www.dailywire.com/episode/ep-1");
        assert!(json["seasonSlug"].is_null());
    }

    #[test]
    fn test_page_params_canonical_is_order_independent() {
        let mut a = PageParams::new();
        a.insert("seasonSlug", "s1");
        a.insert("cursor", "abc");

        let mut b = PageParams::new();
        b.insert("cursor", "abc");
        b.insert("seasonSlug", "s1");

        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.canonical(), r#"{"cursor":"abc","seasonSlug":"s1"}"#);
    }

    #[test]
    fn test_page_params_canonical_distinguishes_types() {
        let mut text = PageParams::new();
        text.insert("page", "2");
        assert_ne!(text.canonical(), PageParams::page(2).canonical());
    }

    #[test]
    fn test_page_params_merge_overrides() {
        let mut filter = PageParams::new();
        filter.insert("seasonSlug", "s1");
        filter.insert("page", 1i64);

        let merged = filter.merged_with(&PageParams::page(3));
        assert_eq!(merged.get("page"), Some(&ParamValue::Int(3)));
        assert_eq!(merged.get("seasonSlug"), Some(&ParamValue::from("s1")));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_show_info_serialization() {
        let show = ShowInfo {
            id: "s1".to_string(),
            name: Some("Show One".to_string()),
            description: None,
            image: None,
            seasons: vec![SeasonInfo {
                id: "1".to_string(),
                name: Some("season-1".to_string()),
                slug: "season-1".to_string(),
            }],
        };

        let json = serde_json::to_string(&show).unwrap();
        let deserialized: ShowInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, show);
    }
}
