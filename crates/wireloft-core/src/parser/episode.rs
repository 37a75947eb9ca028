//! Episode detail mapper
//!
//! Normalizes a `getEpisode` payload into an `EpisodeInfo`.

use serde_json::{Map, Value};

use crate::error::{Result, WireError};
use crate::types::{episode_url, EpisodeInfo, EpisodeSlug, Thumbnail};

use super::fields::{first_map, first_text, lookup, text_of};

/// Where the episode object may live, tried in order.
const EPISODE_PATHS: &[&[&str]] = &[
    &["episode"],
    &["data", "episode"],
    &["payload", "episode"],
    &["showEpisode"],
    &[],
];

/// Fields that mark an object as episode-shaped
const EPISODE_MARKER_KEYS: &[&str] = &["slug", "id", "title"];

/// Map an episode payload to `EpisodeInfo`.
///
/// `requested_slug` is used when the payload itself carries no slug.
///
/// # Returns
/// * `Ok(EpisodeInfo)` with the normalized episode
/// * `Err(WireError::EpisodeNotFound)` if no episode-shaped object exists
pub fn map_episode(doc: &Value, requested_slug: &str) -> Result<EpisodeInfo> {
    let episode = locate_episode(doc)
        .ok_or_else(|| WireError::EpisodeNotFound(requested_slug.to_string()))?;

    let slug = first_text(episode, &["slug"])
        .and_then(|s| EpisodeSlug::new(&s))
        .or_else(|| EpisodeSlug::new(requested_slug))
        .ok_or_else(|| WireError::InvalidSlug(requested_slug.to_string()))?;
    let id = first_text(episode, &["id"]).unwrap_or_else(|| slug.as_str().to_string());
    let title = first_text(episode, &["title", "name"]);
    let episode_number = episode
        .get("episodeNumber")
        .and_then(parse_episode_number_value)
        .or_else(|| title.as_deref().and_then(parse_episode_number));

    Ok(EpisodeInfo {
        url: episode_url(&slug),
        id,
        slug,
        description: first_text(episode, &["description", "summary"]),
        duration: episode.get("duration").and_then(Value::as_f64),
        episode_number,
        thumbnail: extract_thumbnail(episode),
        title,
    })
}

/// Parse an "Ep. 2268 - Title" style episode number, case-insensitive.
///
/// # Examples
/// ```
/// use wireloft_core::parser::parse_episode_number;
///
/// assert_eq!(parse_episode_number("Ep. 2268 - BOMBSHELL"), Some(2268));
/// assert_eq!(parse_episode_number("ep.12"), Some(12));
/// assert_eq!(parse_episode_number("Episode 5"), None);
/// ```
pub fn parse_episode_number(title: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"(?i)\bEp\.\s*(\d+)").ok()?;
    let caps = re.captures(title)?;
    caps.get(1)?.as_str().parse().ok()
}

fn locate_episode(doc: &Value) -> Option<&Map<String, Value>> {
    EPISODE_PATHS
        .iter()
        .filter_map(|path| lookup(doc, path).and_then(Value::as_object))
        .map(unwrap_show_episode)
        .find(|obj| EPISODE_MARKER_KEYS.iter().any(|key| obj.contains_key(*key)))
}

/// Unwrap the `{"showEpisode": {...}}` wrapper when present.
fn unwrap_show_episode(obj: &Map<String, Value>) -> &Map<String, Value> {
    obj.get("showEpisode").and_then(Value::as_object).unwrap_or(obj)
}

/// Integer or numeric-string episode number; blank strings count as missing.
fn parse_episode_number_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Thumbnail from `thumbnail`, else lifted from `images.thumbnail`.
fn extract_thumbnail(episode: &Map<String, Value>) -> Option<Thumbnail> {
    let raw = first_map(episode, &["thumbnail"]).or_else(|| {
        episode
            .get("images")
            .and_then(|images| lookup(images, &["thumbnail"]))
            .and_then(Value::as_object)
    })?;

    // The API abbreviates some variants and sends "" for missing images.
    let variant = |keys: &[&str]| keys.iter().find_map(|key| raw.get(*key).and_then(text_of));
    let thumbnail = Thumbnail {
        landscape: variant(&["landscape", "land"]),
        portrait: variant(&["portrait", "port"]),
        square: variant(&["square"]),
    };
    if thumbnail.is_empty() {
        None
    } else {
        Some(thumbnail)
    }
}
