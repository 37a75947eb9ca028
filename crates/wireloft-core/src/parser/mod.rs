//! Structural parsers for Middleware API responses
//!
//! Every parser works on an untyped `serde_json::Value` because the
//! upstream shape is not stable:
//! - `slugs`: find episode identifiers anywhere in a document
//! - `show`: map a show page to `ShowInfo`
//! - `pagination`: infer the parameters of the next page
//! - `episode`: map an episode payload to `EpisodeInfo`
//! - `fields`: ordered fallback chains shared by the mappers

pub mod episode;
pub mod fields;
pub mod pagination;
pub mod show;
pub mod slugs;

// Re-export main parsing functions
pub use episode::{map_episode, parse_episode_number};
pub use pagination::find_next_page;
pub use show::{map_season, map_show};
pub use slugs::{extract_episode_slugs, slug_from_episode_url};
