//! Crawl orchestration
//!
//! Enumerates every episode of a show by combining the default show page,
//! cursor pagination and page-number probing for each season. The upstream
//! pagination style cannot be known in advance, so all three strategies run
//! for every season and each loop carries a hard bound.

use std::collections::HashSet;

use serde_json::Value;

use crate::client::Transport;
use crate::error::{Result, WireError};
use crate::parser::{extract_episode_slugs, find_next_page, map_show};
use crate::types::{EpisodeRef, EpisodeSlug, PageParams, SeasonInfo};

/// Maximum cursor-following fetches per season
pub const MAX_CURSOR_ITERATIONS: usize = 200;

/// Highest page number probed by the page-number fallback (starting at 2)
pub const MAX_PAGE_NUMBER: i64 = 1000;

/// Episodes found so far in one crawl, deduplicated across all seasons
#[derive(Default)]
struct CrawlState {
    seen: HashSet<EpisodeSlug>,
    episodes: Vec<EpisodeRef>,
}

impl CrawlState {
    /// Merge the slugs of `page`, returning how many were new.
    fn merge(&mut self, page: &Value, season: Option<&SeasonInfo>) -> usize {
        let mut added = 0;
        for slug in extract_episode_slugs(page) {
            if self.seen.insert(slug.clone()) {
                let season_slug = season.map(|s| s.slug.clone());
                self.episodes.push(EpisodeRef::new(slug, season_slug));
                added += 1;
            }
        }
        added
    }
}

/// Query parameters restricting a show page request to one season.
pub fn season_filter(season: Option<&SeasonInfo>) -> PageParams {
    let mut params = PageParams::new();
    if let Some(season) = season {
        params.insert("seasonId", season.id.as_str());
        params.insert("seasonSlug", season.slug.as_str());
    }
    params
}

/// Drives the fetches of a single crawl over a borrowed transport.
///
/// Fetches are issued one at a time. A crawler holds no state between
/// calls, so one instance may serve several crawls.
pub struct Crawler<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Crawler<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Enumerate all episode slugs of a show in first-discovery order.
    ///
    /// # Errors
    /// `WireError::Discovery` when the initial show page cannot be fetched.
    /// Failures after that only end the enumeration branch they occur in.
    pub async fn collect_all(&self, show_id: &str) -> Result<Vec<EpisodeSlug>> {
        let episodes = self.collect_refs(show_id).await?;
        Ok(episodes.into_iter().map(|episode| episode.slug).collect())
    }

    /// Enumerate all episodes of a show as canonical references.
    ///
    /// Each reference records the season pass that first found it; episodes
    /// from the default page or the unscoped pass have no season.
    pub async fn collect_refs(&self, show_id: &str) -> Result<Vec<EpisodeRef>> {
        let first = self
            .transport
            .fetch_show_page(show_id, None)
            .await
            .map_err(|source| WireError::Discovery {
                show: show_id.to_string(),
                source,
            })?;

        let mut state = CrawlState::default();
        let seeded = state.merge(&first, None);

        let seasons = match map_show(&first) {
            Ok(show) => show.seasons,
            Err(e) => {
                tracing::warn!(show = show_id, error = %e, "could not map show page, crawling without seasons");
                Vec::new()
            }
        };
        tracing::info!(
            show = show_id,
            seeded,
            seasons = seasons.len(),
            "fetched default show page"
        );

        if seasons.is_empty() {
            self.enumerate(show_id, None, &mut state).await;
        } else {
            for season in &seasons {
                self.enumerate(show_id, Some(season), &mut state).await;
            }
        }

        tracing::info!(show = show_id, episodes = state.episodes.len(), "crawl finished");
        Ok(state.episodes)
    }

    /// Run the base page, cursor loop and page-number probe for one season.
    ///
    /// Returns early, keeping what was merged, as soon as a fetch fails.
    async fn enumerate(&self, show_id: &str, season: Option<&SeasonInfo>, state: &mut CrawlState) {
        let filter = season_filter(season);
        let label = season.map(|s| s.slug.as_str()).unwrap_or("*");
        let before = state.episodes.len();

        let Some(mut page) = self.fetch(show_id, &filter, label).await else {
            return;
        };
        state.merge(&page, season);

        let mut seen_cursors = HashSet::new();
        for _ in 0..MAX_CURSOR_ITERATIONS {
            let Some(next) = find_next_page(&page) else {
                break;
            };
            if !seen_cursors.insert(next.canonical()) {
                tracing::debug!(season = label, cursor = %next.canonical(), "cursor repeated, stopping");
                break;
            }
            let Some(fetched) = self.fetch(show_id, &filter.merged_with(&next), label).await else {
                return;
            };
            page = fetched;
            state.merge(&page, season);
        }

        for number in 2..=MAX_PAGE_NUMBER {
            let params = filter.merged_with(&PageParams::page(number));
            let Some(page) = self.fetch(show_id, &params, label).await else {
                return;
            };
            if state.merge(&page, season) == 0 {
                break;
            }
        }

        tracing::info!(
            season = label,
            found = state.episodes.len() - before,
            "season enumerated"
        );
    }

    /// Fetch one enumeration page; a failure is logged and ends the branch.
    async fn fetch(&self, show_id: &str, params: &PageParams, label: &str) -> Option<Value> {
        match self.transport.fetch_show_page(show_id, Some(params)).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(season = label, error = %e, "fetch failed, stopping enumeration");
                None
            }
        }
    }
}
