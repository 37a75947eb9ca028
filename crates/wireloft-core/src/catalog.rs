//! Main Wireloft API
//!
//! This module provides the high-level API over the Middleware catalog.
//! It combines a transport with the parsers and the crawler to describe
//! shows and episodes and to discover a show's full episode list.

use serde_json::Value;

use crate::client::{ClientConfig, Transport, WireClient};
use crate::crawler::Crawler;
use crate::error::{Result, WireError};
use crate::parser::{map_episode, map_show};
use crate::types::{EpisodeInfo, EpisodeRef, EpisodeSlug, ShowInfo};

/// Catalog API for DailyWire shows and episodes
///
/// Generic over the transport so callers (and tests) can substitute their
/// own fetch implementation. All operations are asynchronous and issue one
/// request at a time.
///
/// # Example
/// ```no_run
/// use wireloft_core::Catalog;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let catalog = Catalog::new()?;
///
///     let episodes = catalog.discover_episodes("what-we-saw").await?;
///     for episode in episodes {
///         println!("{}", episode.url);
///     }
///
///     Ok(())
/// }
/// ```
pub struct Catalog<T = WireClient> {
    transport: T,
}

impl Catalog<WireClient> {
    /// Create a catalog backed by the production Middleware API.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(WireClient::new()?))
    }

    /// Create a catalog with a custom client configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(WireClient::with_config(config)?))
    }
}

impl<T: Transport> Catalog<T> {
    /// Create a catalog over any transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Discover every episode of a show as canonical references.
    ///
    /// # Returns
    /// * `Ok(Vec<EpisodeRef>)` in first-discovery order, without duplicates
    /// * `Err(WireError::InvalidSlug)` if `show_id` is blank
    /// * `Err(WireError::Discovery)` if the initial show page fails
    ///
    /// # Example
    /// ```no_run
    /// use wireloft_core::Catalog;
    ///
    /// # async fn example() -> Result<(), wireloft_core::WireError> {
    /// let catalog = Catalog::new()?;
    /// let episodes = catalog.discover_episodes("the-ben-shapiro-show").await?;
    /// println!("Found {} episodes", episodes.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn discover_episodes(&self, show_id: &str) -> Result<Vec<EpisodeRef>> {
        let show_id = validate_slug(show_id)?;
        Crawler::new(&self.transport).collect_refs(show_id).await
    }

    /// Discover every episode slug of a show.
    ///
    /// Same crawl as `discover_episodes`, without the URLs.
    pub async fn list_episode_slugs(&self, show_id: &str) -> Result<Vec<EpisodeSlug>> {
        let show_id = validate_slug(show_id)?;
        Crawler::new(&self.transport).collect_all(show_id).await
    }

    /// Fetch show metadata and seasons from the default show page.
    ///
    /// # Returns
    /// * `Ok(ShowInfo)` with the normalized show
    /// * `Err(WireError::Transport)` if the page cannot be fetched
    /// * `Err(WireError::ShowNotFound)` if the page holds no show object
    pub async fn describe_show(&self, show_id: &str) -> Result<ShowInfo> {
        let show_id = validate_slug(show_id)?;
        let page = self.transport.fetch_show_page(show_id, None).await?;
        map_show(&page).map_err(|e| match e {
            WireError::ShowNotFound(_) => WireError::ShowNotFound(show_id.to_string()),
            other => other,
        })
    }

    /// Fetch and normalize one episode.
    ///
    /// # Returns
    /// * `Ok(EpisodeInfo)` with the normalized episode
    /// * `Err(WireError::Transport)` if the episode cannot be fetched
    /// * `Err(WireError::EpisodeNotFound)` if no episode object is present
    pub async fn describe_episode(&self, slug: &str) -> Result<EpisodeInfo> {
        let slug = validate_slug(slug)?;
        let page = self.transport.fetch_episode(slug).await?;
        map_episode(&page, slug)
    }

    /// Fetch the default show page without interpreting it.
    pub async fn show_page_raw(&self, show_id: &str) -> Result<Value> {
        let show_id = validate_slug(show_id)?;
        Ok(self.transport.fetch_show_page(show_id, None).await?)
    }
}

/// Reject blank identifiers before any request is made.
fn validate_slug(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WireError::InvalidSlug("slug cannot be empty".to_string()));
    }
    Ok(trimmed)
}
