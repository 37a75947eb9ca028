//! Command handlers for the `wireloft` binary
//!
//! Each handler runs one catalog operation and renders the result either as
//! plain text lines or as pretty-printed JSON.

use anyhow::{Context, Result};
use serde::Serialize;

use wireloft_core::{Catalog, EpisodeInfo, EpisodeRef, ShowInfo, Transport};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Output::Json
        } else {
            Output::Text
        }
    }
}

/// Describe a show and its seasons.
pub async fn show_info<T: Transport>(catalog: &Catalog<T>, slug: &str, output: Output) -> Result<String> {
    let show = catalog
        .describe_show(slug)
        .await
        .with_context(|| format!("failed to describe show '{}'", slug))?;
    match output {
        Output::Json => to_json(&show),
        Output::Text => Ok(render_show(&show)),
    }
}

/// List every discovered episode of a show in first-discovery order.
pub async fn show_episodes<T: Transport>(
    catalog: &Catalog<T>,
    slug: &str,
    output: Output,
) -> Result<String> {
    let episodes = catalog
        .discover_episodes(slug)
        .await
        .with_context(|| format!("failed to discover episodes of '{}'", slug))?;
    match output {
        Output::Json => to_json(&episodes),
        Output::Text => Ok(render_episode_refs(&episodes)),
    }
}

/// Dump the unprocessed show page document. Always JSON.
pub async fn show_raw<T: Transport>(catalog: &Catalog<T>, slug: &str) -> Result<String> {
    let doc = catalog
        .show_page_raw(slug)
        .await
        .with_context(|| format!("failed to fetch show page '{}'", slug))?;
    to_json(&doc)
}

/// Describe a single episode.
pub async fn episode_info<T: Transport>(
    catalog: &Catalog<T>,
    slug: &str,
    output: Output,
) -> Result<String> {
    let episode = catalog
        .describe_episode(slug)
        .await
        .with_context(|| format!("failed to describe episode '{}'", slug))?;
    match output {
        Output::Json => to_json(&episode),
        Output::Text => Ok(render_episode(&episode)),
    }
}

fn to_json<S: Serialize + ?Sized>(value: &S) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

fn render_show(show: &ShowInfo) -> String {
    let mut lines = vec![
        format!("id:          {}", show.id),
        format!("name:        {}", show.name.as_deref().unwrap_or("-")),
    ];
    if let Some(description) = &show.description {
        lines.push(format!("description: {}", description));
    }
    if let Some(image) = &show.image {
        lines.push(format!("image:       {}", image));
    }
    lines.push(format!("seasons:     {}", show.seasons.len()));
    for season in &show.seasons {
        lines.push(format!(
            "  {}\t{}\t{}",
            season.slug,
            season.id,
            season.name.as_deref().unwrap_or(&season.slug)
        ));
    }
    lines.join("\n")
}

/// One `url<TAB>season` line per episode; unscoped episodes show `-`.
fn render_episode_refs(episodes: &[EpisodeRef]) -> String {
    episodes
        .iter()
        .map(|episode| {
            format!(
                "{}\t{}",
                episode.url,
                episode.season_slug.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_episode(episode: &EpisodeInfo) -> String {
    let mut lines = vec![
        format!("slug:     {}", episode.slug),
        format!("id:       {}", episode.id),
        format!("title:    {}", episode.title.as_deref().unwrap_or("-")),
        format!("url:      {}", episode.url),
    ];
    if let Some(number) = episode.episode_number {
        lines.push(format!("episode:  {}", number));
    }
    if let Some(duration) = episode.duration {
        lines.push(format!("duration: {}s", duration));
    }
    if let Some(description) = &episode.description {
        lines.push(format!("description: {}", description));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use wireloft_core::{PageParams, TransportResult};

    struct StaticTransport {
        show: Value,
        episode: Value,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn fetch_show_page(&self, _show_id: &str, extra: Option<&PageParams>) -> TransportResult {
            // Scoped or paged requests see an empty listing.
            match extra {
                Some(params) if !params.is_empty() => Ok(json!({})),
                _ => Ok(self.show.clone()),
            }
        }

        async fn fetch_episode(&self, _slug: &str) -> TransportResult {
            Ok(self.episode.clone())
        }
    }

    fn catalog() -> Catalog<StaticTransport> {
        Catalog::with_transport(StaticTransport {
            show: json!({"show": {
                "id": "s-1",
                "name": "The Show",
                "episodes": [{"slug": "ep-2"}, {"slug": "ep-1"}]
            }}),
            episode: json!({"episode": {"slug": "ep-2", "title": "Ep. 2 - Second"}}),
        })
    }

    #[tokio::test]
    async fn test_show_info_text() {
        let out = show_info(&catalog(), "the-show", Output::Text).await.unwrap();
        assert!(out.contains("id:          s-1"));
        assert!(out.contains("name:        The Show"));
        assert!(out.contains("seasons:     0"));
    }

    #[tokio::test]
    async fn test_show_episodes_text_lines() {
        let out = show_episodes(&catalog(), "the-show", Output::Text).await.unwrap();
        assert_eq!(
            out,
            "https://www.dailywire.com/episode/ep-2\t-\nhttps://www.dailywire.com/episode/ep-1\t-"
        );
    }

    #[tokio::test]
    async fn test_show_episodes_json() {
        let out = show_episodes(&catalog(), "the-show", Output::Json).await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["slug"], "ep-2");
        assert_eq!(parsed[1]["seasonSlug"], Value::Null);
    }

    #[tokio::test]
    async fn test_episode_info_text() {
        let out = episode_info(&catalog(), "ep-2", Output::Text).await.unwrap();
        assert!(out.contains("title:    Ep. 2 - Second"));
        assert!(out.contains("episode:  2"));
    }

    #[tokio::test]
    async fn test_show_raw_is_json() {
        let out = show_raw(&catalog(), "the-show").await.unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["show"]["id"], "s-1");
    }

    #[tokio::test]
    async fn test_blank_slug_is_reported() {
        let err = episode_info(&catalog(), "  ", Output::Text).await.unwrap_err();
        assert!(err.to_string().contains("failed to describe episode"));
    }
}
