//! Show page mapper
//!
//! Locates the show object inside a show page and normalizes its
//! inconsistent field names into a `ShowInfo`.

use serde_json::{Map, Value};

use crate::error::{Result, WireError};
use crate::types::{SeasonInfo, ShowInfo};

use super::fields::{first_text, first_truthy, lookup};

/// Where the show object may live, tried in order.
const SHOW_PATHS: &[&[&str]] = &[&["show"], &["data", "show"], &["payload", "show"], &[]];

const NAME_KEYS: &[&str] = &["name", "title"];
const DESCRIPTION_KEYS: &[&str] = &["description", "summary"];
const IMAGE_KEYS: &[&str] = &["image", "thumbnail", "coverImage"];
const SEASON_LIST_KEYS: &[&str] = &["seasons", "seasonList", "seasonGroups"];

const SEASON_ID_KEYS: &[&str] = &["id", "seasonId", "uuid", "slug"];
const SEASON_SLUG_KEYS: &[&str] = &["slug", "code", "name"];
const SEASON_NAME_KEYS: &[&str] = &["name", "title"];

/// Identifier used when a show carries neither an id nor a slug
pub const UNKNOWN_SHOW_ID: &str = "unknown";

/// Map a show page to a canonical show descriptor.
///
/// # Returns
/// * `Ok(ShowInfo)` - the id is always populated
/// * `Err(WireError::ShowNotFound)` - no candidate location holds an object
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wireloft_core::parser::map_show;
///
/// let page = json!({"data": {"show": {"slug": "what-we-saw", "title": "What We Saw"}}});
/// let show = map_show(&page).unwrap();
/// assert_eq!(show.id, "what-we-saw");
/// assert_eq!(show.name.as_deref(), Some("What We Saw"));
/// ```
pub fn map_show(doc: &Value) -> Result<ShowInfo> {
    let show = locate_show(doc)
        .ok_or_else(|| WireError::ShowNotFound("no show object in response".to_string()))?;

    let page_obj = doc.as_object();
    let slug = first_text(show, &["slug"])
        .or_else(|| page_obj.and_then(|page| first_text(page, &["slug"])));
    let id = first_text(show, &["id"])
        .or(slug)
        .unwrap_or_else(|| UNKNOWN_SHOW_ID.to_string());

    // The first truthy candidate decides; a non-list there means no seasons.
    let seasons = first_truthy(show, SEASON_LIST_KEYS)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(map_season).collect())
        .unwrap_or_default();

    Ok(ShowInfo {
        id,
        name: first_text(show, NAME_KEYS),
        description: first_text(show, DESCRIPTION_KEYS),
        image: first_text(show, IMAGE_KEYS),
        seasons,
    })
}

/// Map one season entry, or `None` when it cannot be queried.
///
/// A season needs both an id-like and a slug-like value. The display name
/// falls back to the slug.
pub fn map_season(entry: &Value) -> Option<SeasonInfo> {
    let season = entry.as_object()?;
    let id = first_text(season, SEASON_ID_KEYS)?;
    let slug = first_text(season, SEASON_SLUG_KEYS)?;
    let name = first_text(season, SEASON_NAME_KEYS).or_else(|| Some(slug.clone()));
    Some(SeasonInfo { id, name, slug })
}

fn locate_show(doc: &Value) -> Option<&Map<String, Value>> {
    SHOW_PATHS
        .iter()
        .find_map(|path| lookup(doc, path).and_then(Value::as_object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_show_top_level() {
        let doc = json!({
            "show": {
                "id": "s1",
                "slug": "s1",
                "title": "Show One",
                "seasons": [{"id": "1", "slug": "season-1"}]
            }
        });
        let show = map_show(&doc).unwrap();
        assert_eq!(
            show,
            ShowInfo {
                id: "s1".to_string(),
                name: Some("Show One".to_string()),
                description: None,
                image: None,
                seasons: vec![SeasonInfo {
                    id: "1".to_string(),
                    name: Some("season-1".to_string()),
                    slug: "season-1".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_map_show_nested_payload() {
        let doc = json!({"payload": {"show": {"id": 99, "name": "Payload Show"}}});
        let show = map_show(&doc).unwrap();
        assert_eq!(show.id, "99");
        assert_eq!(show.name.as_deref(), Some("Payload Show"));
    }

    #[test]
    fn test_map_show_prefers_data_over_payload() {
        let doc = json!({
            "payload": {"show": {"id": "from-payload"}},
            "data": {"show": {"id": "from-data"}}
        });
        assert_eq!(map_show(&doc).unwrap().id, "from-data");
    }

    #[test]
    fn test_map_show_skips_non_object_candidates() {
        let doc = json!({"show": "not-a-map", "data": {"show": {"id": "real"}}});
        assert_eq!(map_show(&doc).unwrap().id, "real");
    }

    #[test]
    fn test_map_show_document_itself() {
        let doc = json!({"title": "Bare", "summary": "About", "coverImage": "https://img/c.jpg"});
        let show = map_show(&doc).unwrap();
        assert_eq!(show.id, UNKNOWN_SHOW_ID);
        assert_eq!(show.name.as_deref(), Some("Bare"));
        assert_eq!(show.description.as_deref(), Some("About"));
        assert_eq!(show.image.as_deref(), Some("https://img/c.jpg"));
    }

    #[test]
    fn test_map_show_id_falls_back_to_page_slug() {
        let doc = json!({"slug": "page-slug", "show": {"title": "T"}});
        assert_eq!(map_show(&doc).unwrap().id, "page-slug");
    }

    #[test]
    fn test_map_show_image_chain() {
        let doc = json!({"show": {"id": "x", "image": "", "thumbnail": "https://img/t.jpg"}});
        assert_eq!(map_show(&doc).unwrap().image.as_deref(), Some("https://img/t.jpg"));
    }

    #[test]
    fn test_map_show_not_found() {
        assert!(matches!(map_show(&json!([1, 2, 3])), Err(WireError::ShowNotFound(_))));
        assert!(matches!(map_show(&json!("show")), Err(WireError::ShowNotFound(_))));
    }

    #[test]
    fn test_map_show_season_list_fallbacks() {
        let doc = json!({"show": {
            "id": "x",
            "seasons": [],
            "seasonGroups": [{"seasonId": "g1", "code": "group-1", "title": "Group One"}]
        }});
        let show = map_show(&doc).unwrap();
        assert_eq!(
            show.seasons,
            vec![SeasonInfo {
                id: "g1".to_string(),
                name: Some("Group One".to_string()),
                slug: "group-1".to_string(),
            }]
        );
    }

    #[test]
    fn test_map_show_drops_unusable_seasons() {
        let doc = json!({"show": {"id": "x", "seasons": [
            {"title": "No keys"},
            "not-an-object",
            {"uuid": "u-1", "name": "Named"},
            {"slug": "only-slug"}
        ]}});
        let seasons = map_show(&doc).unwrap().seasons;
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].id, "u-1");
        assert_eq!(seasons[0].slug, "Named");
        assert_eq!(seasons[1].id, "only-slug");
        assert_eq!(seasons[1].slug, "only-slug");
    }

    #[test]
    fn test_map_show_non_list_seasons_does_not_fall_through() {
        let doc = json!({"show": {
            "id": "x",
            "seasons": {"k": 1},
            "seasonList": [{"id": "1", "slug": "s"}]
        }});
        assert!(map_show(&doc).unwrap().seasons.is_empty());
    }

    #[test]
    fn test_map_show_seasons_not_a_list() {
        let doc = json!({"show": {"id": "x", "seasons": {"id": "1", "slug": "s"}}});
        assert!(map_show(&doc).unwrap().seasons.is_empty());
    }
}
