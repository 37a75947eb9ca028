//! Next-page detection for undeclared pagination styles
//!
//! The Middleware API does not say whether a listing is cursor-based or
//! page-numbered, so the continuation is inferred from whatever fields the
//! response happens to carry.

use serde_json::{Map, Value};

use crate::types::PageParams;

/// Propose the parameters for fetching the page after `doc`.
///
/// The document is searched depth-first in pre-order. At each object the
/// rules below are tried in order and the first hit anywhere wins:
///
/// 1. `nextCursor` non-empty string
/// 2. `endCursor` non-empty string with sibling `hasNextPage: true`
/// 3. `cursor` non-empty string with sibling `hasNext: true` or `hasMore: true`
/// 4. `nextPage` positive integer
/// 5. integer `page` and `totalPages` siblings with `page < totalPages`
///
/// Rules 1-3 yield `{cursor: ...}`, rules 4-5 yield `{page: ...}`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wireloft_core::parser::find_next_page;
/// use wireloft_core::types::PageParams;
///
/// let page = json!({"data": {"pageInfo": {"endCursor": "abc", "hasNextPage": true}}});
/// assert_eq!(find_next_page(&page), Some(PageParams::cursor("abc")));
///
/// let last = json!({"page": 3, "totalPages": 3});
/// assert_eq!(find_next_page(&last), None);
/// ```
pub fn find_next_page(doc: &Value) -> Option<PageParams> {
    match doc {
        Value::Object(obj) => next_from_object(obj).or_else(|| obj.values().find_map(find_next_page)),
        Value::Array(items) => items.iter().find_map(find_next_page),
        _ => None,
    }
}

/// Apply the rules to a single object, ignoring its children.
fn next_from_object(obj: &Map<String, Value>) -> Option<PageParams> {
    if let Some(cursor) = non_empty_str(obj, "nextCursor") {
        return Some(PageParams::cursor(cursor));
    }
    if let Some(cursor) = non_empty_str(obj, "endCursor") {
        if is_true(obj, "hasNextPage") {
            return Some(PageParams::cursor(cursor));
        }
    }
    if let Some(cursor) = non_empty_str(obj, "cursor") {
        if is_true(obj, "hasNext") || is_true(obj, "hasMore") {
            return Some(PageParams::cursor(cursor));
        }
    }
    if let Some(next) = obj.get("nextPage").and_then(Value::as_i64) {
        if next > 0 {
            return Some(PageParams::page(next));
        }
    }
    let page = obj.get("page").and_then(Value::as_i64);
    let total = obj.get("totalPages").and_then(Value::as_i64);
    if let (Some(page), Some(total)) = (page, total) {
        if page < total {
            return Some(PageParams::page(page + 1));
        }
    }
    None
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Only a literal boolean `true` counts; `"true"` or `1` do not.
fn is_true(obj: &Map<String, Value>, key: &str) -> bool {
    matches!(obj.get(key), Some(Value::Bool(true)))
}
