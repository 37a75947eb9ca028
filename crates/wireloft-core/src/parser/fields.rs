//! Ordered fallback chains over untyped JSON objects
//!
//! Every "prefer field A, else B, else C" rule in the mappers is expressed
//! as a key list evaluated left to right.

use serde_json::{Map, Value};

/// Scalar text of a value, if it has a usable one.
///
/// Strings count when non-empty after trimming; numbers are rendered in
/// their JSON form. Everything else is treated as missing.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First key in `keys` whose value yields usable text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wireloft_core::parser::fields::first_text;
///
/// let show = json!({"name": "", "title": "Show One"});
/// let name = first_text(show.as_object().unwrap(), &["name", "title"]);
/// assert_eq!(name.as_deref(), Some("Show One"));
/// ```
pub fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key).and_then(text_of))
}

/// First key in `keys` holding a JSON object.
pub fn first_map<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|key| obj.get(*key).and_then(Value::as_object))
}

/// First key in `keys` whose value is truthy, whatever its type.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are skipped. Callers check the
/// type of the returned value themselves, so a truthy value of the wrong
/// type ends the chain instead of falling through.
pub fn first_truthy<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key).filter(|value| is_truthy(value)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Follow a path of object keys from `value`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}
