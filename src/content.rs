//! Generic resolution primitives shared by every section resolver.
//!
//! Resolution turns a raw, possibly absent or malformed JSON value into a
//! fully populated typed value. It never fails:
//!
//! - **Missing** key or field → the named default.
//! - **Falsy** field (`""`, `0`, `false`, `null`) → the named default.
//! - **Malformed** value (an object where a list was expected, a number
//!   where an object was expected) → treated exactly like missing.
//!
//! List resolution additionally filters to active items, stably sorts by
//! `order`, and falls back to a built-in exemplar list when nothing is left
//! so a section is never rendered empty.

use crate::store::ConfigStore;
use crate::types::{Activity, ListItem};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Borrowed view over an optional JSON object with defaulting accessors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    object: Option<&'a serde_json::Map<String, Value>>,
}

impl<'a> Fields<'a> {
    /// Wrap a value; anything other than an object behaves as empty.
    pub fn of(value: Option<&'a Value>) -> Self {
        Self {
            object: value.and_then(Value::as_object),
        }
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.and_then(|o| o.get(field))
    }

    /// Nested object field, empty when absent or not an object.
    pub fn nested(&self, field: &str) -> Fields<'a> {
        Fields::of(self.get(field))
    }

    /// Text field when present and truthy.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text_or(&self, field: &str, default: &str) -> String {
        self.text(field).unwrap_or_else(|| default.to_string())
    }

    /// Boolean flag with JavaScript truthiness; absent is `false`.
    pub fn flag(&self, field: &str) -> bool {
        match self.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// The object's own `isActive` soft-delete flag.
    pub fn activity(&self) -> Activity {
        match self.get("isActive") {
            None | Some(Value::Null) => Activity::Unset,
            Some(Value::Bool(false)) => Activity::Inactive,
            Some(_) => Activity::Active,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.object.is_none_or(|o| o.is_empty())
    }
}

/// Typed content built from one configuration value.
pub trait FromFields: Sized {
    fn from_fields(fields: Fields<'_>) -> Self;
}

/// Look up `key` and project it into `T`, substituting defaults for every
/// gap. An absent key resolves to `T`'s documented default content.
pub fn resolve<T: FromFields>(store: &ConfigStore, key: &str) -> T {
    T::from_fields(Fields::of(store.get(key)))
}

/// Split a free-text body on line breaks into ordered paragraphs.
///
/// An absent or empty body yields the single `placeholder` paragraph.
/// Interior blank lines are kept.
pub fn paragraphs(body: Option<&str>, placeholder: &str) -> Vec<String> {
    let body = match body {
        Some(b) if !b.is_empty() => b,
        _ => placeholder,
    };
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Decode the elements of a JSON array into `T`, skipping elements that do
/// not decode. A non-array value decodes to an empty list.
pub fn decode_items<T: DeserializeOwned>(raw: Option<&Value>) -> Vec<T> {
    let Some(items) = raw.and_then(Value::as_array) else {
        if let Some(other) = raw.filter(|v| !v.is_null()) {
            warn!(kind = json_kind(other), "expected a list, treating as empty");
        }
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(error = %e, "skipping malformed list item");
                None
            }
        })
        .collect()
}

/// Keep active items and sort them ascending by `order`.
///
/// The sort is stable: items with equal order keep their relative position.
pub fn active_ordered<T: ListItem>(mut items: Vec<T>) -> Vec<T> {
    items.retain(|item| item.activity().is_active());
    items.sort_by(|a, b| a.order().total_cmp(&b.order()));
    items
}

/// Full list resolution: decode, filter, sort, and fall back to `fallback`
/// when the result is empty.
pub fn resolve_list<T, F>(raw: Option<&Value>, fallback: F) -> Vec<T>
where
    T: ListItem + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    let items = active_ordered(decode_items(raw));
    if items.is_empty() { fallback() } else { items }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
