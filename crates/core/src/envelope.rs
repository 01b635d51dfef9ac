//! Normalization of backend response envelopes.
//!
//! List endpoints answer in several shapes: a bare array, `{ <key>: [...] }`,
//! `{ data: [...] }` or `{ items: [...] }`, with `totalPages` sometimes
//! missing.  Everything is mapped onto [`Page`] here; anything else is a
//! [`CoreError::Parse`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;

/// Keys tried after the resource's own envelope key.
const FALLBACK_KEYS: &[&str] = &["data", "items"];

/// One page of a listing in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page number echoed by the backend, if it sent one.
    pub current_page: Option<u32>,
    /// Always at least 1; absent means a single page.
    pub total_pages: u32,
}

/// Map a list response onto a [`Page`].
pub fn normalize_listing<T: DeserializeOwned>(value: Value, key: &str) -> Result<Page<T>, CoreError> {
    match value {
        Value::Array(items) => Ok(Page {
            items: decode_items(items, key)?,
            current_page: None,
            total_pages: 1,
        }),
        Value::Object(mut map) => {
            let items = std::iter::once(key)
                .chain(FALLBACK_KEYS.iter().copied())
                .find_map(|k| match map.remove(k) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .ok_or_else(|| {
                    CoreError::Parse(format!(
                        "expected an array under '{key}', 'data' or 'items'"
                    ))
                })?;

            let total_pages = map.get("totalPages").and_then(page_number).unwrap_or(1);
            let current_page = map
                .get("currentPage")
                .or_else(|| map.get("page"))
                .and_then(page_number);

            Ok(Page {
                items: decode_items(items, key)?,
                current_page,
                total_pages,
            })
        }
        other => Err(CoreError::Parse(format!(
            "expected a list or an object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Map a single-record response onto `T`, unwrapping `{ data: T }`.
pub fn normalize_record<T: DeserializeOwned>(value: Value) -> Result<T, CoreError> {
    let inner = match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| CoreError::Parse(format!("invalid record: {e}")))
}

/// Pull the backend's `message` (or `error`) string out of an error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|k| value.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>, key: &str) -> Result<Vec<T>, CoreError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| CoreError::Parse(format!("invalid {key} item at index {i}: {e}")))
        })
        .collect()
}

/// A positive page number from a JSON number or numeric string.
fn page_number(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
