//! Response normalization
//!
//! The backend wraps payloads inconsistently: a list of recipes may arrive
//! as `{data: {data: {recipes: [...]}}}`, `{data: {recipes: [...]}}`,
//! `{data: [...]}` or a bare array. This module resolves the payload with a
//! fixed precedence and then reshapes each entity into a stable view model.
//!
//! Collection precedence (first JSON array wins, otherwise empty):
//!
//! 1. `data.data.<collection>`
//! 2. `data.<collection>`
//! 3. `<collection>`
//! 4. `data.data`
//! 5. `data`
//! 6. the value itself
//!
//! Entity precedence is the same list, with the first JSON object winning.

mod recipe;
mod user;

pub use recipe::{
    format_cook_time, format_date, normalize_recipe, normalize_recipe_with_author,
    normalize_recipes, normalize_recipes_with_author, Recipe, DEFAULT_AUTHOR, DEFAULT_COOK_TIME,
};
pub use user::{normalize_auth_grant, normalize_profile, normalize_user, AuthGrant, UserProfile};

use serde_json::Value;

/// Candidate locations for a named payload, in precedence order
fn candidates<'a>(raw: &'a Value, name: &str) -> [Option<&'a Value>; 6] {
    let data = raw.get("data");
    let nested = data.and_then(|d| d.get("data"));
    [
        nested.and_then(|n| n.get(name)),
        data.and_then(|d| d.get(name)),
        raw.get(name),
        nested,
        data,
        Some(raw),
    ]
}

/// Resolve a list payload such as `recipes` from any envelope
pub fn resolve_collection<'a>(raw: &'a Value, collection: &str) -> &'a [Value] {
    candidates(raw, collection)
        .into_iter()
        .flatten()
        .find_map(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Resolve a single entity payload such as `recipe` from any envelope
pub fn resolve_entity<'a>(raw: &'a Value, entity: &str) -> Option<&'a Value> {
    candidates(raw, entity)
        .into_iter()
        .flatten()
        .find(|v| v.is_object())
}

/// Read a string field; numbers are rendered as text, empty strings count as absent
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `id`, else `_id`
pub(crate) fn id_field(value: &Value) -> Option<String> {
    string_field(value, "id").or_else(|| string_field(value, "_id"))
}

/// Read a boolean flag, absent meaning false
pub(crate) fn flag_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

/// Read an array of strings, skipping non-string items
pub(crate) fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
