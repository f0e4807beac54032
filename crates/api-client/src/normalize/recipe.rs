//! Recipe view model

use super::{flag_field, id_field, resolve_collection, string_field, string_list};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author label when the author relation is missing
pub const DEFAULT_AUTHOR: &str = "Unknown Chef";

/// Cook time label when the recipe has no cooking time
pub const DEFAULT_COOK_TIME: &str = "15 min";

const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A recipe as the client displays it
///
/// Serializing a `Recipe` and normalizing the result yields the same
/// `Recipe`, so view models can be fed back through the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Resolved from `id` or `_id`
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// First entry of `images`, or empty
    pub image: String,
    /// Creation date as `M/D/YYYY`
    pub date: String,
    /// e.g. `"25 min"`
    pub cook_time: String,
    /// Author display name
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// All image URLs as sent by the backend
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub is_reacted: bool,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub is_following_author: bool,
}

/// Normalize a raw recipe with the default author label
pub fn normalize_recipe(raw: &Value) -> Recipe {
    normalize_recipe_with_author(raw, DEFAULT_AUTHOR)
}

/// Normalize a raw recipe, using `author_fallback` when no author is present
pub fn normalize_recipe_with_author(raw: &Value, author_fallback: &str) -> Recipe {
    let images = string_list(raw, "images");
    let image = images
        .first()
        .cloned()
        .or_else(|| string_field(raw, "image"))
        .unwrap_or_default();

    let created = raw.get("createdAt").and_then(parse_timestamp);
    let created_at = match raw.get("createdAt") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => created.map(|dt| dt.to_rfc3339()),
    };
    let date = created
        .map(format_date)
        .or_else(|| string_field(raw, "date"))
        .unwrap_or_else(|| Local::now().format(DATE_FORMAT).to_string());

    let cooking_time = raw.get("cookingTime").and_then(parse_minutes);
    let cook_time = cooking_time
        .map(format_cook_time)
        .or_else(|| string_field(raw, "cookTime"))
        .unwrap_or_else(|| DEFAULT_COOK_TIME.to_string());

    let author_relation = raw.get("author").filter(|a| a.is_object());
    let author = author_relation
        .and_then(|a| string_field(a, "name"))
        .or_else(|| {
            raw.get("author")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| author_fallback.to_string());
    let author_id = author_relation
        .and_then(id_field)
        .or_else(|| string_field(raw, "authorId"));

    let is_following_author = author_relation
        .and_then(|a| flag_field(a, "isFollowing"))
        .or_else(|| flag_field(raw, "isFollowing"))
        .or_else(|| flag_field(raw, "isFollowingAuthor"))
        .unwrap_or(false);

    Recipe {
        id: id_field(raw).unwrap_or_default(),
        title: string_field(raw, "title").unwrap_or_default(),
        description: string_field(raw, "description").unwrap_or_default(),
        category: string_field(raw, "category").unwrap_or_default(),
        image,
        date,
        cook_time,
        author,
        author_id,
        ingredients: string_list(raw, "ingredients"),
        steps: string_list(raw, "steps"),
        video_url: string_field(raw, "videoUrl"),
        images,
        created_at,
        cooking_time,
        is_reacted: flag_field(raw, "isReacted").unwrap_or(false),
        is_saved: flag_field(raw, "isSaved").unwrap_or(false),
        is_following_author,
    }
}

/// Resolve the `recipes` collection from any envelope and normalize each entry
pub fn normalize_recipes(raw: &Value) -> Vec<Recipe> {
    normalize_recipes_with_author(raw, DEFAULT_AUTHOR)
}

/// Like [`normalize_recipes`] with a custom author fallback
pub fn normalize_recipes_with_author(raw: &Value, author_fallback: &str) -> Vec<Recipe> {
    resolve_collection(raw, "recipes")
        .iter()
        .filter(|r| r.is_object())
        .map(|r| normalize_recipe_with_author(r, author_fallback))
        .collect()
}

/// `"<minutes> min"`
pub fn format_cook_time(minutes: u32) -> String {
    format!("{minutes} min")
}

/// Local calendar date as `M/D/YYYY`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

/// RFC 3339 text, a plain `YYYY-MM-DD` date, or epoch milliseconds
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(12, 0, 0))
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Positive minutes from a number or numeric string; zero counts as absent
fn parse_minutes(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map(|f| f.round() as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(minutes).ok().filter(|m| *m > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn full_raw() -> Value {
        json!({
            "_id": "65f1c0ffee",
            "title": "Nasi Goreng Kampung",
            "description": "Village-style fried rice",
            "category": "Dinner",
            "images": ["https://cdn.masakin.app/r/1.jpg", "https://cdn.masakin.app/r/2.jpg"],
            "createdAt": "2024-03-05T12:00:00Z",
            "cookingTime": 25,
            "author": {"_id": "u-7", "name": "Dewi", "isFollowing": true},
            "ingredients": ["rice", "shallots", "kecap manis"],
            "steps": ["Fry aromatics", "Add rice"],
            "videoUrl": "https://youtu.be/dQw4w9WgXcQ",
            "isReacted": true,
            "isSaved": false
        })
    }

    #[test]
    fn test_full_record() {
        let recipe = normalize_recipe(&full_raw());
        assert_eq!(recipe.id, "65f1c0ffee");
        assert_eq!(recipe.image, "https://cdn.masakin.app/r/1.jpg");
        assert_eq!(recipe.date, "3/5/2024");
        assert_eq!(recipe.cook_time, "25 min");
        assert_eq!(recipe.author, "Dewi");
        assert_eq!(recipe.author_id.as_deref(), Some("u-7"));
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.video_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert!(recipe.is_reacted);
        assert!(!recipe.is_saved);
        assert!(recipe.is_following_author);
    }

    #[test]
    fn test_defaults_for_sparse_record() {
        let recipe = normalize_recipe(&json!({"id": "r1", "title": "Es Teh"}));
        assert_eq!(recipe.image, "");
        assert_eq!(recipe.cook_time, DEFAULT_COOK_TIME);
        assert_eq!(recipe.author, DEFAULT_AUTHOR);
        assert!(recipe.author_id.is_none());
        assert_eq!(recipe.date, Local::now().format(DATE_FORMAT).to_string());
        assert!(recipe.created_at.is_none());
    }

    #[test]
    fn test_id_prefers_id_over_underscore_id() {
        let recipe = normalize_recipe(&json!({"id": "a", "_id": "b"}));
        assert_eq!(recipe.id, "a");
        let recipe = normalize_recipe(&json!({"_id": 17}));
        assert_eq!(recipe.id, "17");
    }

    #[test]
    fn test_cooking_time_variants() {
        assert_eq!(normalize_recipe(&json!({"cookingTime": "40"})).cook_time, "40 min");
        assert_eq!(normalize_recipe(&json!({"cookingTime": 0})).cook_time, "15 min");
        assert_eq!(normalize_recipe(&json!({"cookingTime": "soon"})).cook_time, "15 min");
        assert_eq!(normalize_recipe(&json!({"cookingTime": null})).cook_time, "15 min");
    }

    #[test]
    fn test_created_at_variants() {
        let plain = normalize_recipe(&json!({"createdAt": "2023-12-24"}));
        assert_eq!(plain.date, "12/24/2023");

        // 2024-01-15T12:00:00Z
        let millis = normalize_recipe(&json!({"createdAt": 1_705_320_000_000_i64}));
        assert_eq!(millis.date, "1/15/2024");
        assert!(millis.created_at.is_some());
    }

    #[test]
    fn test_author_fallbacks() {
        let missing = normalize_recipe_with_author(&json!({}), "Rina");
        assert_eq!(missing.author, "Rina");

        let unnamed = normalize_recipe(&json!({"author": {"_id": "u1"}, "authorId": "u2"}));
        assert_eq!(unnamed.author, DEFAULT_AUTHOR);
        assert_eq!(unnamed.author_id.as_deref(), Some("u1"));

        let flat = normalize_recipe(&json!({"authorId": "u2", "isFollowing": true}));
        assert_eq!(flat.author_id.as_deref(), Some("u2"));
        assert!(flat.is_following_author);
    }

    #[test]
    fn test_normalizing_view_model_is_noop() {
        let once = normalize_recipe(&full_raw());
        let twice = normalize_recipe(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);

        let sparse = normalize_recipe(&json!({"_id": "x"}));
        let again = normalize_recipe(&serde_json::to_value(&sparse).unwrap());
        assert_eq!(sparse, again);
    }

    #[test]
    fn test_normalize_recipes_from_envelope() {
        let raw = json!({"data": {"recipes": [full_raw(), "junk", {"id": "r2"}]}});
        let recipes = normalize_recipes(&raw);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].id, "r2");
    }

    fn arb_raw() -> impl Strategy<Value = Value> {
        (
            prop_oneof![Just("id"), Just("_id")],
            "[a-f0-9]{6,12}",
            prop::collection::vec("https://cdn/[a-z]{1,8}\\.jpg", 0..4),
            prop::option::of(1u32..600),
            prop::option::of(prop_oneof![
                Just("2024-03-05T12:00:00Z"),
                Just("2022-07-01T08:30:00+07:00"),
                Just("2021-01-31")
            ]),
            prop::option::of("[A-Za-z ]{1,16}"),
            any::<bool>(),
        )
            .prop_map(|(id_key, id, images, minutes, created, author, saved)| {
                let mut raw = json!({"title": "T", "isSaved": saved});
                raw[id_key] = json!(id);
                if !images.is_empty() {
                    raw["images"] = json!(images);
                }
                if let Some(m) = minutes {
                    raw["cookingTime"] = json!(m);
                }
                if let Some(c) = created {
                    raw["createdAt"] = json!(c);
                }
                if let Some(name) = author {
                    raw["author"] = json!({"_id": "u", "name": name});
                }
                raw
            })
    }

    proptest! {
        #[test]
        fn prop_normalization_is_idempotent(raw in arb_raw()) {
            let once = normalize_recipe(&raw);
            let twice = normalize_recipe(&serde_json::to_value(&once).unwrap());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_image_is_first_or_empty(raw in arb_raw()) {
            let recipe = normalize_recipe(&raw);
            match raw.get("images").and_then(Value::as_array) {
                Some(images) => prop_assert_eq!(Some(recipe.image.as_str()), images[0].as_str()),
                None => prop_assert_eq!(recipe.image, ""),
            }
        }

        #[test]
        fn prop_id_always_resolved(raw in arb_raw()) {
            prop_assert!(!normalize_recipe(&raw).id.is_empty());
        }

        #[test]
        fn prop_cook_time_placeholder_only_when_absent(raw in arb_raw()) {
            let recipe = normalize_recipe(&raw);
            match raw.get("cookingTime").and_then(Value::as_u64) {
                Some(m) => prop_assert_eq!(recipe.cook_time, format!("{m} min")),
                None => prop_assert_eq!(recipe.cook_time, DEFAULT_COOK_TIME),
            }
        }
    }
}
