//! User, profile and auth grant view models

use super::{id_field, resolve_entity, string_field};
use masakin_core::session::UserSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Credentials returned by login or register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Bearer token (`accessToken`, or `token` on older backends)
    pub token: String,
    /// The signed-in user
    pub user: UserSummary,
}

/// Public profile with counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user: UserSummary,
    pub recipe_count: u64,
    pub followers: u64,
    pub following: u64,
}

/// Normalize a raw user object; `None` without an `id`/`_id`
pub fn normalize_user(raw: &Value) -> Option<UserSummary> {
    if !raw.is_object() {
        return None;
    }
    Some(UserSummary {
        id: id_field(raw)?,
        name: string_field(raw, "name")
            .or_else(|| string_field(raw, "username"))
            .unwrap_or_default(),
        avatar: string_field(raw, "avatar"),
        bio: string_field(raw, "bio"),
        email: string_field(raw, "email"),
    })
}

/// Resolve and normalize a profile response
pub fn normalize_profile(raw: &Value) -> Option<UserProfile> {
    let entity = resolve_entity(raw, "user")?;
    let user = normalize_user(entity)?;
    Some(UserProfile {
        user,
        recipe_count: count_field(entity, &["recipesCount", "recipeCount", "recipes"]),
        followers: count_field(entity, &["followersCount", "followerCount", "followers"]),
        following: count_field(entity, &["followingCount", "following"]),
    })
}

/// Resolve the token and user from a login/register response
///
/// The payload sits under `data` when present, else at the top level.
pub fn normalize_auth_grant(raw: &Value) -> Option<AuthGrant> {
    let data = raw.get("data").filter(|d| d.is_object()).unwrap_or(raw);
    let token = string_field(data, "accessToken").or_else(|| string_field(data, "token"))?;
    let user = data.get("user").and_then(normalize_user)?;
    Some(AuthGrant { token, user })
}

/// First counter found: a number, or the length of an array
fn count_field(raw: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| match raw.get(*key)? {
            Value::Number(n) => n.as_u64(),
            Value::Array(items) => Some(items.len() as u64),
            _ => None,
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_aliasing() {
        let a = normalize_user(&json!({"id": "1", "name": "Rina"})).unwrap();
        let b = normalize_user(&json!({"_id": "1", "name": "Rina"})).unwrap();
        assert_eq!(a, b);
        assert!(normalize_user(&json!({"name": "nobody"})).is_none());
        assert!(normalize_user(&json!("u1")).is_none());
    }

    #[test]
    fn test_auth_grant_access_token() {
        let raw = json!({"success": true, "data": {"accessToken": "jwt", "user": {"_id": "u1", "name": "Rina"}}});
        let grant = normalize_auth_grant(&raw).unwrap();
        assert_eq!(grant.token, "jwt");
        assert_eq!(grant.user.id, "u1");
    }

    #[test]
    fn test_auth_grant_legacy_token_field() {
        let raw = json!({"token": "old", "user": {"id": "u2", "name": "Budi"}});
        let grant = normalize_auth_grant(&raw).unwrap();
        assert_eq!(grant.token, "old");
        assert_eq!(grant.user.name, "Budi");
    }

    #[test]
    fn test_auth_grant_requires_token_and_user() {
        assert!(normalize_auth_grant(&json!({"data": {"user": {"id": "u"}}})).is_none());
        assert!(normalize_auth_grant(&json!({"data": {"token": "t"}})).is_none());
    }

    #[test]
    fn test_profile_counters() {
        let raw = json!({"data": {"user": {
            "_id": "u1",
            "name": "Rina",
            "bio": "Home cook",
            "followers": ["a", "b", "c"],
            "followingCount": 4,
            "recipesCount": 12
        }}});
        let profile = normalize_profile(&raw).unwrap();
        assert_eq!(profile.user.bio.as_deref(), Some("Home cook"));
        assert_eq!(profile.followers, 3);
        assert_eq!(profile.following, 4);
        assert_eq!(profile.recipe_count, 12);
    }

    #[test]
    fn test_profile_without_counters() {
        let profile = normalize_profile(&json!({"data": {"id": "u1", "name": "Rina"}})).unwrap();
        assert_eq!(profile.followers, 0);
        assert_eq!(profile.recipe_count, 0);
    }
}
