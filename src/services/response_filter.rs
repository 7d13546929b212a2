//! Trims Qiita API responses before they are handed to the agent.
//!
//! Filtering is a denylist: anything not named here passes through, so new
//! fields added by Qiita keep flowing without code changes.

use serde_json::{Map, Value};

/// Rendered HTML duplicate of `body`.
pub const ARTICLE_DENYLIST: &[&str] = &["rendered_body"];

/// List responses also drop the markdown body; detail fetches keep it.
pub const ARTICLE_LIST_DENYLIST: &[&str] = &["rendered_body", "body"];

pub const USER_DENYLIST: &[&str] = &[
    "facebook_id",
    "followees_count",
    "followers_count",
    "github_login_name",
    "profile_image_url",
    "team_only",
    "twitter_screen_name",
    "website_url",
];

/// Copy of `record` without `fields`. Non-objects are returned as-is.
pub fn omit(record: &Value, fields: &[&str]) -> Value {
    match record {
        Value::Object(map) => Value::Object(omit_map(map, fields)),
        other => other.clone(),
    }
}

fn omit_map(map: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn filter_with(record: &Value, top_level: &[&str]) -> Value {
    let mut out = omit(record, top_level);
    if let Some(user) = out.get_mut("user") {
        if user.is_object() {
            *user = omit(user, USER_DENYLIST);
        }
    }
    out
}

pub fn filter_single_article(record: &Value) -> Value {
    filter_with(record, ARTICLE_DENYLIST)
}

pub fn filter_article_list(records: &[Value]) -> Vec<Value> {
    records
        .iter()
        .map(|record| filter_with(record, ARTICLE_LIST_DENYLIST))
        .collect()
}
