//! Data Transfer Objects - request types for the API.
//!
//! Every field is optional on the wire so that blank or absent values reach
//! domain validation instead of failing JSON decoding.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /api/posts`.
///
/// Text fields also accept numbers and booleans, which are stored as their
/// JSON text. Arrays and objects are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub author: Option<String>,
    /// `YYYY-MM-DD`; defaults to today.
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
}

/// Body of `PUT /api/posts/{id}`. Blank or absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub search: Option<String>,
    /// One of `title`, `content`, `author`, `date`.
    pub sort: Option<String>,
    /// `asc` (default) or `desc`.
    pub direction: Option<String>,
}

/// Query string of `GET /api/posts/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPostsQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Read a JSON scalar as text; `null` counts as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected text, found {}",
            match other {
                Value::Array(_) => "an array",
                _ => "an object",
            }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_become_text() {
        let req: CreatePostRequest =
            serde_json::from_value(json!({"title": 5, "content": true, "author": null}))
                .unwrap();

        assert_eq!(req.title.as_deref(), Some("5"));
        assert_eq!(req.content.as_deref(), Some("true"));
        assert_eq!(req.author, None);
        assert_eq!(req.date, None);
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let result = serde_json::from_value::<UpdatePostRequest>(json!({"title": ["a"]}));
        assert!(result.is_err());

        let result = serde_json::from_value::<UpdatePostRequest>(json!({"date": {"y": 2024}}));
        assert!(result.is_err());
    }
}
