use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, FieldErrors};

/// Integer post identifier, assigned by the repository.
pub type PostId = u64;

/// Author recorded when none is supplied.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Calendar date format accepted on input and produced on output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Post entity - a single blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Post {
    /// Attach an id to validated fields.
    pub fn new(id: PostId, fields: NewPost) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            author: fields.author,
            date: fields.date,
        }
    }

    /// Overwrite every field the patch carries; leave the rest untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }
}

/// Validated fields of a post that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: Option<NaiveDate>,
}

impl NewPost {
    /// A post by the default author with no date, as used for seed data.
    pub fn undated(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: DEFAULT_AUTHOR.to_string(),
            date: None,
        }
    }
}

/// Raw create input, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl PostDraft {
    /// Check required fields and fill in defaults.
    ///
    /// Every failing field is reported at once. A blank author becomes
    /// [`DEFAULT_AUTHOR`] and a blank date becomes `today`.
    pub fn validate(self, today: NaiveDate) -> Result<NewPost, DomainError> {
        let mut errors = FieldErrors::default();

        let title = non_blank(self.title);
        if title.is_none() {
            errors.missing.push("title");
        }
        let content = non_blank(self.content);
        if content.is_none() {
            errors.missing.push("content");
        }
        let date = match non_blank(self.date) {
            Some(raw) => {
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    errors.invalid.push("date");
                }
                parsed
            }
            None => Some(today),
        };

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => Ok(NewPost {
                title,
                content,
                author: non_blank(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                date,
            }),
            _ => Err(DomainError::Validation(errors)),
        }
    }
}

/// Raw update input, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl PostChanges {
    /// Drop blank fields and parse the date.
    pub fn validate(self) -> Result<PostPatch, DomainError> {
        let date = match non_blank(self.date) {
            Some(raw) => Some(parse_date(&raw).ok_or_else(|| {
                DomainError::Validation(FieldErrors::invalid("date"))
            })?),
            None => None,
        };

        Ok(PostPatch {
            title: non_blank(self.title),
            content: non_blank(self.content),
            author: non_blank(self.author),
            date,
        })
    }
}

/// Validated update: `None` means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<NaiveDate>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none() && self.date.is_none()
    }
}

/// Parse a strict `YYYY-MM-DD` date. Surrounding whitespace is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // chrono tolerates padding, signs and short fields; the wire format does not
    let well_formed = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_fills_defaults() {
        let post = draft("Hello", "World").validate(today()).unwrap();
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.date, Some(today()));
    }

    #[test]
    fn test_draft_keeps_supplied_author_and_date() {
        let post = PostDraft {
            author: Some("Ada".to_string()),
            date: Some("2023-12-31".to_string()),
            ..draft("Hello", "World")
        }
        .validate(today())
        .unwrap();

        assert_eq!(post.author, "Ada");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn test_draft_reports_all_missing_fields() {
        let err = PostDraft {
            title: Some("   ".to_string()),
            ..Default::default()
        }
        .validate(today())
        .unwrap_err();

        match err {
            DomainError::Validation(fields) => {
                assert_eq!(fields.missing, vec!["title", "content"]);
                assert!(fields.invalid.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_draft_rejects_bad_date_alongside_missing_field() {
        let err = PostDraft {
            title: Some("Hello".to_string()),
            date: Some("09/03/2024".to_string()),
            ..Default::default()
        }
        .validate(today())
        .unwrap_err();

        match err {
            DomainError::Validation(fields) => {
                assert_eq!(fields.missing, vec!["content"]);
                assert_eq!(fields.invalid, vec!["date"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_author_falls_back_to_default() {
        let post = PostDraft {
            author: Some("  ".to_string()),
            date: Some("".to_string()),
            ..draft("Hello", "World")
        }
        .validate(today())
        .unwrap();

        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.date, Some(today()));
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert_eq!(parse_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-2-9"), None);
        assert_eq!(parse_date("2024-02-29T00:00"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024- 1-01"), None);
        assert_eq!(parse_date("2024-01- 1"), None);
        assert_eq!(parse_date("+2024-1-01"), None);
        assert_eq!(parse_date("2024/01/01"), None);
        assert_eq!(parse_date("２０２４-01-01"), None);
    }

    #[test]
    fn test_changes_ignore_blank_fields() {
        let patch = PostChanges {
            title: Some("".to_string()),
            content: Some("New content".to_string()),
            author: None,
            date: Some(" ".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(
            patch,
            PostPatch {
                content: Some("New content".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_all_blank_changes_make_an_empty_patch() {
        let patch = PostChanges {
            title: Some(" ".to_string()),
            author: Some("".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert!(patch.is_empty());
        assert!(
            !PostPatch {
                author: Some("Ada".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_changes_reject_invalid_date() {
        let err = PostChanges {
            date: Some("2024-13-01".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(f) if f.invalid == vec!["date"]));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut post = Post::new(1, NewPost::undated("Old title", "Old content"));
        post.apply(PostPatch {
            title: Some("New title".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        });

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "Old content");
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn test_post_serializes_date_as_calendar_string() {
        let mut post = Post::new(7, NewPost::undated("T", "C"));
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("date").is_none());

        post.date = NaiveDate::from_ymd_opt(2024, 5, 1);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["author"], "Unknown");
    }
}
