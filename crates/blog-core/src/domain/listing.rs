//! Search and sort over a snapshot of posts.
//!
//! Both operations work on an owned copy; the stored order is never touched.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::{DomainError, FieldErrors};

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "author" => Ok(Self::Author),
            "date" => Ok(Self::Date),
            _ => Err(DomainError::Validation(FieldErrors::invalid("sort"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::Validation(FieldErrors::invalid("direction"))),
        }
    }
}

/// Options for the main listing: free-text search plus an optional sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Lowercased search needle.
    pub search: Option<String>,
    pub sort: Option<SortField>,
    pub direction: SortDirection,
}

impl ListQuery {
    /// Build a query from raw request parameters.
    ///
    /// Blank values count as absent. An unknown sort field and an unknown
    /// direction are both reported in a single validation error.
    pub fn parse(
        search: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::default();

        let sort = match present(sort) {
            Some(raw) => raw.parse::<SortField>().map_err(|_| errors.invalid.push("sort")).ok(),
            None => None,
        };
        let direction = match present(direction) {
            Some(raw) => raw
                .parse::<SortDirection>()
                .map_err(|_| errors.invalid.push("direction"))
                .unwrap_or_default(),
            None => SortDirection::default(),
        };

        errors.into_result()?;

        Ok(Self {
            search: present(search).map(|s| s.trim().to_lowercase()),
            sort,
            direction,
        })
    }

    /// Filter then sort `posts`.
    pub fn apply(&self, mut posts: Vec<Post>) -> Vec<Post> {
        if let Some(needle) = &self.search {
            posts.retain(|post| matches_any_field(post, needle));
        }
        if let Some(field) = self.sort {
            let direction = self.direction;
            posts.sort_by(|a, b| compare(a, b, field, direction));
        }
        posts
    }
}

/// Title/content lookup behind `/api/posts/search`.
///
/// Unlike [`ListQuery`], each term is checked against its own field only and a
/// post matches when any supplied term does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSearch {
    title: Option<String>,
    content: Option<String>,
}

impl FieldSearch {
    pub fn new(title: Option<&str>, content: Option<&str>) -> Self {
        Self {
            title: present(title).map(|s| s.trim().to_lowercase()),
            content: present(content).map(|s| s.trim().to_lowercase()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        let title_hit = self
            .title
            .as_deref()
            .is_some_and(|needle| post.title.to_lowercase().contains(needle));
        let content_hit = self
            .content
            .as_deref()
            .is_some_and(|needle| post.content.to_lowercase().contains(needle));
        title_hit || content_hit
    }

    pub fn apply(&self, mut posts: Vec<Post>) -> Vec<Post> {
        posts.retain(|post| self.matches(post));
        posts
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn matches_any_field(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
        || post.author.to_lowercase().contains(needle)
        || post
            .date
            .is_some_and(|date| date.to_string().contains(needle))
}

fn compare(a: &Post, b: &Post, field: SortField, direction: SortDirection) -> Ordering {
    match field {
        SortField::Title => direction.apply(cmp_text(&a.title, &b.title)),
        SortField::Content => direction.apply(cmp_text(&a.content, &b.content)),
        SortField::Author => direction.apply(cmp_text(&a.author, &b.author)),
        // undated posts go last in both directions
        SortField::Date => match (a.date, b.date) {
            (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
