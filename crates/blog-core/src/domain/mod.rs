//! Domain entities - the core business objects.

mod listing;
mod post;

pub use listing::{FieldSearch, ListQuery, SortDirection, SortField};
pub use post::{
    DATE_FORMAT, DEFAULT_AUTHOR, NewPost, Post, PostChanges, PostDraft, PostId, PostPatch,
    parse_date,
};
