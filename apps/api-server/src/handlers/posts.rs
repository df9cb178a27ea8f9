//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{FieldSearch, ListQuery, PostChanges, PostDraft, PostId};
use blog_shared::MessageResponse;
use blog_shared::dto::{CreatePostRequest, ListPostsQuery, SearchPostsQuery, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?search=&sort=&direction=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let query = ListQuery::parse(
        params.search.as_deref(),
        params.sort.as_deref(),
        params.direction.as_deref(),
    )?;

    let posts = state.posts.list(&query).await?;
    tracing::debug!(count = posts.len(), sort = ?query.sort, "Listed posts");

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/search?title=&content=
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchPostsQuery>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let search = FieldSearch::new(params.title.as_deref(), params.content.as_deref());

    let posts = state.posts.search_fields(&search).await?;
    tracing::debug!(count = posts.len(), "Searched posts");

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        author: req.author,
        date: req.date,
    };

    let post = state.posts.create(draft).await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        author: req.author,
        date: req.date,
    };

    let post = state.posts.update(path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post with id {} has been deleted successfully.",
        id
    ))))
}
