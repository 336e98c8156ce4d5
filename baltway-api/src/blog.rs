use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use baltway_core::blog::{NewBlogPost, UpdateBlogPost};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub id: Option<i32>,
    pub slug: Option<String>,
}

pub fn public_routes() -> Router<AppState> {
    Router::new().route("/v1/blog", get(get_blog))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/blog", post(create_post))
        .route("/v1/admin/blog/{id}", put(update_post).delete(delete_post))
}

/// GET /v1/blog — all posts newest-first, or a single post when `id` or
/// `slug` is given.
pub async fn get_blog(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<Value>, AppError> {
    if let Some(id) = query.id {
        let post = state.blog.find_by_id(id).await?;
        return Ok(Json(json!({ "post": post })));
    }
    if let Some(slug) = query.slug {
        let post = state.blog.find_by_slug(&slug).await?;
        return Ok(Json(json!({ "post": post })));
    }

    let posts = state.blog.list().await?;
    Ok(Json(json!({ "posts": posts })))
}

/// POST /v1/admin/blog
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<NewBlogPost>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if input.title.trim().is_empty()
        || input.content.trim().is_empty()
        || input.excerpt.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Title, content and excerpt are required".to_string(),
        ));
    }

    let post = state.blog.create(input).await?;
    tracing::info!(id = post.id, slug = %post.slug, "blog post created");
    Ok((StatusCode::CREATED, Json(json!({ "post": post }))))
}

/// PUT /v1/admin/blog/{id}
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateBlogPost>,
) -> Result<Json<Value>, AppError> {
    let post = state.blog.update(id, changes).await?;
    tracing::info!(id = post.id, slug = %post.slug, "blog post updated");
    Ok(Json(json!({ "post": post })))
}

/// DELETE /v1/admin/blog/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, AppError> {
    state.blog.delete(id).await?;
    tracing::info!(id, "blog post deleted");
    Ok(Json(json!({ "success": true })))
}
