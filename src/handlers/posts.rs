use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    extract::{ValidJson, ValidPath},
    models::posts::{CreatePostDto, UpdatePostDto},
    AppState, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/posts", get(get_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    ValidPath(post_id): ValidPath<i32>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(post_id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    ValidJson(new_post): ValidJson<CreatePostDto>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.create_post(new_post).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    ValidPath(post_id): ValidPath<i32>,
    ValidJson(update_post): ValidJson<UpdatePostDto>,
) -> Result<impl IntoResponse> {
    let updated_post = app_state
        .posts_service
        .update_post(post_id, update_post)
        .await?;

    Ok((StatusCode::OK, Json(updated_post)))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    ValidPath(post_id): ValidPath<i32>,
) -> Result<impl IntoResponse> {
    let deleted_post = app_state.posts_service.delete_post(post_id).await?;

    Ok((StatusCode::OK, Json(deleted_post)))
}
