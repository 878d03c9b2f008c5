use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{
        CreatePostRequest, CreatedPostResponse, ListQuery, MessageResponse, PostDetail,
        PostResponse, UpdatePostRequest,
    },
    services,
};
use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let filter = services::filter_from_query(q)?;
    let posts = services::list_posts(state.posts.as_ref(), filter).await?;
    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<PostDetail>> {
    Ok(Json(services::get_post(state.posts.as_ref(), id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<CreatedPostResponse>)> {
    let post_id = services::create_post(state.posts.as_ref(), user_id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse {
            message: "Post added successfully",
            post_id,
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdatePostRequest>,
) -> AppResult<Json<MessageResponse>> {
    services::update_post(state.posts.as_ref(), user_id, id, body).await?;
    Ok(Json(MessageResponse {
        message: "Post updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    services::delete_post(state.posts.as_ref(), user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully",
    }))
}
