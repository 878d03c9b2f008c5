use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    category::Category,
    dto::{CreatePostRequest, ListQuery, PostDetail, PostResponse, UpdatePostRequest},
    repo::PostRepo,
    repo_types::{NewPost, PostChanges, PostFilter},
};
use crate::error::{AppError, AppResult};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_category(raw: &str) -> AppResult<Category> {
    raw.parse::<Category>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn validate_changes(
    title: String,
    description: String,
    img: Option<String>,
    category: &str,
) -> AppResult<PostChanges> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".into()));
    }
    if category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".into()));
    }
    Ok(PostChanges {
        title,
        description,
        img: non_blank(img),
        category: parse_category(category)?,
    })
}

pub fn filter_from_query(q: ListQuery) -> AppResult<PostFilter> {
    let category = non_blank(q.category)
        .map(|c| parse_category(&c))
        .transpose()?;
    Ok(PostFilter {
        category,
        search: non_blank(q.search),
    })
}

pub async fn list_posts(posts: &dyn PostRepo, filter: PostFilter) -> AppResult<Vec<PostResponse>> {
    posts
        .list(&filter)
        .await?
        .into_iter()
        .map(PostResponse::try_from)
        .collect()
}

pub async fn get_post(posts: &dyn PostRepo, id: Uuid) -> AppResult<PostDetail> {
    posts
        .find_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?
        .try_into()
}

pub async fn create_post(
    posts: &dyn PostRepo,
    user_id: Uuid,
    req: CreatePostRequest,
) -> AppResult<Uuid> {
    let changes = validate_changes(req.title, req.description, req.img, &req.category)?;
    let id = posts
        .create(NewPost {
            title: changes.title,
            description: changes.description,
            img: changes.img,
            category: changes.category,
            date: req.date.unwrap_or_else(OffsetDateTime::now_utc),
            user_id,
        })
        .await?;
    info!(post_id = %id, %user_id, "post created");
    Ok(id)
}

/// Rewrites a post the caller owns. A post that is missing or owned by
/// someone else is reported the same way.
pub async fn update_post(
    posts: &dyn PostRepo,
    user_id: Uuid,
    id: Uuid,
    req: UpdatePostRequest,
) -> AppResult<()> {
    let changes = validate_changes(req.title, req.description, req.img, &req.category)?;
    if posts.update_owned(id, user_id, changes).await? == 0 {
        warn!(post_id = %id, %user_id, "update refused: not the owner");
        return Err(AppError::Forbidden("You can update only your posts".into()));
    }
    info!(post_id = %id, %user_id, "post updated");
    Ok(())
}

pub async fn delete_post(posts: &dyn PostRepo, user_id: Uuid, id: Uuid) -> AppResult<()> {
    if posts.delete_owned(id, user_id).await? == 0 {
        warn!(post_id = %id, %user_id, "delete refused: not the owner");
        return Err(AppError::Forbidden("You can delete only your posts".into()));
    }
    info!(post_id = %id, %user_id, "post deleted");
    Ok(())
}
