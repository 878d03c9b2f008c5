use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    category::Category,
    repo_types::{PostDetailRow, PostRow},
};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(alias = "cat")]
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Body for creating a post. `date` defaults to now.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: Category,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: Category,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub user_id: Uuid,
    pub username: String,
    pub user_img: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPostResponse {
    pub message: &'static str,
    pub post_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn stored_category(raw: &str) -> Result<Category, AppError> {
    raw.parse::<Category>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt post row: {e}")))
}

impl TryFrom<PostRow> for PostResponse {
    type Error = AppError;

    fn try_from(r: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: stored_category(&r.category)?,
            id: r.id,
            title: r.title,
            description: r.description,
            img: r.img,
            date: r.date,
            user_id: r.user_id,
        })
    }
}

impl TryFrom<PostDetailRow> for PostDetail {
    type Error = AppError;

    fn try_from(r: PostDetailRow) -> Result<Self, Self::Error> {
        Ok(Self {
            category: stored_category(&r.category)?,
            id: r.id,
            title: r.title,
            description: r.description,
            img: r.img,
            date: r.date,
            user_id: r.user_id,
            username: r.username,
            user_img: r.user_img,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_request_parses_optional_date() {
        let req: CreatePostRequest = serde_json::from_str(
            r#"{"title":"t","description":"<p>d</p>","category":"art","date":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.date, Some(datetime!(2024-05-01 10:00:00 UTC)));
        assert!(req.img.is_none());

        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert!(req.date.is_none());
        assert!(req.category.is_empty());
    }

    #[test]
    fn list_query_accepts_cat_alias() {
        let q: ListQuery = serde_json::from_str(r#"{"cat":"food"}"#).unwrap();
        assert_eq!(q.category.as_deref(), Some("food"));
    }

    #[test]
    fn detail_serializes_camel_case() {
        let detail = PostDetail::try_from(PostDetailRow {
            id: Uuid::nil(),
            title: "t".into(),
            description: "d".into(),
            img: Some("/uploads/1-a.png".into()),
            category: "design".into(),
            date: datetime!(2024-05-01 10:00:00 UTC),
            user_id: Uuid::nil(),
            username: "alice".into(),
            user_img: None,
        })
        .unwrap();
        let v = serde_json::to_value(&detail).unwrap();
        assert_eq!(v["userImg"], serde_json::Value::Null);
        assert_eq!(v["username"], "alice");
        assert_eq!(v["category"], "design");
        assert_eq!(v["date"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn corrupt_category_is_internal() {
        let err = PostResponse::try_from(PostRow {
            id: Uuid::nil(),
            title: "t".into(),
            description: "d".into(),
            img: None,
            category: "sports".into(),
            date: datetime!(2024-05-01 10:00:00 UTC),
            user_id: Uuid::nil(),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
