use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use super::category::Category;

/// Post record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: String,
    pub date: OffsetDateTime,
    pub user_id: Uuid,
}

/// A post joined with its author.
#[derive(Debug, Clone, FromRow)]
pub struct PostDetailRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: String,
    pub date: OffsetDateTime,
    pub user_id: Uuid,
    pub username: String,
    pub user_img: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: Category,
    pub date: OffsetDateTime,
    pub user_id: Uuid,
}

/// Columns an owner may rewrite.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub img: Option<String>,
    pub category: Category,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}
