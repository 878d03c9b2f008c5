use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewPost, PostChanges, PostDetailRow, PostFilter, PostRow};
use crate::error::AppResult;

/// Post persistence.
///
/// `update_owned` and `delete_owned` must check ownership and write in one
/// atomic step and report how many rows they touched.
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn list(&self, filter: &PostFilter) -> AppResult<Vec<PostRow>>;
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<PostDetailRow>>;
    async fn create(&self, new: NewPost) -> AppResult<Uuid>;
    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: PostChanges) -> AppResult<u64>;
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<u64>;
}

pub struct PgPostRepo {
    db: PgPool,
}

impl PgPostRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn list(&self, filter: &PostFilter) -> AppResult<Vec<PostRow>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, description, img, category, date, user_id
            FROM posts
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR strpos(lower(title), lower($2)) > 0)
            ORDER BY date DESC
            "#,
        )
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.search.as_deref())
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<PostDetailRow>> {
        let row = sqlx::query_as::<_, PostDetailRow>(
            r#"
            SELECT p.id, p.title, p.description, p.img, p.category, p.date, p.user_id,
                   u.username, u.profile_img AS user_img
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn create(&self, new: NewPost) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, description, img, category, date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.img)
        .bind(new.category.as_str())
        .bind(new.date)
        .bind(new.user_id)
        .execute(&self.db)
        .await?;
        Ok(id)
    }

    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: PostChanges) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, description = $2, img = $3, category = $4
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.img)
        .bind(changes.category.as_str())
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
