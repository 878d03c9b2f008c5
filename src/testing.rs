//! In-memory repositories and storage for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::{AppError, AppResult},
    posts::{
        repo::PostRepo,
        repo_types::{NewPost, PostChanges, PostDetailRow, PostFilter, PostRow},
    },
    storage::{ObjectExists, StorageClient},
};

#[derive(Clone, Default)]
pub struct MemoryUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserRepo {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Seeds a user whose password never verifies.
    pub fn insert_user(&self, username: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(User {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: "not-a-hash".into(),
            profile_img: None,
            created_at: OffsetDateTime::now_utc(),
        });
        id
    }

    fn get(&self, id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn create(&self, new: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == new.username || u.email == new.email)
        {
            return Err(AppError::Conflict("User already exists".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            profile_img: new.profile_img,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Posts keyed by id. The ownership check and the write happen under one
/// lock, like the single conditional statement in Postgres.
#[derive(Clone)]
pub struct MemoryPostRepo {
    users: MemoryUserRepo,
    posts: Arc<Mutex<HashMap<Uuid, PostRow>>>,
}

impl MemoryPostRepo {
    pub fn new(users: MemoryUserRepo) -> Self {
        Self {
            users,
            posts: Arc::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn list(&self, filter: &PostFilter) -> AppResult<Vec<PostRow>> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut rows: Vec<PostRow> = self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|p| {
                filter
                    .category
                    .map_or(true, |c| p.category == c.as_str())
            })
            .filter(|p| {
                needle
                    .as_ref()
                    .map_or(true, |n| p.title.to_lowercase().contains(n.as_str()))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<PostDetailRow>> {
        let Some(p) = self.posts.lock().unwrap().get(&id).cloned() else {
            return Ok(None);
        };
        // Inner join: a post whose author is gone is not returned.
        Ok(self.users.get(p.user_id).map(|u| PostDetailRow {
            id: p.id,
            title: p.title,
            description: p.description,
            img: p.img,
            category: p.category,
            date: p.date,
            user_id: p.user_id,
            username: u.username,
            user_img: u.profile_img,
        }))
    }

    async fn create(&self, new: NewPost) -> AppResult<Uuid> {
        if self.users.get(new.user_id).is_none() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "foreign key violation: user {} does not exist",
                new.user_id
            )));
        }
        let id = Uuid::new_v4();
        self.posts.lock().unwrap().insert(
            id,
            PostRow {
                id,
                title: new.title,
                description: new.description,
                img: new.img,
                category: new.category.as_str().to_string(),
                date: new.date,
                user_id: new.user_id,
            },
        );
        Ok(id)
    }

    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: PostChanges) -> AppResult<u64> {
        let mut posts = self.posts.lock().unwrap();
        match posts.get_mut(&id) {
            Some(p) if p.user_id == user_id => {
                p.title = changes.title;
                p.description = changes.description;
                p.img = changes.img;
                p.category = changes.category.as_str().to_string();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let mut posts = self.posts.lock().unwrap();
        match posts.get(&id) {
            Some(p) if p.user_id == user_id => {
                posts.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryStorage {
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn put_object(&self, key: &str, body: Bytes, _content_type: &str) -> anyhow::Result<()> {
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(key) {
            return Err(ObjectExists(key.to_string()).into());
        }
        objects.insert(key.to_string(), body);
        Ok(())
    }
}
