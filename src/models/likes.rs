use crate::error::{AppError, Result};
use crate::storage::Storage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Storage key holding the liked recipes
pub const LIKES_KEY: &str = "likes";

/// Snapshot of a recipe taken when it was liked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

/// Liked recipes, written through to storage on every change
pub struct Likes {
    likes: Vec<Like>,
    storage: Arc<dyn Storage>,
}

impl Likes {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            likes: Vec::new(),
            storage,
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    /// Like a recipe. Fails with [`AppError::AlreadyLiked`] when the id is
    /// already present; if the collection cannot be persisted it is left unchanged.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> Result<&Like> {
        let id = id.into();
        if self.is_liked(&id) {
            return Err(AppError::AlreadyLiked(id));
        }

        self.likes.push(Like {
            id,
            title: title.into(),
            author: author.into(),
            img: img.into(),
        });

        if let Err(e) = self.persist_data() {
            self.likes.pop();
            return Err(e);
        }

        let index = self.likes.len() - 1;
        Ok(&self.likes[index])
    }

    /// Remove a like. Returns `Ok(false)` when the id was not liked.
    pub fn delete_like(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.likes.iter().position(|like| like.id == id) else {
            return Ok(false);
        };

        let removed = self.likes.remove(index);
        if let Err(e) = self.persist_data() {
            self.likes.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    fn persist_data(&self) -> Result<()> {
        let json = serde_json::to_string(&self.likes)?;
        self.storage.set_item(LIKES_KEY, &json)
    }

    /// Replace the in-memory collection with the stored one. Missing or
    /// unreadable data leaves the collection empty.
    pub fn read_storage(&mut self) {
        self.likes = match self.storage.get_item(LIKES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Like>>(&json) {
                Ok(likes) => dedup_by_id(likes),
                Err(e) => {
                    warn!("Ignoring corrupt likes in storage: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read likes from storage: {}", e);
                Vec::new()
            }
        };
        debug!("Restored {} likes", self.likes.len());
    }
}

fn dedup_by_id(likes: Vec<Like>) -> Vec<Like> {
    let mut seen = HashSet::new();
    likes
        .into_iter()
        .filter(|like| seen.insert(like.id.clone()))
        .collect()
}
