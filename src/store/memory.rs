use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::models::User;
use crate::store::CredentialStore;

/// In-memory credential store backed by a `RwLock<HashMap>`.
///
/// Insertion goes through the map entry so the uniqueness check and the
/// write happen under one lock acquisition.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        let users = self.users.read().await;
        Ok(users.contains_key(username))
    }

    async fn get(&self, username: &str) -> Result<User, StoreError> {
        let users = self.users.read().await;
        users.get(username).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        match users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }
}
