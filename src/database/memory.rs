//! In-process [`UserStore`] for tests.

use super::UserStore;
use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn count_by_email(&self, email: Option<&str>) -> usize {
        self.users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email.as_deref() == email)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: Option<&str>) -> Result<Option<User>, AppError> {
        let found = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_deref() == email)
            .cloned();
        // Suspend after reading, like a network round trip would.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        let mut stored = user.clone();
        stored.id = Some(ObjectId::new());
        users.push(stored);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
