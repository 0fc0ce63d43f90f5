//! In-memory profile and user-state readers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::achievement::UserState;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::subscription::Profile;
use crate::ports::{ProfileReader, UserStateReader};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileReader {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, profile: Profile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl ProfileReader for InMemoryProfileReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

/// Serves pre-assembled snapshots, re-stamped with the requested instant.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStateReader {
    states: Arc<RwLock<HashMap<UserId, UserState>>>,
}

impl InMemoryUserStateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, state: UserState) {
        self.states
            .write()
            .await
            .insert(state.user_id.clone(), state);
    }
}

#[async_trait]
impl UserStateReader for InMemoryUserStateReader {
    async fn snapshot(&self, user_id: &UserId, as_of: Timestamp) -> Result<UserState, DomainError> {
        let states = self.states.read().await;
        let mut state = states
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserState::new(user_id.clone(), as_of));
        state.as_of = as_of;
        Ok(state)
    }
}
