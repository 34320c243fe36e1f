//! Key-value persistence for user profiles and their charts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::chart::{BirthData, NatalChart};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Opaque string key-value store
pub trait KeyValueStore: Send + Sync {
    fn save(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

/// Process-local store; one mutex serialises all access
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn save(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub birth: BirthData,
}

/// Typed profile and chart access over a [`KeyValueStore`]
pub struct ProfileRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let blob = serde_json::to_string(profile)?;
        self.store.save(&profile_key(&profile.user_id), blob)
    }

    pub fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        self.load(&profile_key(user_id))
    }

    pub fn save_chart(&self, user_id: &str, chart: &NatalChart) -> Result<(), StoreError> {
        let blob = serde_json::to_string(chart)?;
        self.store.save(&chart_key(user_id), blob)
    }

    pub fn get_chart(&self, user_id: &str) -> Result<Option<NatalChart>, StoreError> {
        self.load(&chart_key(user_id))
    }

    fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get(key)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }
}

fn profile_key(user_id: &str) -> String {
    format!("profile:{user_id}")
}

fn chart_key(user_id: &str) -> String {
    format!("chart:{user_id}")
}
