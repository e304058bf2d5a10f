//! In-memory implementation of the alias repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::repositories::AliasRepository;
use crate::error::AppError;

/// Alias storage held in process memory.
///
/// Intended for tests and for running without a configured database. Records
/// are lost when the process exits and removal is never age-gated. Keys are
/// kept ordered so reverse lookups return the lowest matching key.
#[derive(Debug, Default)]
pub struct MemoryAliasRepository {
    aliases: RwLock<BTreeMap<String, String>>,
}

impl MemoryAliasRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored aliases.
    pub async fn len(&self) -> usize {
        self.aliases.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.aliases.read().await.is_empty()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn add(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.aliases
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.aliases.write().await.remove(key).is_some())
    }

    async fn contains_key(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.aliases.read().await.contains_key(key))
    }

    async fn contains_value(&self, value: &str) -> Result<bool, AppError> {
        Ok(self.aliases.read().await.values().any(|v| v == value))
    }

    async fn get_key(&self, value: &str) -> Result<String, AppError> {
        self.aliases
            .read()
            .await
            .iter()
            .find(|(_, v)| v.as_str() == value)
            .map(|(k, _)| k.clone())
            .ok_or_else(|| AppError::not_found("No alias for target", json!({ "value": value })))
    }

    async fn get_value(&self, key: &str) -> Result<String, AppError> {
        self.aliases
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found("Alias not found", json!({ "key": key })))
    }
}
