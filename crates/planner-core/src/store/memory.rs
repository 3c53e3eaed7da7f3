use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{normalize_path, DocumentStore};
use crate::error::Result;

/// In-process document store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn write(&self, path: &str, document: &Value) -> Result<()> {
        let path = normalize_path(path)?;
        let mut documents = self.documents.write().await;
        if document.is_null() {
            documents.remove(&path);
        } else {
            documents.insert(path, document.clone());
        }
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Option<Value>> {
        let path = normalize_path(path)?;
        Ok(self.documents.read().await.get(&path).cloned())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
