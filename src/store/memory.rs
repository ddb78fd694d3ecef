use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::store::StoreBackend;

/// In-memory backend for tests: documents in a map, no filesystem.
#[derive(Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Pre-populates a document, bypassing the store facade.
    pub async fn seed(&self, path: &str, contents: &str) {
        self.documents
            .write()
            .await
            .insert(path.to_string(), contents.to_string());
    }
}

#[async_trait::async_trait]
impl StoreBackend for MemoryBackend {
    async fn read(&self, path: &str) -> AppResult<Option<String>> {
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn write(&self, path: &str, contents: String) -> AppResult<()> {
        self.documents.write().await.insert(path.to_string(), contents);
        Ok(())
    }
}
