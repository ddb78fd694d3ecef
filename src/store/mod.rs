//! Record Store: whole-document JSON persistence
//!
//! Every collection is one JSON document. Loads are corruption-tolerant: an
//! absent, empty, or unparseable document yields the default value and a log
//! line rather than an error, so store failures never propagate past this
//! boundary. Saves overwrite the whole document; a failed save is logged and
//! dropped. There is no partial-write protection and no cross-request locking:
//! two concurrent saves race and the last writer wins.
//!
//! The backend is a trait so tests can swap the filesystem for an in-memory
//! fake.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Keys for the persisted JSON documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Users,
    Assessments,
    Colleges,
    /// Per-college detail document, keyed by the identifier extracted from a
    /// catalog entry's link.
    CollegeDetail(String),
}

impl Collection {
    /// Document path relative to the store root.
    pub fn path(&self) -> String {
        match self {
            Collection::Users => "users.json".to_string(),
            Collection::Assessments => "results.json".to_string(),
            Collection::Colleges => "colleges.json".to_string(),
            Collection::CollegeDetail(id) => format!("colleges/{}.json", id),
        }
    }
}

/// Raw document access, implemented per storage medium.
#[async_trait::async_trait]
pub trait StoreBackend: Send + Sync {
    /// Returns the raw document, or `None` when it does not exist.
    async fn read(&self, path: &str) -> AppResult<Option<String>>;

    /// Overwrites the document in place.
    async fn write(&self, path: &str, contents: String) -> AppResult<()>;
}

/// Typed facade over a [`StoreBackend`].
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn StoreBackend>,
}

impl Store {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Loads a whole collection document.
    ///
    /// Absent, empty, or unparseable documents yield `T::default()`; the
    /// failure is logged, never raised.
    pub async fn load<T>(&self, collection: &Collection) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = collection.path();
        let raw = match self.backend.read(&path).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to read document, using default");
                return T::default();
            }
        };

        if raw.trim().is_empty() {
            return T::default();
        }

        match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to parse document, using default");
                T::default()
            }
        }
    }

    /// Serializes and overwrites a whole collection document.
    ///
    /// Failures are logged, never raised.
    pub async fn save<T: Serialize>(&self, collection: &Collection, document: &T) {
        let path = collection.path();
        let contents = match serde_json::to_string_pretty(document) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Failed to serialize document");
                return;
            }
        };

        if let Err(e) = self.backend.write(&path, contents).await {
            tracing::error!(path = %path, error = %e, "Failed to write document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserAccount;

    fn memory_store() -> Store {
        Store::new(Arc::new(MemoryBackend::default()))
    }

    #[tokio::test]
    async fn load_missing_document_yields_default() {
        let store = memory_store();
        let users: Vec<UserAccount> = store.load(&Collection::Users).await;
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_document_yields_default() {
        let backend = Arc::new(MemoryBackend::default());
        backend.seed("users.json", "{not json").await;
        let store = Store::new(backend);

        let users: Vec<UserAccount> = store.load(&Collection::Users).await;
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn load_empty_document_yields_default() {
        let backend = Arc::new(MemoryBackend::default());
        backend.seed("users.json", "   ").await;
        let store = Store::new(backend);

        let users: Vec<UserAccount> = store.load(&Collection::Users).await;
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = memory_store();

        let users = vec![UserAccount {
            name: "Asha".to_string(),
            username: Some("asha".to_string()),
            ..Default::default()
        }];
        store.save(&Collection::Users, &users).await;

        let loaded: Vec<UserAccount> = store.load(&Collection::Users).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].username.as_deref(), Some("asha"));
    }

    #[test]
    fn detail_documents_live_under_colleges() {
        assert_eq!(
            Collection::CollegeDetail("abc".to_string()).path(),
            "colleges/abc.json"
        );
    }
}
