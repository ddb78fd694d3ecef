use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::store::StoreBackend;

/// Filesystem backend: one JSON file per collection under a root directory.
///
/// Writes are plain overwrites, not atomic renames; a crash mid-write can
/// leave a truncated file, which the next load treats as corrupt and defaults.
#[derive(Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait::async_trait]
impl StoreBackend for FileBackend {
    async fn read(&self, path: &str) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(self.resolve(path)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("read {}: {}", path, e))),
        }
    }

    async fn write(&self, path: &str, contents: String) -> AppResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("mkdir {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&full, contents)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {}", path, e)))
    }
}
