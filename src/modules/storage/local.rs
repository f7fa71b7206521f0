use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::FileStorage;
use crate::core::error::{AppError, Result};

/// Stores files on the local filesystem below `root`
pub struct LocalFileStorage {
    root: PathBuf,
    public_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        let traverses = key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if traverses || key.contains('\\') {
            return Err(AppError::BadRequest(format!("Invalid storage key '{}'", key)));
        }

        Ok(self.root.join(key))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {}", path.display(), e)))?;

        debug!("Stored {} bytes at '{}'", data.len(), path.display());
        Ok(key.to_string())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url, key)
    }
}
