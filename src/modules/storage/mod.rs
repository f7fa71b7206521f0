//! Storage module for uploaded avatars
//!
//! `LocalFileStorage` writes to a directory served by the API itself,
//! `MinIOClient` pushes objects to any S3-compatible bucket.

mod local;
mod minio_client;

use async_trait::async_trait;

use crate::core::error::Result;

pub use local::LocalFileStorage;
pub use minio_client::MinIOClient;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `data` under `key` and return the key to persist for it
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Remove a stored key; a key that is already gone is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Public URL of a previously stored key
    fn public_url(&self, key: &str) -> String;
}
