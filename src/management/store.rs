use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::AppError, types::TokenInfo};

/// Where the single cached token lives.
///
/// `get` returns `Ok(None)` when nothing has been stored yet; `put`
/// replaces whatever was there.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> Result<Option<TokenInfo>, AppError>;
    async fn put(&self, token: &TokenInfo) -> Result<(), AppError>;
}

/// Keeps the token as pretty-printed JSON in one file.
///
/// Writes go to `<path>.tmp` first and are renamed over the cache, so a
/// concurrent `get` sees either the old or the new record.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling of the cache file that `put` writes before renaming.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Result<Option<TokenInfo>, AppError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // an unreadable cache means the user has to log in again
        match serde_json::from_str::<TokenInfo>(&content) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring malformed token cache: {}", e);
                Ok(None)
            }
        }
    }

    async fn put(&self, token: &TokenInfo) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        // readers must never see a half-written record
        let json = serde_json::to_string_pretty(token)?;
        let staging = self.staging_path();
        async_fs::write(&staging, json).await?;
        async_fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<TokenInfo>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<TokenInfo>) -> Self {
        Self {
            slot: Mutex::new(token),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<TokenInfo>, AppError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn put(&self, token: &TokenInfo) -> Result<(), AppError> {
        *self.slot.lock().await = Some(token.clone());
        Ok(())
    }
}
