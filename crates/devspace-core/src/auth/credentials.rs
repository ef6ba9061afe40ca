use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Token file extension
const TOKEN_EXTENSION: &str = "token";

/// Log file extension
const LOG_EXTENSION: &str = "log";

/// Per-workspace bearer token files under a storage root.
///
/// The tunnel process reads its token from `location(id)`, so `cache` must
/// complete before the tunnel is launched.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage_root: PathBuf,
    prefix: String,
}

impl CredentialStore {
    pub fn new(storage_root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            storage_root: storage_root.into(),
            prefix: prefix.into(),
        }
    }

    /// Path of the cached bearer token for a workspace
    pub fn location(&self, workspace_id: &str) -> PathBuf {
        self.file_path(workspace_id, TOKEN_EXTENSION)
    }

    /// Path the tunnel writes its session log to
    pub fn log_location(&self, workspace_id: &str) -> PathBuf {
        self.file_path(workspace_id, LOG_EXTENSION)
    }

    /// Write `token` verbatim, replacing any previously cached token
    pub async fn cache(&self, token: &str, workspace_id: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.storage_root)
            .await
            .with_context(|| format!("Failed to create storage root {}", self.storage_root.display()))?;

        let path = self.location(workspace_id);
        tokio::fs::write(&path, token)
            .await
            .with_context(|| format!("Failed to write bearer token to {}", path.display()))?;

        debug!(workspace = workspace_id, path = %path.display(), "Cached bearer token");
        Ok(path)
    }

    /// Read a previously cached token, if present
    pub async fn read(&self, workspace_id: &str) -> Result<Option<String>> {
        let path = self.location(workspace_id);
        match tokio::fs::read_to_string(&path).await {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read bearer token from {}", path.display())),
        }
    }

    /// Remove a cached token. Missing files are not an error.
    pub async fn clear(&self, workspace_id: &str) -> Result<()> {
        let path = self.location(workspace_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }

    fn file_path(&self, workspace_id: &str, extension: &str) -> PathBuf {
        self.storage_root
            .join(format!("{}.{}.{}", self.prefix, workspace_id, extension))
    }
}

// ============================================================================
// Tests
// ============================================================================
