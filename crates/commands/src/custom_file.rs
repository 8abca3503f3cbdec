//! JSON file-backed custom-command sink with atomic writes.

use std::path::PathBuf;

use {async_trait::async_trait, tokio::fs, tracing::debug};

use crate::custom::{CustomCommandMap, CustomCommandSink};

/// File-backed sink. The whole map lives in a single JSON file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the snapshot written by a previous run. A missing file is an
    /// empty map, not an error.
    pub async fn load(&self) -> anyhow::Result<CustomCommandMap> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(CustomCommandMap::new());
        }
        let raw = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl CustomCommandSink for FileSink {
    /// Atomic write: write to temp, rename over target.
    async fn persist(&self, snapshot: &CustomCommandMap) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "persisted custom commands");
        Ok(())
    }
}
