use std::path::Path;

use {
    serde::{Deserialize, Serialize},
    tokio::fs,
    tracing::debug,
};

use crate::error::Result;

/// An access/refresh token pair, persisted per identity.
///
/// The on-disk format matches the legacy cache files (camelCase keys).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the pair back to its cache file, creating parent directories as
    /// needed.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, serde_json::to_string(self)?).await?;
        debug!(path = %path.display(), "saved token cache");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("api-moneybot.json");
        let pair = TokenPair {
            access_token: "acc".into(),
            refresh_token: "ref".into(),
        };

        pair.save(&path).await.unwrap();
        assert_eq!(TokenPair::load(&path).await.unwrap(), pair);
    }

    #[tokio::test]
    async fn reads_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.json");
        fs::write(&path, r#"{"accessToken":"a","refreshToken":"r"}"#)
            .await
            .unwrap();

        let pair = TokenPair::load(&path).await.unwrap();
        assert_eq!(pair.access_token, "a");
        assert_eq!(pair.refresh_token, "r");
    }
}
