use std::path::PathBuf;

use {
    async_trait::async_trait,
    reqwest::Method,
    serde::Deserialize,
    tokio::sync::RwLock,
    tracing::{debug, warn},
};

use crate::{
    error::{Error, Result},
    platform::PlatformApi,
    token::TokenPair,
    types::{BlockedTerm, StreamInfo},
};

/// Default REST base for the platform API.
pub const HELIX_BASE_URL: &str = "https://api.twitch.tv/helix";
/// Default endpoint for the refresh-token grant.
pub const OAUTH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Helix-style REST client for one identity.
///
/// Carries the identity's user token pair. A rejected token triggers one
/// refresh-token grant and a replay of the failed request; the refreshed
/// pair is written back to the identity's cache file.
pub struct HelixClient {
    identity: String,
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    tokens: RwLock<TokenPair>,
    cache_path: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
struct User {
    id: String,
}

#[derive(Deserialize)]
struct Grant {
    access_token: String,
    refresh_token: String,
}

impl HelixClient {
    #[must_use]
    pub fn new(
        identity: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tokens: TokenPair,
        cache_path: Option<PathBuf>,
    ) -> Self {
        Self {
            identity: identity.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            http: reqwest::Client::new(),
            base_url: HELIX_BASE_URL.to_string(),
            token_url: OAUTH_TOKEN_URL.to_string(),
            tokens: RwLock::new(tokens),
            cache_path,
        }
    }

    /// Point the client at alternative endpoints (tests).
    #[must_use]
    pub fn with_endpoints(mut self, base_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.token_url = token_url.into();
        self
    }

    async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let mut refreshed = false;
        loop {
            let access = self.tokens.read().await.access_token.clone();
            let url = format!("{}/{}", self.base_url, path_and_query);
            let mut req = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(&access)
                .header("Client-Id", &self.client_id);
            if let Some(body) = body {
                req = req.json(body);
            }

            let res = req.send().await?;
            if res.status().is_success() {
                return Ok(res);
            }

            let status = res.status().as_u16();
            let body_text = res.text().await.unwrap_or_default();
            if status == 401 && !refreshed {
                // Expired user token: refresh once and replay.
                warn!(identity = %self.identity, "access token rejected, refreshing");
                self.refresh().await?;
                refreshed = true;
                continue;
            }
            return Err(Error::Status {
                status,
                body: body_text,
            });
        }
    }

    async fn refresh(&self) -> Result<()> {
        let refresh_token = self.tokens.read().await.refresh_token.clone();
        let res = self
            .http
            .post(&self.token_url)
            .query(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh { status, body });
        }

        let grant: Grant = res.json().await?;
        let pair = TokenPair {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
        };
        *self.tokens.write().await = pair.clone();
        debug!(identity = %self.identity, "refreshed access token");

        // Best-effort: the in-memory pair stays authoritative either way.
        if let Some(path) = &self.cache_path {
            if let Err(err) = pair.save(path).await {
                warn!(identity = %self.identity, error = %err, "failed to persist refreshed tokens");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformApi for HelixClient {
    async fn fetch_current_stream(&self, login: &str) -> Result<Option<StreamInfo>> {
        let res = self
            .request(Method::GET, &format!("streams?user_login={login}"), None)
            .await?;
        let envelope: Envelope<StreamInfo> = res.json().await?;
        Ok(envelope.data.into_iter().next())
    }

    async fn fetch_user_id(&self, login: &str) -> Result<String> {
        let res = self
            .request(Method::GET, &format!("users?login={login}"), None)
            .await?;
        let envelope: Envelope<User> = res.json().await?;
        envelope
            .data
            .into_iter()
            .next()
            .map(|u| u.id)
            .ok_or_else(|| Error::unknown_user(login))
    }

    async fn add_blocked_term(
        &self,
        text: &str,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<()> {
        let path = format!(
            "moderation/blocked_terms?broadcaster_id={channel_id}&moderator_id={moderator_id}"
        );
        let body = serde_json::json!({ "text": text });
        self.request(Method::POST, &path, Some(&body)).await?;
        Ok(())
    }

    async fn list_blocked_terms(
        &self,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<Vec<BlockedTerm>> {
        let path = format!(
            "moderation/blocked_terms?broadcaster_id={channel_id}&moderator_id={moderator_id}"
        );
        let res = self.request(Method::GET, &path, None).await?;
        let envelope: Envelope<BlockedTerm> = res.json().await?;
        Ok(envelope.data)
    }

    async fn remove_blocked_term(
        &self,
        id: &str,
        channel_id: &str,
        moderator_id: &str,
    ) -> Result<()> {
        let path = format!(
            "moderation/blocked_terms?broadcaster_id={channel_id}&moderator_id={moderator_id}&id={id}"
        );
        self.request(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
