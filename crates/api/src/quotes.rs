use {async_trait::async_trait, serde::Deserialize};

use crate::error::Result;

/// Default quote endpoint (returns `{"quote": "..."}`).
pub const KANYE_REST_URL: &str = "https://api.kanye.rest/";

/// Source of one-off quotes for the kanye command.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self) -> Result<String>;
}

/// REST-backed quote source.
pub struct KanyeRest {
    http: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct QuoteBody {
    quote: String,
}

impl KanyeRest {
    #[must_use]
    pub fn new() -> Self {
        Self::with_url(KANYE_REST_URL)
    }

    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for KanyeRest {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for KanyeRest {
    async fn fetch_quote(&self) -> Result<String> {
        let body: QuoteBody = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.quote)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_quote_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_body(r#"{"quote":"I make awesome stuff"}"#)
            .create_async()
            .await;

        let source = KanyeRest::with_url(format!("{}/", server.url()));
        assert_eq!(source.fetch_quote().await.unwrap(), "I make awesome stuff");
    }
}
