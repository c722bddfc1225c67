use super::parser::Parser;
use async_trait::async_trait;
use cloudmap_application::ports::ProviderFeedSource;
use cloudmap_domain::{DomainError, FeedSource, ProviderRange};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("cloudmap/", env!("CARGO_PKG_VERSION"), " (range-sync)");

/// Build the HTTP client shared by every feed.
pub fn build_client(fetch_timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .timeout(fetch_timeout)
        .build()
        .map_err(|e| DomainError::ConfigurationError(format!("HTTP client: {e}")))
}

/// A provider feed fetched over HTTP(S).
pub struct HttpFeedSource {
    source: FeedSource,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(source: FeedSource, client: reqwest::Client) -> Self {
        Self { source, client }
    }

    async fn fetch_body(&self) -> Result<String, DomainError> {
        let url = &self.source.url;

        let response = self.client.get(url).send().await.map_err(|e| {
            DomainError::ConfigurationError(format!(
                "{}: fetch error for {}: {}",
                self.source.provider, url, e
            ))
        })?;

        if !response.status().is_success() {
            return Err(DomainError::ConfigurationError(format!(
                "{}: HTTP {} for {}",
                self.source.provider,
                response.status().as_u16(),
                url
            )));
        }

        response.text().await.map_err(|e| {
            DomainError::ConfigurationError(format!(
                "{}: read error for {}: {}",
                self.source.provider, url, e
            ))
        })
    }
}

#[async_trait]
impl ProviderFeedSource for HttpFeedSource {
    fn provider(&self) -> &str {
        &self.source.provider
    }

    async fn fetch(&self) -> Result<Vec<ProviderRange>, DomainError> {
        let body = self.fetch_body().await?;

        debug!(
            provider = %self.source.provider,
            format = %self.source.format,
            bytes = body.len(),
            "Feed downloaded"
        );

        Parser::for_format(self.source.format).parse(&self.source.provider, &body)
    }
}
