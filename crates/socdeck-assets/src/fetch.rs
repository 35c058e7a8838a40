use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AssetError;

/// Raw byte retrieval for asset URLs.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AssetError>;
}

/// Only absolute `http`/`https` URLs are ever sent over the network.
#[must_use]
pub fn is_fetchable_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }
    reqwest::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// HTTP fetcher for logos and post thumbnails.
///
/// Responses are read chunk by chunk so an oversized body is rejected as soon
/// as it crosses `max_bytes`, without buffering the rest.
pub struct HttpAssetFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpAssetFetcher {
    /// # Errors
    ///
    /// Returns [`AssetError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout: Duration, user_agent: &str, max_bytes: usize) -> Result<Self, AssetError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        if !is_fetchable_url(url) {
            return Err(AssetError::UnsupportedUrl(url.to_string()));
        }

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let too_large = || AssetError::TooLarge {
            url: url.to_string(),
            limit: self.max_bytes,
        };

        if let Some(len) = response.content_length() {
            if usize::try_from(len).map_or(true, |len| len > self.max_bytes) {
                return Err(too_large());
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}
