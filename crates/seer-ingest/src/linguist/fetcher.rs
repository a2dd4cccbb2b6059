//! Download of the remote catalog document

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::error::FetchError;

/// Source of the raw catalog document
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches the catalog with a single HTTP GET.
///
/// No retries and no timeout of its own; the caller's deadline bounds the
/// request. A non-2xx status is logged but not treated as an error, the body
/// is returned either way and the parser decides whether it is usable.
#[derive(Debug, Clone, Default)]
pub struct HttpCatalogFetcher {
    client: reqwest::Client,
}

impl HttpCatalogFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let request = self
            .client
            .get(url)
            .build()
            .map_err(|source| FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            })?;

        debug!(url = %url, "Requesting language catalog");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Catalog fetch returned non-success status");
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        info!(url = %url, status = %status, bytes = body.len(), "Fetched language catalog");
        Ok(body.to_vec())
    }
}
