//! HTTP transport to the catalog API

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use async_trait::async_trait;
use serde_json::Value;

/// Issues GET requests against the catalog and returns parsed JSON
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// GET `path` (relative to the API root, query string included)
    async fn get_json(&self, path: &str) -> Result<Value, CatalogError>;
}

/// Transport backed by a reqwest client
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Absolute URL for a relative catalog path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, CatalogError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog responded with {} for {}", status, url);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
