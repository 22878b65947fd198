use std::time::Duration;

use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::types::Asset;

/// Header carrying the tenant identifier on every inventory request
pub const TENANT_HEADER: &str = "x-tenant-id";
/// Upper bound on a single inventory request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the inventory service asset listing
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a client with the default 5 second timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every asset belonging to a tenant
    pub async fn fetch_assets(&self, tenant_id: &str) -> Result<Vec<Asset>> {
        let url = format!("{}/api/assets", self.base_url);
        debug!(url = %url, tenant_id, "Fetching assets from inventory");

        let response = self
            .http
            .get(&url)
            .header(TENANT_HEADER, tenant_id)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let assets: Vec<Asset> = serde_json::from_slice(&body)?;

        debug!(tenant_id, count = assets.len(), "Fetched assets from inventory");
        Ok(assets)
    }
}
