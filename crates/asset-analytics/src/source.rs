//! Per-tenant asset retrieval: cache, then inventory, then synthetic fallback

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use inventory_client::{Asset, InventoryClient, InventoryError};
use tracing::{debug, warn};
use ttl_cache::{Clock, SystemClock, TtlCache};

use crate::synthetic::AssetGenerator;
use crate::types::SourceStats;

/// A tenant's asset collection, shared between the cache and callers
pub type AssetSet = Arc<Vec<Asset>>;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Upstream provider of a tenant's assets
#[async_trait]
pub trait AssetFeed: Send + Sync {
    async fn fetch_assets(&self, tenant_id: &str) -> inventory_client::Result<Vec<Asset>>;
}

#[async_trait]
impl AssetFeed for InventoryClient {
    async fn fetch_assets(&self, tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        InventoryClient::fetch_assets(self, tenant_id).await
    }
}

/// Resolves a tenant's assets, never failing
///
/// Every resolution, real or synthetic, refreshes the tenant's cache entry,
/// so a synthetic set keeps being served for up to one TTL after the
/// inventory service recovers. Concurrent misses for the same tenant are not
/// de-duplicated.
pub struct AssetSource {
    feed: Arc<dyn AssetFeed>,
    generator: Arc<dyn AssetGenerator>,
    cache: TtlCache<String, AssetSet>,
    clock: Arc<dyn Clock>,
    upstream_timeout: Duration,
    upstream_fetches: AtomicU64,
    fallbacks: AtomicU64,
}

impl AssetSource {
    pub fn new(
        feed: Arc<dyn AssetFeed>,
        generator: Arc<dyn AssetGenerator>,
        cache_ttl: Duration,
        upstream_timeout: Duration,
    ) -> Self {
        Self::with_clock(
            feed,
            generator,
            cache_ttl,
            upstream_timeout,
            Arc::new(SystemClock),
        )
    }

    /// Same as [`AssetSource::new`] with an explicit time source for the
    /// cache and the synthetic generator
    pub fn with_clock(
        feed: Arc<dyn AssetFeed>,
        generator: Arc<dyn AssetGenerator>,
        cache_ttl: Duration,
        upstream_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            feed,
            generator,
            cache: TtlCache::with_clock(cache_ttl, clock.clone()),
            clock,
            upstream_timeout,
            upstream_fetches: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Get the tenant's assets
    pub async fn fetch(&self, tenant_id: &str) -> AssetSet {
        if let Some(cached) = self.cache.get(tenant_id).await {
            debug!(tenant_id, count = cached.len(), "Serving cached assets");
            return cached;
        }
        debug!(tenant_id, "Asset cache miss");

        let assets = match self.fetch_upstream(tenant_id).await {
            Ok(assets) => {
                self.upstream_fetches.fetch_add(1, Ordering::Relaxed);
                debug!(tenant_id, count = assets.len(), "Fetched assets from inventory");
                assets
            }
            Err(e) => {
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(
                    tenant_id,
                    reason = e.kind(),
                    error = %e,
                    "Inventory service unavailable, serving synthetic assets"
                );
                self.generator.generate(tenant_id, self.clock.now())
            }
        };

        let assets = Arc::new(assets);
        self.cache.set(tenant_id.to_string(), assets.clone()).await;
        assets
    }

    async fn fetch_upstream(&self, tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        tokio::time::timeout(self.upstream_timeout, self.feed.fetch_assets(tenant_id))
            .await
            .map_err(|_| InventoryError::Timeout)?
    }

    pub async fn stats(&self) -> SourceStats {
        SourceStats {
            cache: self.cache.stats().await,
            upstream_fetches: self.upstream_fetches.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}
