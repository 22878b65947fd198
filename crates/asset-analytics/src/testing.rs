//! Test doubles shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inventory_client::{Asset, InventoryError};
use tokio::sync::Barrier;
use ttl_cache::ManualClock;

use crate::source::AssetFeed;

pub fn test_clock() -> Arc<ManualClock> {
    let start = DateTime::parse_from_rfc3339("2024-04-10T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Arc::new(ManualClock::new(start))
}

fn asset(
    id: &str,
    tenant_id: &str,
    status: &str,
    condition: &str,
    price: f64,
    created_at: Option<&str>,
    acquisition_date: Option<&str>,
) -> Asset {
    Asset {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        name: Some(format!("Asset {id}")),
        status: status.to_string(),
        condition: condition.to_string(),
        price,
        acquisition_date: acquisition_date.map(str::to_string),
        created_at: created_at.map(str::to_string),
    }
}

/// Four assets priced 100..=400 spread over three months
pub fn sample_assets(tenant_id: &str) -> Vec<Asset> {
    vec![
        asset("a-1", tenant_id, "ACTIVE", "GOOD", 100.0, Some("2024-01-05T10:00:00.000Z"), None),
        asset("a-2", tenant_id, "ACTIVE", "FAIR", 200.0, Some("2024-01-20T10:00:00.000Z"), None),
        asset("a-3", tenant_id, "RETIRED", "GOOD", 300.0, Some("2024-03-02T10:00:00.000Z"), None),
        asset("a-4", tenant_id, "IN_MAINTENANCE", "POOR", 400.0, None, Some("2023-12-15")),
    ]
}

/// Answers from a fixed asset list, optionally failing the first calls
pub struct ScriptedFeed {
    assets: Vec<Asset>,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
    tenants: Mutex<Vec<String>>,
}

impl ScriptedFeed {
    pub fn ok(assets: Vec<Asset>) -> Self {
        Self::failing_first(0, assets)
    }

    pub fn failing_then_ok(assets: Vec<Asset>) -> Self {
        Self::failing_first(1, assets)
    }

    fn failing_first(failures: usize, assets: Vec<Asset>) -> Self {
        Self {
            assets,
            failures_left: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
            tenants: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tenants(&self) -> Vec<String> {
        self.tenants.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetFeed for ScriptedFeed {
    async fn fetch_assets(&self, tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tenants.lock().unwrap().push(tenant_id.to_string());

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(InventoryError::Status(503));
        }
        Ok(self.assets.clone())
    }
}

/// Holds every call until `parties` calls are in flight, then answers
pub struct GatedFeed {
    assets: Vec<Asset>,
    gate: Barrier,
    calls: AtomicUsize,
}

impl GatedFeed {
    pub fn new(parties: usize, assets: Vec<Asset>) -> Self {
        Self {
            assets,
            gate: Barrier::new(parties),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFeed for GatedFeed {
    async fn fetch_assets(&self, _tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.wait().await;
        Ok(self.assets.clone())
    }
}

/// Always fails with the given status
pub struct FailingFeed(u16);

impl FailingFeed {
    pub fn status(code: u16) -> Self {
        Self(code)
    }
}

#[async_trait]
impl AssetFeed for FailingFeed {
    async fn fetch_assets(&self, _tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        Err(InventoryError::Status(self.0))
    }
}

/// Answers with an empty list after a delay
pub struct SlowFeed(pub Duration);

#[async_trait]
impl AssetFeed for SlowFeed {
    async fn fetch_assets(&self, _tenant_id: &str) -> inventory_client::Result<Vec<Asset>> {
        tokio::time::sleep(self.0).await;
        Ok(Vec::new())
    }
}
