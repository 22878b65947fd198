//! Synthetic asset records served while the inventory service is unreachable

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use inventory_client::{Asset, AssetCondition, AssetStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aggregation::round2;

pub const SYNTHETIC_ASSET_COUNT: usize = 50;
pub const MIN_PRICE: f64 = 100.0;
pub const MAX_PRICE: f64 = 10_000.0;
/// Generated dates fall between 1 and this many days before `now`
pub const MAX_AGE_DAYS: i64 = 365;

/// Produces a stand-in asset collection for a tenant
pub trait AssetGenerator: Send + Sync {
    fn generate(&self, tenant_id: &str, now: DateTime<Utc>) -> Vec<Asset>;
}

/// Random assets drawn uniformly from the known status and condition domains
pub struct SyntheticAssets {
    rng: Mutex<StdRng>,
}

impl SyntheticAssets {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible output for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AssetGenerator for SyntheticAssets {
    fn generate(&self, tenant_id: &str, now: DateTime<Utc>) -> Vec<Asset> {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng: &mut StdRng = &mut guard;

        (1..=SYNTHETIC_ASSET_COUNT)
            .map(|n| {
                let status = AssetStatus::KNOWN[rng.gen_range(0..AssetStatus::KNOWN.len())];
                let condition =
                    AssetCondition::KNOWN[rng.gen_range(0..AssetCondition::KNOWN.len())];
                let price = round2(rng.gen_range(MIN_PRICE..=MAX_PRICE));

                Asset {
                    id: format!("asset-{n}"),
                    tenant_id: tenant_id.to_string(),
                    name: Some(format!("Asset {n}")),
                    status: status.as_str().to_string(),
                    condition: condition.as_str().to_string(),
                    price,
                    acquisition_date: Some(days_before(&mut *rng, now)),
                    created_at: Some(days_before(&mut *rng, now)),
                }
            })
            .collect()
    }
}

fn days_before(rng: &mut StdRng, now: DateTime<Utc>) -> String {
    let days = rng.gen_range(1..=MAX_AGE_DAYS);
    (now - TimeDelta::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_client::parse_timestamp;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-07-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_generates_fifty_assets_for_tenant() {
        let assets = SyntheticAssets::seeded(7).generate("tenant-9", now());

        assert_eq!(assets.len(), SYNTHETIC_ASSET_COUNT);
        assert!(assets.iter().all(|a| a.tenant_id == "tenant-9"));
        assert_eq!(assets[0].id, "asset-1");
        assert_eq!(assets[49].id, "asset-50");
        assert_eq!(assets[49].name.as_deref(), Some("Asset 50"));
    }

    #[test]
    fn test_values_stay_in_domain() {
        let statuses: Vec<&str> = AssetStatus::KNOWN.iter().map(|s| s.as_str()).collect();
        let conditions: Vec<&str> = AssetCondition::KNOWN.iter().map(|c| c.as_str()).collect();

        for asset in SyntheticAssets::seeded(11).generate("tenant-1", now()) {
            assert!((MIN_PRICE..=MAX_PRICE).contains(&asset.price));
            assert!(statuses.contains(&asset.status.as_str()));
            assert!(conditions.contains(&asset.condition.as_str()));
        }
    }

    #[test]
    fn test_dates_within_past_year() {
        let now = now();
        let earliest = (now - TimeDelta::days(MAX_AGE_DAYS)).naive_utc();
        let latest = (now - TimeDelta::days(1)).naive_utc();

        for asset in SyntheticAssets::seeded(3).generate("tenant-1", now) {
            for raw in [&asset.created_at, &asset.acquisition_date] {
                let ts = parse_timestamp(raw.as_deref().unwrap()).unwrap();
                assert!(ts >= earliest && ts <= latest, "{ts} out of range");
            }
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = SyntheticAssets::seeded(42).generate("tenant-1", now());
        let b = SyntheticAssets::seeded(42).generate("tenant-1", now());
        assert_eq!(a, b);
    }
}
