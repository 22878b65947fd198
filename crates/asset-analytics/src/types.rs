//! Response types for the analytics views

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use ttl_cache::CacheStats;

/// Per-label counts in order of first appearance
///
/// Serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCounts(Vec<(String, u64)>);

impl GroupCounts {
    pub fn new(counts: Vec<(String, u64)>) -> Self {
        Self(counts)
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for GroupCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Totals and groupings over a tenant's assets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_assets: usize,
    pub total_value: f64,
    pub average_value: f64,
    pub assets_by_status: GroupCounts,
    pub assets_by_condition: GroupCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetSummary {
    #[serde(flatten)]
    pub stats: SummaryStats,
    pub tenant_id: String,
    pub generated_at: String,
}

/// One group of a distribution view
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShare {
    pub value: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusDistribution {
    pub status: String,
    pub count: u64,
    pub percentage: f64,
}

impl From<GroupShare> for StatusDistribution {
    fn from(share: GroupShare) -> Self {
        Self {
            status: share.value,
            count: share.count,
            percentage: share.percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConditionDistribution {
    pub condition: String,
    pub count: u64,
    pub percentage: f64,
}

impl From<GroupShare> for ConditionDistribution {
    fn from(share: GroupShare) -> Self {
        Self {
            condition: share.value,
            count: share.count,
            percentage: share.percentage,
        }
    }
}

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAnalysis {
    pub total_value: f64,
    pub average_value: f64,
    pub max_value: f64,
    pub min_value: f64,
    pub median_value: f64,
    pub asset_count: usize,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub assets_created: u64,
    pub total_value: f64,
}

/// Where the asset source has been getting its records from
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceStats {
    #[serde(flatten)]
    pub cache: CacheStats,
    pub upstream_fetches: u64,
    pub fallbacks: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_secs: u64,
    pub cache: SourceStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
}
