//! Statistical views over an asset collection
//!
//! Pure functions: no I/O, no caching. Monetary values are accumulated at
//! full precision and rounded to cents only when a view is produced.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use inventory_client::Asset;

use crate::types::{
    GroupCounts, GroupShare, MonthlyTrend, SummaryStats, ValueAnalysis, DEFAULT_CURRENCY,
};

/// The collection has no records, so averages and extremes are undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDataset;

impl fmt::Display for EmptyDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No assets found")
    }
}

impl std::error::Error for EmptyDataset {}

/// Categorical field a distribution is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Status,
    Condition,
}

impl GroupField {
    fn label(self, asset: &Asset) -> &str {
        match self {
            Self::Status => &asset.status,
            Self::Condition => &asset.condition,
        }
    }
}

/// Number of months a trend view covers, always within 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendMonths(u8);

impl TrendMonths {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    pub fn new(months: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&months) {
            Some(Self(months as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for TrendMonths {
    fn default() -> Self {
        Self(6)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn count_by(assets: &[Asset], field: GroupField) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for asset in assets {
        let label = field.label(asset);
        match index.get(label) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(label, order.len());
                order.push((label.to_string(), 1));
            }
        }
    }

    order
}

/// Totals and per-status / per-condition counts
pub fn summarize(assets: &[Asset]) -> Result<SummaryStats, EmptyDataset> {
    if assets.is_empty() {
        return Err(EmptyDataset);
    }

    let total_assets = assets.len();
    let total_value: f64 = assets.iter().map(|a| a.price).sum();
    let average_value = total_value / total_assets as f64;

    Ok(SummaryStats {
        total_assets,
        total_value: round2(total_value),
        average_value: round2(average_value),
        assets_by_status: GroupCounts::new(count_by(assets, GroupField::Status)),
        assets_by_condition: GroupCounts::new(count_by(assets, GroupField::Condition)),
    })
}

/// Count and percentage share of each label, in order of first appearance
pub fn distribution(assets: &[Asset], field: GroupField) -> Vec<GroupShare> {
    let total = assets.len() as f64;

    count_by(assets, field)
        .into_iter()
        .map(|(value, count)| GroupShare {
            value,
            count,
            percentage: round2(count as f64 / total * 100.0),
        })
        .collect()
}

/// Total, average, extremes and median of asset prices
pub fn value_analysis(assets: &[Asset]) -> Result<ValueAnalysis, EmptyDataset> {
    let mut prices: Vec<f64> = assets.iter().map(|a| a.price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));

    let (Some(&min), Some(&max)) = (prices.first(), prices.last()) else {
        return Err(EmptyDataset);
    };

    let count = prices.len();
    let total: f64 = prices.iter().sum();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };

    Ok(ValueAnalysis {
        total_value: round2(total),
        average_value: round2(total / count as f64),
        max_value: round2(max),
        min_value: round2(min),
        median_value: round2(median),
        asset_count: count,
        currency: DEFAULT_CURRENCY.to_string(),
    })
}

/// Assets created per calendar month, newest month first
///
/// Records without a usable timestamp are skipped.
pub fn monthly_trend(assets: &[Asset], months: TrendMonths) -> Vec<MonthlyTrend> {
    let mut buckets: BTreeMap<String, (u64, f64)> = BTreeMap::new();

    for asset in assets {
        let Some(month) = asset.month_key() else {
            continue;
        };
        let bucket = buckets.entry(month).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += asset.price;
    }

    // `YYYY-MM` sorts lexicographically in calendar order
    buckets
        .into_iter()
        .rev()
        .take(months.get())
        .map(|(month, (count, value))| MonthlyTrend {
            month,
            assets_created: count,
            total_value: round2(value),
        })
        .collect()
}
