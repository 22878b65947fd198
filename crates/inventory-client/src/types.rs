//! Wire types for inventory asset records

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Label substituted when a record omits its status or condition
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Lifecycle status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    InMaintenance,
    Retired,
    Disposed,
    Unknown,
}

impl AssetStatus {
    /// Statuses a real record can carry
    pub const KNOWN: [AssetStatus; 4] = [
        AssetStatus::Active,
        AssetStatus::InMaintenance,
        AssetStatus::Retired,
        AssetStatus::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::InMaintenance => "IN_MAINTENANCE",
            Self::Retired => "RETIRED",
            Self::Disposed => "DISPOSED",
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical condition of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl AssetCondition {
    /// Conditions a real record can carry
    pub const KNOWN: [AssetCondition; 4] = [
        AssetCondition::Excellent,
        AssetCondition::Good,
        AssetCondition::Fair,
        AssetCondition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asset record as returned by `GET /api/assets`
///
/// `status` and `condition` keep the label the service sent so that grouping
/// reflects whatever vocabulary the inventory uses; only a missing or null
/// label is replaced with [`UNKNOWN_LABEL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "unknown_label", deserialize_with = "label_or_unknown")]
    pub status: String,
    #[serde(default = "unknown_label", deserialize_with = "label_or_unknown")]
    pub condition: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Asset {
    /// The date-time used for calendar bucketing
    ///
    /// `createdAt` wins whenever it is present; `acquisitionDate` is only
    /// consulted when `createdAt` is missing or blank. A present but
    /// unparsable value yields `None`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = match self.created_at.as_deref() {
            Some(created) if !created.trim().is_empty() => created,
            _ => self.acquisition_date.as_deref()?,
        };
        parse_timestamp(raw)
    }

    /// `YYYY-MM` of [`Asset::timestamp`]
    pub fn month_key(&self) -> Option<String> {
        self.timestamp().map(|ts| ts.format("%Y-%m").to_string())
    }
}

/// Parse an ISO-8601 timestamp as written, without timezone conversion
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive date-times with `T` or a
/// space separator and optional fractional seconds, and plain dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn unknown_label() -> String {
    UNKNOWN_LABEL.to_string()
}

fn label_or_unknown<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.unwrap_or_else(unknown_label))
}

/// Strings pass through, numbers are formatted, anything else is empty
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Numbers pass through, numeric strings are parsed, anything else is 0
fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}
