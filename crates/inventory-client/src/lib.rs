//! Inventory Service Client
//!
//! Fetches a tenant's asset records from the inventory service
//! (`GET /api/assets` with an `x-tenant-id` header) and exposes the wire
//! record type together with the enumerated status and condition domains.

mod client;
mod error;
mod types;

pub use client::{InventoryClient, DEFAULT_TIMEOUT, TENANT_HEADER};
pub use error::{InventoryError, Result};
pub use types::{parse_timestamp, Asset, AssetCondition, AssetStatus, UNKNOWN_LABEL};
