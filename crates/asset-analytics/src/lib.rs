//! Asset Analytics Library
//!
//! Read-only statistical views over a tenant's asset records: totals,
//! status and condition distributions, value statistics, and monthly
//! creation trends. Records come from the inventory service through a
//! short-lived per-tenant cache, with a synthetic data set standing in
//! whenever the inventory service cannot be reached.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod server;
pub mod source;
pub mod synthetic;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{AppError, Result, ServiceError};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use source::{AssetFeed, AssetSet, AssetSource};
pub use synthetic::{AssetGenerator, SyntheticAssets};
