//! HTTP server for the analytics views
//!
//! Every analytics route requires an `x-tenant-id` header. Request input is
//! validated by the extractors, before any assets are fetched.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use inventory_client::TENANT_HEADER;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::aggregation::{self, GroupField, TrendMonths};
use crate::error::AppError;
use crate::source::AssetSource;
use crate::types::{
    AssetSummary, ConditionDistribution, HealthResponse, MonthlyTrend, ProbeResponse,
    StatusDistribution, ValueAnalysis,
};

const SERVICE_NAME: &str = "analytics-engine";

/// Shared state for the HTTP server
pub struct ServerState {
    pub source: AssetSource,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(source: AssetSource) -> Self {
        Self {
            source,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Tenant named by the `x-tenant-id` header
#[derive(Debug, Clone)]
pub struct TenantId(pub String);

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| TenantId(v.to_string()))
            .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", TENANT_HEADER)))
    }
}

/// Monthly trend query parameters
#[derive(Deserialize)]
pub struct TrendQuery {
    months: Option<i64>,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/ready", get(readiness))
        .route("/api/health/live", get(liveness))
        .route("/api/analytics/assets/summary", get(assets_summary))
        .route("/api/analytics/assets/by-status", get(assets_by_status))
        .route("/api/analytics/assets/by-condition", get(assets_by_condition))
        .route("/api/analytics/assets/value", get(value_analysis))
        .route("/api/analytics/trends/monthly", get(monthly_trends))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server, returning once a shutdown signal arrives
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime_secs = (now - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs,
        cache: state.source.stats().await,
    })
}

async fn readiness() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "ready" })
}

async fn liveness() -> Json<ProbeResponse> {
    Json(ProbeResponse { status: "alive" })
}

/// Totals plus status and condition counts
async fn assets_summary(
    State(state): State<SharedState>,
    TenantId(tenant_id): TenantId,
) -> Result<Json<AssetSummary>, AppError> {
    let assets = state.source.fetch(&tenant_id).await;
    let stats = aggregation::summarize(&assets)?;

    Ok(Json(AssetSummary {
        stats,
        tenant_id,
        generated_at: Utc::now().to_rfc3339(),
    }))
}

async fn assets_by_status(
    State(state): State<SharedState>,
    TenantId(tenant_id): TenantId,
) -> Json<Vec<StatusDistribution>> {
    let assets = state.source.fetch(&tenant_id).await;
    let shares = aggregation::distribution(&assets, GroupField::Status);

    Json(shares.into_iter().map(StatusDistribution::from).collect())
}

async fn assets_by_condition(
    State(state): State<SharedState>,
    TenantId(tenant_id): TenantId,
) -> Json<Vec<ConditionDistribution>> {
    let assets = state.source.fetch(&tenant_id).await;
    let shares = aggregation::distribution(&assets, GroupField::Condition);

    Json(shares.into_iter().map(ConditionDistribution::from).collect())
}

/// Total, average, max, min and median asset value
async fn value_analysis(
    State(state): State<SharedState>,
    TenantId(tenant_id): TenantId,
) -> Result<Json<ValueAnalysis>, AppError> {
    let assets = state.source.fetch(&tenant_id).await;
    Ok(Json(aggregation::value_analysis(&assets)?))
}

/// Assets created per month, newest first
async fn monthly_trends(
    State(state): State<SharedState>,
    TenantId(tenant_id): TenantId,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<Json<Vec<MonthlyTrend>>, AppError> {
    let Query(params) =
        query.map_err(|_| AppError::BadRequest("months must be an integer".to_string()))?;

    let months = match params.months {
        Some(n) => TrendMonths::new(n).ok_or_else(|| {
            AppError::BadRequest(format!(
                "months must be between {} and {}",
                TrendMonths::MIN,
                TrendMonths::MAX
            ))
        })?,
        None => TrendMonths::default(),
    };

    let assets = state.source.fetch(&tenant_id).await;
    Ok(Json(aggregation::monthly_trend(&assets, months)))
}
