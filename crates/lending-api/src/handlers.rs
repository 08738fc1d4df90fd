//! Endpoint handlers.
//!
//! - `GET /api/graph` - whole-graph projection
//! - `GET /api/graph/:label/:name` - ego network around a borrower or lender
//! - `GET /api/node/:label/:name` - node detail with direct connections
//! - `GET /api/entities` - borrower and lender listings
//! - `GET /api/stats` - aggregate counts
//! - `GET /health` - liveness

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use lending_core::source::{BorrowerSummary, GraphStats, LenderSummary};
use lending_core::EntityLabel;
use lending_vis::{assemble, expand_ego, node_detail, NodeDetail, VisGraph};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EntitiesResponse {
    pub borrowers: Vec<BorrowerSummary>,
    pub lenders: Vec<LenderSummary>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn full_graph(State(state): State<AppState>) -> Result<Json<VisGraph>, ApiError> {
    let rows = state.source.all_rows().await?;
    Ok(Json(assemble(&rows)))
}

pub async fn ego_graph(
    State(state): State<AppState>,
    Path((label, name)): Path<(String, String)>,
) -> Result<Json<VisGraph>, ApiError> {
    let label = EntityLabel::from(label);
    let ego = expand_ego(state.source.as_ref(), &label, &name).await?;
    Ok(Json(ego.into_graph()))
}

pub async fn node(
    State(state): State<AppState>,
    Path((label, name)): Path<(String, String)>,
) -> Result<Json<NodeDetail>, ApiError> {
    let label = EntityLabel::from(label);
    let detail = node_detail(state.source.as_ref(), &label, &name).await?;
    Ok(Json(detail))
}

pub async fn entities(State(state): State<AppState>) -> Result<Json<EntitiesResponse>, ApiError> {
    let borrowers = state.source.borrower_summaries().await?;
    let lenders = state.source.lender_summaries().await?;
    Ok(Json(EntitiesResponse { borrowers, lenders }))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<GraphStats>, ApiError> {
    Ok(Json(state.source.stats().await?))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
