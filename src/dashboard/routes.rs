use axum::extract::State;
use axum::response::{Html, Json};
use serde_json::{json, Value};
use tracing::info;

use super::error::AppError;
use crate::charts::DashboardView;
use crate::{AsyncSectorTracker, RefreshSummary};

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /api/table
///
/// The flat table of every recorded (date, sector) pair.
pub async fn get_table(
    State(tracker): State<AsyncSectorTracker>,
) -> Result<Json<Value>, AppError> {
    let rows = tracker.table().await?;
    let count = rows.len();
    Ok(Json(json!({ "data": rows, "count": count })))
}

/// GET /api/dashboard
///
/// Table plus both chart views, recomputed from the stored history.
pub async fn get_dashboard(
    State(tracker): State<AsyncSectorTracker>,
) -> Result<Json<DashboardView>, AppError> {
    Ok(Json(tracker.dashboard().await?))
}

/// POST /api/refresh
///
/// Fetch today's figures and record them. Upstream failures come back as
/// 502 with the error message; the stored history is unchanged.
pub async fn refresh(
    State(tracker): State<AsyncSectorTracker>,
) -> Result<Json<RefreshSummary>, AppError> {
    info!("Refresh requested");
    Ok(Json(tracker.refresh_today().await?))
}
