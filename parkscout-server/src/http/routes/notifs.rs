//! Notification endpoints
//!
//! Responses carry every column of the place/notification join, so the
//! body is built from generically converted rows rather than a typed
//! struct.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::db::repos::NotificationRepo;
use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /notifs/{lat}/{long} - active notifications, nearest place first
async fn notifs_near_me(
    State(state): State<AppState>,
    Path((lat, long)): Path<(f64, f64)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let notifs = NotificationRepo::new(state.pool())
        .nearby_active(lat, long)
        .await?;
    Ok(Json(notifs))
}

/// GET /notifs/{lat}/{long}/{dist} - active notifications farther than
/// `dist` km
async fn notifs_near_me_beyond(
    State(state): State<AppState>,
    Path((lat, long, dist)): Path<(f64, f64, f64)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let notifs = NotificationRepo::new(state.pool())
        .nearby_active_beyond(lat, long, dist)
        .await?;
    Ok(Json(notifs))
}

/// Notification routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notifs/{lat}/{long}", get(notifs_near_me))
        .route("/notifs/{lat}/{long}/{dist}", get(notifs_near_me_beyond))
}
