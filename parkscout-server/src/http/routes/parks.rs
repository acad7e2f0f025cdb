//! Park endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::repos::{NearbyPark, ParkInfo, ParkRepo};
use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /parksnearme/{lat}/{long} - nearest parks with free spots
async fn parks_near_me(
    State(state): State<AppState>,
    Path((lat, long)): Path<(f64, f64)>,
) -> Result<Json<Vec<NearbyPark>>, ApiError> {
    let parks = ParkRepo::new(state.pool()).nearby(lat, long).await?;
    Ok(Json(parks))
}

/// GET /parksnearme/{lat}/{long}/{dist} - parks farther than `dist` km
async fn parks_near_me_beyond(
    State(state): State<AppState>,
    Path((lat, long, dist)): Path<(f64, f64, f64)>,
) -> Result<Json<Vec<NearbyPark>>, ApiError> {
    let parks = ParkRepo::new(state.pool())
        .nearby_beyond(lat, long, dist)
        .await?;
    Ok(Json(parks))
}

/// GET /parkInfo/{id} - spot counts for one park
///
/// An unknown id yields an empty array, not an error.
async fn park_info(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ParkInfo>>, ApiError> {
    let info = ParkRepo::new(state.pool()).info(id).await?;
    Ok(Json(info))
}

/// GET /parkUpdate/{id}/{nfreespots} - set a park's free-spot count
///
/// A GET that mutates; deployed clients call it this way.
async fn park_update(
    State(state): State<AppState>,
    Path((id, nfreespots)): Path<(i32, i32)>,
) -> Result<Json<String>, ApiError> {
    ParkRepo::new(state.pool())
        .set_free_spots(id, nfreespots)
        .await?;

    // Message text matches what deployed clients already parse.
    Ok(Json(format!(
        "park updated Succesfully with {nfreespots} free spots "
    )))
}

/// Park routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/parksnearme/{lat}/{long}", get(parks_near_me))
        .route("/parksnearme/{lat}/{long}/{dist}", get(parks_near_me_beyond))
        .route("/parkInfo/{id}", get(park_info))
        .route("/parkUpdate/{id}/{nfreespots}", get(park_update))
}

#[cfg(test)]
mod tests {
    // Endpoint behavior is covered by the repository integration tests
    // and the router tests in http::server.
}
