//! Place endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::repos::{Category, NearbyPlace, PlaceRepo};
use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /categories - distinct category values across all places
async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = PlaceRepo::new(state.pool()).categories().await?;
    Ok(Json(categories))
}

/// GET /placesnearme/{lat}/{long} - nearest places, any category
async fn places_near_me(
    State(state): State<AppState>,
    Path((lat, long)): Path<(f64, f64)>,
) -> Result<Json<Vec<NearbyPlace>>, ApiError> {
    let places = PlaceRepo::new(state.pool()).nearby(lat, long).await?;
    Ok(Json(places))
}

/// GET /placesnearme/{lat}/{long}/{dist} - places farther than `dist` km
async fn places_near_me_beyond(
    State(state): State<AppState>,
    Path((lat, long, dist)): Path<(f64, f64, f64)>,
) -> Result<Json<Vec<NearbyPlace>>, ApiError> {
    let places = PlaceRepo::new(state.pool())
        .nearby_beyond(lat, long, dist)
        .await?;
    Ok(Json(places))
}

/// Place routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories))
        .route("/placesnearme/{lat}/{long}", get(places_near_me))
        .route(
            "/placesnearme/{lat}/{long}/{dist}",
            get(places_near_me_beyond),
        )
}
