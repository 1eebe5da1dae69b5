use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForwardQuery {
    /// Location to look up, e.g. "Cape Town"
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinatesResponse {
    pub location: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceNameResponse {
    pub lat: f64,
    pub lng: f64,
    /// Resolved place name, or "Unknown Location" when unresolvable
    pub name: String,
}

/// Look up coordinates for a place name. Never fails; unresolvable
/// locations come back as (0, 0).
///
/// GET /geocode/forward?q=Cape%20Town
pub async fn forward_geocode(
    State(state): State<AppState>,
    Query(query): Query<ForwardQuery>,
) -> Json<CoordinatesResponse> {
    let (lat, lng) = state.geocode_service.forward(&query.q).await;
    Json(CoordinatesResponse {
        location: query.q,
        lat,
        lng,
    })
}

/// Look up a place name for coordinates. Never fails; unresolvable
/// coordinates come back as "Unknown Location".
///
/// GET /geocode/reverse?lat=48.85&lng=2.35
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseQuery>,
) -> Json<PlaceNameResponse> {
    let name = state.geocode_service.reverse(query.lat, query.lng).await;
    Json(PlaceNameResponse {
        lat: query.lat,
        lng: query.lng,
        name,
    })
}
