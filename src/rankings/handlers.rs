use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::service::{rank, RankedLocation, SortKey};
use crate::AppState;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    /// Sort criterion: temperature (default) or humidity
    pub sort_by: Option<SortKey>,
    /// Maximum number of cities to return (default 10)
    pub limit: Option<usize>,
}

/// Get the reference cities ranked by temperature or humidity
///
/// GET /rankings?sort_by=temperature&limit=10
///
/// Individual city fetch failures are absorbed, so the response is always
/// 200 with whatever cities could be fetched.
pub async fn get_rankings(
    State(state): State<AppState>,
    Query(query): Query<RankingsQuery>,
) -> Json<Vec<RankedLocation>> {
    let sort_by = query.sort_by.unwrap_or(SortKey::Temperature);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let locations = state.rankings_service.fetch_reference_cities().await;
    Json(rank(locations, sort_by, limit))
}
