use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::models::{AddFavoriteRequest, FavoriteLocation};
use super::FavoritesError;
use crate::session::Session;
use crate::AppState;

/// List the current user's favorites, newest first
///
/// GET /favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<FavoriteLocation>>, FavoritesError> {
    let favorites = state.favorites.list(&session.user_id).await?;
    Ok(Json(favorites))
}

/// Save a favorite location for the current user
///
/// POST /favorites {"name": "Tokyo"}
pub async fn add_favorite(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteLocation>), FavoritesError> {
    let favorite = FavoriteLocation::new(&session.user_id, request.name.trim());
    state.favorites.add(&favorite).await?;

    tracing::info!(user = %session.user_id, name = %favorite.name, "Favorite added");

    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove a favorite by exact name match.
///
/// A passthrough to the store: deleting a name that was never saved is
/// not an error, only store failures surface.
///
/// DELETE /favorites/{name}
pub async fn remove_favorite(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
) -> Result<StatusCode, FavoritesError> {
    let removed = state.favorites.remove(&session.user_id, &name).await?;

    tracing::info!(user = %session.user_id, name = %name, removed, "Favorite removal processed");

    Ok(StatusCode::NO_CONTENT)
}
