use axum::{
    routing::{delete, get},
    Router,
};

use crate::favorites::handlers as favorites_handlers;
use crate::geocode::handlers as geocode_handlers;
use crate::openapi::swagger_ui;
use crate::rankings::handlers as rankings_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Build the weather API routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route(
            "/weather/compare",
            get(weather_handlers::compare_cities),
        )
        .route(
            "/weather/{location}",
            get(weather_handlers::get_weather_by_location),
        )
        .route(
            "/weather/{location}/weekly-average",
            get(weather_handlers::get_weekly_average),
        )
}

/// Build the rankings API routes
fn rankings_routes() -> Router<AppState> {
    Router::new().route("/rankings", get(rankings_handlers::get_rankings))
}

/// Build the geocoding API routes
fn geocode_routes() -> Router<AppState> {
    Router::new()
        .route("/geocode/forward", get(geocode_handlers::forward_geocode))
        .route("/geocode/reverse", get(geocode_handlers::reverse_geocode))
}

/// Build the favorites API routes (these require an identified user)
fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(favorites_handlers::list_favorites).post(favorites_handlers::add_favorite),
        )
        .route(
            "/favorites/{name}",
            delete(favorites_handlers::remove_favorite),
        )
}

/// Build all API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(weather_routes())
        .merge(rankings_routes())
        .merge(geocode_routes())
        .merge(favorites_routes())
}

/// Build the complete application router
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        // API v1 routes
        .nest("/api/v1", api_v1_routes())
        // Swagger UI for API documentation
        .merge(swagger_ui())
}
