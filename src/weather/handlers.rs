use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::models::WeatherData;
use super::service::{weekly_average, WeatherError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// Location to fetch weather for
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated pair of locations, e.g. "London,Tokyo"
    pub cities: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyAverageResponse {
    pub location: String,
    /// Mean of each forecast day's (max+min)/2, rounded
    pub average_temp: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompareResponse {
    pub cities: Vec<WeatherData>,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Get current conditions and 7-day forecast
///
/// GET /weather?location=London
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherData>, WeatherError> {
    let location = query
        .location
        .unwrap_or_else(|| state.config.default_location.clone());

    let weather = state.weather_service.get_weather(&location).await?;
    Ok(Json(weather))
}

/// Get current conditions and 7-day forecast by path parameter
///
/// GET /weather/{location}
pub async fn get_weather_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<WeatherData>, WeatherError> {
    let weather = state.weather_service.get_weather(&location).await?;
    Ok(Json(weather))
}

/// Get the average temperature over the forecast week
///
/// GET /weather/{location}/weekly-average
pub async fn get_weekly_average(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<WeeklyAverageResponse>, WeatherError> {
    let weather = state.weather_service.get_weather(&location).await?;
    let average_temp = weekly_average(&weather.forecast)?;

    Ok(Json(WeeklyAverageResponse {
        location: weather.location,
        average_temp,
    }))
}

/// Split a comma-separated cities parameter into exactly two locations,
/// ignoring surrounding whitespace and empty segments
fn parse_compare_pair(cities: &str) -> Result<(&str, &str), WeatherError> {
    let cities: Vec<&str> = cities
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    match cities.as_slice() {
        [first, second] => Ok((*first, *second)),
        _ => Err(WeatherError::InvalidRequest(
            "cities must name exactly two locations, e.g. cities=London,Tokyo".to_string(),
        )),
    }
}

/// Compare two cities side by side. Both fetches run concurrently and
/// either failing fails the comparison.
///
/// GET /weather/compare?cities=London,Tokyo
pub async fn compare_cities(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, WeatherError> {
    let (first, second) = parse_compare_pair(&query.cities)?;

    let (a, b) = tokio::try_join!(
        state.weather_service.get_weather(first),
        state.weather_service.get_weather(second),
    )?;

    Ok(Json(CompareResponse { cities: vec![a, b] }))
}
