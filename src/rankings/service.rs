use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::weather::models::WeatherData;
use crate::weather::service::WeatherError;
use crate::weather::WeatherService;

/// Fixed set of reference cities used for the world ranking
pub static REFERENCE_CITIES: [&str; 15] = [
    "London",
    "New York",
    "Tokyo",
    "Sydney",
    "Paris",
    "Singapore",
    "Dubai",
    "Los Angeles",
    "Mumbai",
    "Toronto",
    "Rio de Janeiro",
    "Berlin",
    "Cape Town",
    "Mexico City",
    "Moscow",
];

/// Projection of WeatherData for the ranked-city list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankedLocation {
    pub name: String,
    pub temperature: i32,
    pub humidity: i32,
    pub condition: String,
    pub icon: String,
}

impl RankedLocation {
    fn project(name: &str, data: WeatherData) -> Self {
        Self {
            name: name.to_string(),
            temperature: data.temperature,
            humidity: data.humidity,
            condition: data.condition,
            icon: data.icon,
        }
    }
}

/// Sort criterion applied at presentation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Temperature,
    Humidity,
}

pub struct RankingsService {
    weather: Arc<WeatherService>,
}

impl RankingsService {
    pub fn new(weather: Arc<WeatherService>) -> Self {
        Self { weather }
    }

    /// Fetch weather for every reference city at once.
    ///
    /// All fetches are in flight concurrently and the call returns only
    /// once each has settled. A city whose fetch fails is logged and
    /// dropped; the batch itself never fails, so all cities failing yields
    /// an empty list. Output order follows REFERENCE_CITIES, not
    /// completion order.
    pub async fn fetch_reference_cities(&self) -> Vec<RankedLocation> {
        let fetches = REFERENCE_CITIES.iter().map(|city| async move {
            (*city, self.weather.get_weather(city).await)
        });

        let settled = futures::future::join_all(fetches).await;
        let ranked = collect_successes(settled);

        tracing::info!(
            fetched = ranked.len(),
            total = REFERENCE_CITIES.len(),
            "Reference city fetch completed"
        );

        ranked
    }
}

/// Keep successful fetches in their original list order, dropping failures
fn collect_successes(
    settled: Vec<(&str, Result<WeatherData, WeatherError>)>,
) -> Vec<RankedLocation> {
    settled
        .into_iter()
        .filter_map(|(city, result)| match result {
            Ok(data) => Some(RankedLocation::project(city, data)),
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Dropping city after failed fetch");
                None
            }
        })
        .collect()
}

/// Sort descending by the chosen key and keep the top `limit` entries.
/// Ties break alphabetically by name so the order is deterministic.
pub fn rank(mut locations: Vec<RankedLocation>, sort_by: SortKey, limit: usize) -> Vec<RankedLocation> {
    locations.sort_by(|a, b| {
        let primary = match sort_by {
            SortKey::Temperature => b.temperature.cmp(&a.temperature),
            SortKey::Humidity => b.humidity.cmp(&a.humidity),
        };
        primary.then_with(|| a.name.cmp(&b.name))
    });
    locations.truncate(limit);
    locations
}
