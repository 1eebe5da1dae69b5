use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::{normalize_cache_key, CoordsCache};

const OPENCAGE_API_URL: &str = "https://api.opencagedata.com/geocode/v1/json";
const REVERSE_GEOCODE_API_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Coordinates returned when a forward lookup fails. Map display tolerates
/// an origin-default pin, so lookups degrade instead of erroring.
pub const FALLBACK_COORDINATES: (f64, f64) = (0.0, 0.0);

/// Name returned when a reverse lookup cannot be resolved. Callers must
/// treat this as a failed lookup and must not feed it into a weather fetch.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Internal failure reasons; these never cross the HTTP boundary because
/// both lookups degrade to sentinel values.
#[derive(Error, Debug)]
enum GeocodeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("no results for query")]
    NoResults,
}

#[derive(Debug, Deserialize)]
struct ForwardGeocodeResponse {
    results: Vec<ForwardResult>,
}

#[derive(Debug, Deserialize)]
struct ForwardResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
}

fn first_coordinates(response: ForwardGeocodeResponse) -> Result<(f64, f64), GeocodeError> {
    response
        .results
        .into_iter()
        .next()
        .map(|r| (r.geometry.lat, r.geometry.lng))
        .ok_or(GeocodeError::NoResults)
}

/// Pick a display name from a reverse-geocode payload: city wins over
/// locality, blank fields count as missing
fn resolve_place_name(response: ReverseGeocodeResponse) -> String {
    response
        .city
        .filter(|c| !c.trim().is_empty())
        .or(response.locality.filter(|l| !l.trim().is_empty()))
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

pub struct GeocodeService {
    client: Client,
    api_key: String,
    cache: CoordsCache,
}

impl GeocodeService {
    pub fn new(client: Client, api_key: &str, cache: CoordsCache) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            cache,
        }
    }

    /// Look up coordinates for a location name.
    ///
    /// Successful lookups are cached for 24 hours. Any failure degrades to
    /// FALLBACK_COORDINATES rather than propagating an error.
    pub async fn forward(&self, location: &str) -> (f64, f64) {
        let cache_key = normalize_cache_key(location);

        if let Some(coords) = self.cache.get(&cache_key) {
            tracing::debug!(location = %location, "Forward geocoding cache hit");
            return coords;
        }

        match self.lookup_forward(location).await {
            Ok(coords) => {
                self.cache.insert(cache_key, coords);
                coords
            }
            Err(e) => {
                tracing::warn!(
                    location = %location,
                    error = %e,
                    "Forward geocoding failed, using origin fallback"
                );
                FALLBACK_COORDINATES
            }
        }
    }

    async fn lookup_forward(&self, location: &str) -> Result<(f64, f64), GeocodeError> {
        tracing::debug!(location = %location, "Forward geocoding lookup");

        let response = self
            .client
            .get(OPENCAGE_API_URL)
            .query(&[("q", location), ("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let payload: ForwardGeocodeResponse = response.json().await?;
        first_coordinates(payload)
    }

    /// Look up a place name for coordinates.
    ///
    /// Returns UNKNOWN_LOCATION when the provider cannot name the place or
    /// the call fails; callers must not issue a weather fetch with it.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> String {
        match self.lookup_reverse(latitude, longitude).await {
            Ok(payload) => resolve_place_name(payload),
            Err(e) => {
                tracing::warn!(
                    latitude = %latitude,
                    longitude = %longitude,
                    error = %e,
                    "Reverse geocoding failed"
                );
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn lookup_reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseGeocodeResponse, GeocodeError> {
        tracing::debug!(latitude = %latitude, longitude = %longitude, "Reverse geocoding lookup");

        let response = self
            .client
            .get(REVERSE_GEOCODE_API_URL)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        Ok(response.json().await?)
    }
}
