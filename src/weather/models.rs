use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Canonical weather snapshot for one location.
///
/// Built fresh on every fetch and never mutated; a re-fetch replaces the
/// whole value. All numeric fields are whole numbers except per-day
/// precipitation, which the provider reports fractionally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherData {
    /// Location label the data was fetched for
    pub location: String,

    /// Current temperature in Celsius
    pub temperature: i32,

    /// Perceived temperature in Celsius
    pub feels_like: i32,

    /// Relative humidity percentage
    pub humidity: i32,

    /// Wind speed in km/h
    pub wind_speed: i32,

    /// Atmospheric pressure in hPa
    pub pressure: i32,

    /// UV index
    pub uv_index: i32,

    /// Human-readable condition label
    pub condition: String,

    /// Condition icon URL
    pub icon: String,

    /// Current precipitation in mm
    pub precipitation: i32,

    /// Multi-day forecast, one entry per provider day
    pub forecast: Vec<ForecastDay>,

    /// Active weather alerts; empty when none are in effect
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
}

/// One future day's summary, sampled from the provider's mid-day reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastDay {
    /// ISO date (YYYY-MM-DD)
    pub date: String,

    /// Daily maximum temperature in Celsius
    pub max_temp: i32,

    /// Daily minimum temperature in Celsius
    pub min_temp: i32,

    /// Condition label at mid-day
    pub condition: String,

    /// Condition icon URL
    pub icon: String,

    /// Precipitation in mm (fractional)
    pub precipitation: f64,

    /// Relative humidity percentage at mid-day
    pub humidity: i32,

    /// Wind speed in km/h at mid-day
    pub wind_speed: i32,
}

/// An active weather alert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeatherAlert {
    /// Alert type label (e.g., "Wind", "Flood")
    #[serde(rename = "type")]
    pub kind: String,

    /// Classified severity level
    pub severity: Severity,

    /// Free-text description
    pub description: String,

    /// Start timestamp (ISO string)
    pub start: String,

    /// End timestamp (ISO string)
    pub end: String,
}

/// Three-level alert severity classified from the provider's numeric scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Classify a raw numeric severity.
    ///
    /// Buckets are inclusive at the upper bound: values up to 3 are low,
    /// up to 6 medium, anything above high. Total over all reals.
    pub fn from_scale(severity: f64) -> Self {
        if severity <= 3.0 {
            Severity::Low
        } else if severity <= 6.0 {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}
