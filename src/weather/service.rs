use axum::http::StatusCode;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::models::{ForecastDay, Severity, WeatherAlert, WeatherData};
use crate::error::HttpError;
use crate::impl_into_response;

const WTTR_API_URL: &str = "https://wttr.in";
const ICON_URL_TEMPLATE: &str = "https://cdn.weatherapi.com/weather/64x64/day";

/// Hourly sample used as each forecast day's representative reading.
/// Fixed at the mid-day entry so repeated fetches of the same payload
/// always produce identical output.
const FORECAST_HOURLY_INDEX: usize = 4;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Weather provider returned an error: {0}")]
    UpstreamStatus(String),

    #[error("Malformed weather response: {0}")]
    MalformedResponse(String),

    #[error("Cannot average an empty forecast")]
    EmptyForecast,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamStatus(_) => StatusCode::BAD_REQUEST,
            Self::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::EmptyForecast => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::UpstreamStatus(_) => Some("UPSTREAM_ERROR"),
            Self::MalformedResponse(_) => Some("MALFORMED_RESPONSE"),
            Self::EmptyForecast => Some("EMPTY_FORECAST"),
            Self::InvalidRequest(_) => Some("INVALID_REQUEST"),
        }
    }
}

impl_into_response!(WeatherError);

/// Raw wttr.in `format=j1` payload shapes. All numeric fields arrive as
/// strings and are parsed during normalization.
#[derive(Debug, Deserialize)]
pub struct WttrResponse {
    pub current_condition: Vec<CurrentCondition>,
    pub weather: Vec<DailyEntry>,
    #[serde(default)]
    pub weather_alerts: Vec<RawAlert>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentCondition {
    #[serde(rename = "temp_C")]
    pub temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    pub feels_like_c: String,
    pub humidity: String,
    #[serde(rename = "windspeedKmph")]
    pub windspeed_kmph: String,
    pub pressure: String,
    #[serde(rename = "uvIndex")]
    pub uv_index: String,
    #[serde(rename = "precipMM")]
    pub precip_mm: String,
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<DescEntry>,
    #[serde(rename = "weatherCode")]
    pub weather_code: String,
}

#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    pub date: String,
    #[serde(rename = "maxtempC")]
    pub maxtemp_c: String,
    #[serde(rename = "mintempC")]
    pub mintemp_c: String,
    pub hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyEntry {
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<DescEntry>,
    #[serde(rename = "weatherCode")]
    pub weather_code: String,
    #[serde(rename = "precipMM")]
    pub precip_mm: String,
    pub humidity: String,
    #[serde(rename = "windspeedKmph")]
    pub windspeed_kmph: String,
}

#[derive(Debug, Deserialize)]
pub struct DescEntry {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct RawAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: f64,
    pub description: String,
    pub start: String,
    pub end: String,
}

/// Parse a provider numeric string as a whole number, truncating toward zero
fn parse_int(value: &str, field: &str) -> Result<i32, WeatherError> {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v.trunc() as i32)
        .map_err(|_| WeatherError::MalformedResponse(format!("{}: invalid number '{}'", field, value)))
}

/// Parse a provider numeric string as a fractional value
fn parse_float(value: &str, field: &str) -> Result<f64, WeatherError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::MalformedResponse(format!("{}: invalid number '{}'", field, value)))
}

fn icon_url(weather_code: &str) -> String {
    format!("{}/{}.png", ICON_URL_TEMPLATE, weather_code)
}

fn condition_label(desc: &[DescEntry], field: &str) -> Result<String, WeatherError> {
    desc.first()
        .map(|d| d.value.clone())
        .ok_or_else(|| WeatherError::MalformedResponse(format!("{}: missing description", field)))
}

/// Convert a raw wttr.in payload into the canonical WeatherData shape.
///
/// Fails with MalformedResponse on any shape deviation; callers never see
/// partially populated data.
fn normalize(raw: WttrResponse, location: &str) -> Result<WeatherData, WeatherError> {
    let current = raw.current_condition.first().ok_or_else(|| {
        WeatherError::MalformedResponse("current_condition is empty".to_string())
    })?;

    let forecast = raw
        .weather
        .iter()
        .map(|day| {
            let sample = day.hourly.get(FORECAST_HOURLY_INDEX).ok_or_else(|| {
                WeatherError::MalformedResponse(format!(
                    "day {}: missing hourly sample {}",
                    day.date, FORECAST_HOURLY_INDEX
                ))
            })?;

            Ok(ForecastDay {
                date: day.date.clone(),
                max_temp: parse_int(&day.maxtemp_c, "maxtempC")?,
                min_temp: parse_int(&day.mintemp_c, "mintempC")?,
                condition: condition_label(&sample.weather_desc, "hourly weatherDesc")?,
                icon: icon_url(&sample.weather_code),
                precipitation: parse_float(&sample.precip_mm, "hourly precipMM")?,
                humidity: parse_int(&sample.humidity, "hourly humidity")?,
                wind_speed: parse_int(&sample.windspeed_kmph, "hourly windspeedKmph")?,
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    let alerts = raw
        .weather_alerts
        .into_iter()
        .map(|alert| WeatherAlert {
            kind: alert.kind,
            severity: Severity::from_scale(alert.severity),
            description: alert.description,
            start: alert.start,
            end: alert.end,
        })
        .collect();

    Ok(WeatherData {
        location: location.to_string(),
        temperature: parse_int(&current.temp_c, "temp_C")?,
        feels_like: parse_int(&current.feels_like_c, "FeelsLikeC")?,
        humidity: parse_int(&current.humidity, "humidity")?,
        wind_speed: parse_int(&current.windspeed_kmph, "windspeedKmph")?,
        pressure: parse_int(&current.pressure, "pressure")?,
        uv_index: parse_int(&current.uv_index, "uvIndex")?,
        condition: condition_label(&current.weather_desc, "weatherDesc")?,
        icon: icon_url(&current.weather_code),
        precipitation: parse_int(&current.precip_mm, "precipMM")?,
        forecast,
        alerts,
    })
}

/// Average of each forecast day's (max+min)/2, rounded to the nearest
/// whole degree
pub fn weekly_average(forecast: &[ForecastDay]) -> Result<i32, WeatherError> {
    if forecast.is_empty() {
        return Err(WeatherError::EmptyForecast);
    }

    let sum: f64 = forecast
        .iter()
        .map(|day| f64::from(day.max_temp + day.min_temp) / 2.0)
        .sum();

    Ok((sum / forecast.len() as f64).round() as i32)
}

pub struct WeatherService {
    client: Client,
}

impl WeatherService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch current conditions and the 7-day forecast for a location.
    ///
    /// No retry happens here; a failed fetch surfaces to the caller, who
    /// re-invokes if the user asks again.
    pub async fn get_weather(&self, location: &str) -> Result<WeatherData, WeatherError> {
        tracing::debug!(location = %location, "Fetching weather data");

        let url = format!("{}/{}", WTTR_API_URL, urlencoding::encode(location));
        let response = self
            .client
            .get(&url)
            .query(&[("format", "j1"), ("days", "7")])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received wttr.in response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WeatherError::UpstreamStatus(if text.is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, text)
            }));
        }

        let body = response.text().await?;
        let raw: WttrResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        let weather = normalize(raw, location)?;

        tracing::info!(
            location = %weather.location,
            temp = %weather.temperature,
            days = weather.forecast.len(),
            "Weather data fetched successfully"
        );

        Ok(weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hourly_entry(desc: &str, code: &str, precip: &str, humidity: &str, wind: &str) -> serde_json::Value {
        json!({
            "weatherDesc": [{"value": desc}],
            "weatherCode": code,
            "precipMM": precip,
            "humidity": humidity,
            "windspeedKmph": wind,
        })
    }

    /// A provider day whose hourly entries differ per index, so sampling
    /// the wrong index fails the assertions
    fn provider_day(date: &str) -> serde_json::Value {
        let hourly: Vec<serde_json::Value> = (0..8)
            .map(|i| {
                hourly_entry(
                    &format!("desc-{}", i),
                    &format!("{}", 100 + i),
                    &format!("{}.5", i),
                    &format!("{}", 40 + i),
                    &format!("{}", 10 + i),
                )
            })
            .collect();

        json!({
            "date": date,
            "maxtempC": "18",
            "mintempC": "9",
            "hourly": hourly,
        })
    }

    fn sample_payload(days: usize) -> WttrResponse {
        let weather: Vec<serde_json::Value> =
            (0..days).map(|i| provider_day(&format!("2026-08-{:02}", i + 1))).collect();

        serde_json::from_value(json!({
            "current_condition": [{
                "temp_C": "11",
                "FeelsLikeC": "9",
                "humidity": "71",
                "windspeedKmph": "22",
                "pressure": "1011",
                "uvIndex": "5",
                "precipMM": "0.0",
                "weatherDesc": [{"value": "Sunny"}],
                "weatherCode": "113",
            }],
            "weather": weather,
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_current_conditions() {
        let data = normalize(sample_payload(3), "London").unwrap();

        assert_eq!(data.location, "London");
        assert_eq!(data.temperature, 11);
        assert_eq!(data.feels_like, 9);
        assert_eq!(data.humidity, 71);
        assert_eq!(data.wind_speed, 22);
        assert_eq!(data.pressure, 1011);
        assert_eq!(data.uv_index, 5);
        assert_eq!(data.condition, "Sunny");
        assert_eq!(
            data.icon,
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
        assert_eq!(data.precipitation, 0);
    }

    #[test]
    fn test_normalize_forecast_length_matches_provider_days() {
        for days in [3, 5, 7] {
            let data = normalize(sample_payload(days), "London").unwrap();
            assert_eq!(data.forecast.len(), days);
        }
    }

    #[test]
    fn test_forecast_samples_fifth_hourly_entry() {
        let data = normalize(sample_payload(1), "London").unwrap();
        let day = &data.forecast[0];

        // Index 4 carries desc-4 / code 104 / 4.5 mm / 44% / 14 km/h
        assert_eq!(day.condition, "desc-4");
        assert_eq!(
            day.icon,
            "https://cdn.weatherapi.com/weather/64x64/day/104.png"
        );
        assert_eq!(day.precipitation, 4.5);
        assert_eq!(day.humidity, 44);
        assert_eq!(day.wind_speed, 14);
        assert_eq!(day.max_temp, 18);
        assert_eq!(day.min_temp, 9);
        assert_eq!(day.date, "2026-08-01");
    }

    #[test]
    fn test_normalize_missing_current_condition_fails() {
        let mut raw = sample_payload(3);
        raw.current_condition.clear();

        let err = normalize(raw, "London").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn test_normalize_short_hourly_breakdown_fails() {
        let mut raw = sample_payload(2);
        raw.weather[1].hourly.truncate(FORECAST_HOURLY_INDEX);

        let err = normalize(raw, "London").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn test_normalize_unparsable_numeric_fails() {
        let mut raw = sample_payload(1);
        raw.current_condition[0].temp_c = "n/a".to_string();

        let err = normalize(raw, "London").unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn test_normalize_missing_alerts_field_yields_empty_collection() {
        let data = normalize(sample_payload(3), "London").unwrap();
        assert!(data.alerts.is_empty());
    }

    #[test]
    fn test_normalize_classifies_alert_severity() {
        let mut raw = sample_payload(1);
        raw.weather_alerts = serde_json::from_value(json!([
            {
                "type": "Wind",
                "severity": 2,
                "description": "Strong gusts expected",
                "start": "2026-08-01T06:00:00Z",
                "end": "2026-08-01T18:00:00Z",
            },
            {
                "type": "Flood",
                "severity": 8,
                "description": "River levels rising",
                "start": "2026-08-01T00:00:00Z",
                "end": "2026-08-02T00:00:00Z",
            }
        ]))
        .unwrap();

        let data = normalize(raw, "London").unwrap();
        assert_eq!(data.alerts.len(), 2);
        assert_eq!(data.alerts[0].severity, crate::weather::models::Severity::Low);
        assert_eq!(data.alerts[0].kind, "Wind");
        assert_eq!(data.alerts[1].severity, crate::weather::models::Severity::High);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            WeatherError::UpstreamStatus("HTTP 503".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WeatherError::MalformedResponse("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherError::EmptyForecast.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherError::InvalidRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_parse_int_truncates_toward_zero() {
        assert_eq!(parse_int("7.9", "f").unwrap(), 7);
        assert_eq!(parse_int("-3.7", "f").unwrap(), -3);
        assert_eq!(parse_int("11", "f").unwrap(), 11);
        assert_eq!(parse_int(" 22 ", "f").unwrap(), 22);
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert!(parse_int("", "f").is_err());
        assert!(parse_int("abc", "f").is_err());
    }

    fn forecast_day(max: i32, min: i32) -> ForecastDay {
        ForecastDay {
            date: "2026-08-01".to_string(),
            max_temp: max,
            min_temp: min,
            condition: "Sunny".to_string(),
            icon: String::new(),
            precipitation: 0.0,
            humidity: 50,
            wind_speed: 10,
        }
    }

    #[test]
    fn test_weekly_average() {
        let forecast = vec![forecast_day(10, 0), forecast_day(20, 10), forecast_day(30, 20)];
        assert_eq!(weekly_average(&forecast).unwrap(), 15);
    }

    #[test]
    fn test_weekly_average_rounds_to_nearest() {
        // Daily means 5 and 10 -> 7.5 rounds up
        let forecast = vec![forecast_day(10, 0), forecast_day(15, 5)];
        assert_eq!(weekly_average(&forecast).unwrap(), 8);
    }

    #[test]
    fn test_weekly_average_empty_forecast_is_an_error() {
        let err = weekly_average(&[]).unwrap_err();
        assert!(matches!(err, WeatherError::EmptyForecast));
    }
}
