use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::favorites::models::{AddFavoriteRequest, FavoriteLocation};
use crate::geocode::handlers::{CoordinatesResponse, PlaceNameResponse};
use crate::rankings::service::RankedLocation;
use crate::weather::handlers::{CompareResponse, WeeklyAverageResponse};
use crate::weather::models::{ForecastDay, Severity, WeatherAlert, WeatherData};

/// OpenAPI documentation for the wxboard API
///
/// This provides basic schema documentation. Full path annotations
/// can be added incrementally to handlers as needed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "wxboard API",
        version = "1.0.0",
        description = "Weather dashboard API backed by wttr.in: current conditions and forecasts, ranked world cities, geocoding, and per-user favorite locations.",
    ),
    tags(
        (name = "weather", description = "Current conditions, forecasts, weekly averages, city comparison"),
        (name = "rankings", description = "Reference cities ranked by temperature or humidity"),
        (name = "geocode", description = "Forward and reverse geocoding"),
        (name = "favorites", description = "Per-user favorite locations")
    ),
    components(
        schemas(
            ErrorResponse,
            WeatherData,
            ForecastDay,
            WeatherAlert,
            Severity,
            WeeklyAverageResponse,
            CompareResponse,
            RankedLocation,
            CoordinatesResponse,
            PlaceNameResponse,
            FavoriteLocation,
            AddFavoriteRequest,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
