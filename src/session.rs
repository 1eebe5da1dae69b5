use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;

/// Header carrying the opaque user id issued by the external identity provider.
///
/// Authentication itself happens upstream; this service only needs to know
/// which user a request acts for.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Identity context for the current request.
///
/// Extracted explicitly per handler rather than held in ambient state, so
/// every operation that touches per-user data declares it in its signature.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
}

/// Rejection returned when no user id accompanies the request
#[derive(Debug)]
pub struct MissingUser;

impl IntoResponse for MissingUser {
    fn into_response(self) -> Response {
        tracing::warn!("Request to a per-user endpoint without {}", USER_ID_HEADER);
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::with_code(
                format!("User identity required. Provide the {} header.", USER_ID_HEADER),
                "MISSING_USER",
            )),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = MissingUser;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match user_id {
            Some(id) => Ok(Session {
                user_id: id.to_string(),
            }),
            None => Err(MissingUser),
        }
    }
}
