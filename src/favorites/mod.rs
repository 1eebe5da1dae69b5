pub mod handlers;
pub mod models;

pub use models::FavoriteLocation;

use axum::http::StatusCode;
use thiserror::Error;

use crate::db::DbError;
use crate::error::HttpError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] DbError),
}

impl HttpError for FavoritesError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Persistence(_) => Some("PERSISTENCE_ERROR"),
        }
    }
}

impl_into_response!(FavoritesError);
