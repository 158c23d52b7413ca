//! Error types for Harbor

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

pub const MISSING_AUTH_MESSAGE: &str = "You must be authorized to hit this endpoint.";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";
pub const INSUFFICIENT_ROLE_MESSAGE: &str =
    "You are not authorized to have write access to this endpoint.";
pub const MISSING_PARAMETER_MESSAGE: &str = "You are missing a required parameter. Please include both email address and the name of your application.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{}", MISSING_AUTH_MESSAGE)]
    MissingAuth,

    #[error("{}", INVALID_TOKEN_MESSAGE)]
    InvalidToken,

    #[error("{}", INSUFFICIENT_ROLE_MESSAGE)]
    InsufficientRole,

    #[error("{}", MISSING_PARAMETER_MESSAGE)]
    MissingParameter,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl Error {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingAuth | Error::InvalidToken | Error::InsufficientRole => {
                StatusCode::FORBIDDEN
            }
            Error::MissingParameter | Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Config(_)
            | Error::Io(_)
            | Error::TomlParse(_)
            | Error::Json(_)
            | Error::Database(_)
            | Error::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
