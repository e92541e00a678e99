use std::fmt::Display;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use super::responses::Envelope;

#[derive(Error, Debug)]
pub enum UptimersError {
    #[error("IO error\n{0}")]
    Read(#[from] std::io::Error),

    #[error("sqlx error\n{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("sqlx migrate error\n{0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),

    #[error("serde_yaml error\n{0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("time format error\n{0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("other error \n{0}")]
    Other(String),
}

/// Failures a caller can observe. Internal detail never reaches the response
/// body; it is logged where it is detected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Unable to process your Request.")]
    Internal,
}

impl ApiError {
    pub fn internal(context: impl Display, err: impl Display) -> Self {
        error!("{}: {}", context, err);
        ApiError::Internal
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::message(false, self.to_string()))
    }
}
