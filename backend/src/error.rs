use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Poll not found")]
    NotFound,
    #[error("Invalid poll ID")]
    InvalidId,
    #[error("Invalid poll: {0}")]
    InvalidPoll(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> Status {
        match self {
            ApiError::NotFound => Status::NotFound,
            ApiError::InvalidId => Status::BadRequest,
            ApiError::InvalidPoll(_) => Status::BadRequest,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::InvalidId => ErrorCode::InvalidInput,
            ApiError::InvalidPoll(_) => ErrorCode::ValidationFailed,
            ApiError::Internal(_) => ErrorCode::SystemError,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Persistence(msg) => {
                error!("Poll store failure: {}", msg);
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidPoll(e.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        // Storage details stay in the log.
        let message = match &self {
            ApiError::Internal(_) => "An internal server error occurred.".to_string(),
            other => other.to_string(),
        };

        rocket::Response::build_from(Json(ErrorResponse::new(self.code(), message)).respond_to(req)?)
            .status(status)
            .ok()
    }
}
