use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::constants::messages;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{}", messages::UNAUTHORIZED)]
    Unauthorized,

    #[error("Collection '{0}' does not exist")]
    CollectionMissing(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    LimitExceeded(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Request body exceeds the limit of {0} bytes.")]
    PayloadTooLarge(usize),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every failed response.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub status: &'static str,
    pub message: String,
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Message safe to show to clients. Server-side failures never leak
    /// their underlying cause.
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::Database(_) | GatewayError::Config(_) | GatewayError::Internal(_) => {
                messages::INTERNAL.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Normalizes any failure into the status code and body sent to the client.
    pub fn process(&self) -> (StatusCode, FailureBody) {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = FailureBody {
            status: "failure",
            message: self.client_message(),
        };

        (status, body)
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::CollectionMissing(_) => StatusCode::BAD_REQUEST,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::LimitExceeded(_) => StatusCode::FORBIDDEN,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = self.process();
        HttpResponse::build(status).json(body)
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
