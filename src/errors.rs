use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;

use crate::views::layout::error_page;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadGateway(msg) => write!(f, "Backend error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl AppError {
    /// Text shown to the user. Internal details stay in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::BadGateway(msg) => msg,
            AppError::InternalError(_) => "Something went wrong, please try again",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let AppError::InternalError(msg) = self {
            tracing::error!("Internal error: {}", msg);
        }
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::html())
            .body(error_page(self.user_message()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(msg) => AppError::NotFound(msg),
            GatewayError::InvalidUrl(msg) => AppError::InternalError(msg),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Failures talking to the resume backend.
///
/// `Transport` and `Status` look the same to the user; they are kept apart
/// for the logs.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[display("Backend unreachable: {_0}")]
    Transport(String),

    #[display("Backend responded with status {_0}")]
    Status(u16),

    #[display("{_0}")]
    NotFound(String),

    #[display("Unreadable backend response: {_0}")]
    Decode(String),

    #[display("Invalid backend URL: {_0}")]
    InvalidUrl(String),
}

impl GatewayError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            GatewayError::Status(status.as_u16())
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}
