//! Error types for logsim
//!
//! One enum covers the control surface, the synthesizer and the sinks.
//! Errors raised inside the emission loop are logged and counted there,
//! they never leave the loop.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

use crate::api::RatesResponse;
use crate::core::Category;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid category: {name}")]
    InvalidCategory { name: String },

    #[error("Invalid rate for {category}: {value}")]
    InvalidRate { category: Category, value: String },

    #[error("Failed to append to {category} log at {}", path.display())]
    SinkWrite {
        category: Category,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn invalid_category(name: impl Into<String>) -> Self {
        Self::InvalidCategory { name: name.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// HTTP status used when the error reaches the control surface
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCategory { .. } | Self::InvalidRate { .. } => StatusCode::BAD_REQUEST,
            Self::Config { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SinkWrite { .. } | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SimError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(RatesResponse::error(&self.to_string()))).into_response()
    }
}
