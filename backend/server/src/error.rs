use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Invalid password.")]
    Unauthorized,

    #[error("Name and description are required.")]
    InvalidInput,

    #[error("The requested term was not found.")]
    EntryNotFound,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unauthorized => AppError::Unauthorized,
            StoreError::InvalidInput => AppError::InvalidInput,
            StoreError::NotFound(_) => AppError::EntryNotFound,
            other => AppError::StorageUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload | AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::EntryNotFound => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) | AppError::Bind { .. } | AppError::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // detail pages are browsed directly, so their miss is plain text
        if let AppError::EntryNotFound = self {
            return (status, self.to_string()).into_response();
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
