//! Errors surfaced by estate operations and their HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estate_core::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Body could not be read as the expected JSON
    #[error("{0}")]
    InvalidBody(String),
    #[error("estate is not exist")]
    NotFound,
    #[error("a tree already stands at ({x}, {y})")]
    CellOccupied { x: u32, y: u32 },
    #[error("estate has no trees")]
    NoTrees,
    #[error("storage failure")]
    Storage(#[from] anyhow::Error),
}

impl EstateError {
    pub fn status(&self) -> StatusCode {
        match self {
            EstateError::Validation(_) | EstateError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            EstateError::NotFound | EstateError::NoTrees => StatusCode::NOT_FOUND,
            EstateError::CellOccupied { .. } => StatusCode::CONFLICT,
            EstateError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for EstateError {
    fn from(rejection: JsonRejection) -> Self {
        EstateError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for EstateError {
    fn into_response(self) -> Response {
        if let EstateError::Storage(err) = &self {
            tracing::error!("Storage failure: {:#}", err);
        }
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}
