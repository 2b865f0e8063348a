//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// First violated rule of a partial input. Rendered verbatim to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("{message}")]
    Rule {
        field: &'static str,
        message: &'static str,
    },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::MissingField(field) => field,
            FieldError::WrongType { field, .. } => field,
            FieldError::Rule { field, .. } => field,
        }
    }
}

/// A stored row that does not decode into its record type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' holds {found}, expected {expected}")]
    Mismatch {
        column: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Row(#[from] RowError),
    #[error("{0}")]
    Asset(String),
}

/// 4xx bodies carry `message`, 5xx bodies carry `error`.
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBody {
    Message(String),
    Error(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Row(_) | AppError::Asset(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            ErrorBody::Error(self.to_string())
        } else {
            ErrorBody::Message(self.to_string())
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_uses_message_or_error_key() {
        let v = serde_json::to_value(ErrorBody::Message("User not found".into())).unwrap();
        assert_eq!(v, serde_json::json!({ "message": "User not found" }));
        let v = serde_json::to_value(ErrorBody::Error("boom".into())).unwrap();
        assert_eq!(v, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::NotFound("Pet").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound("Pet").to_string(), "Pet not found");
        let e = AppError::from(FieldError::MissingField("email"));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "Missing required field: email");
        assert_eq!(
            AppError::Asset("no such file".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
