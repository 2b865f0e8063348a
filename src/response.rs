//! Confirmation bodies for successful mutations.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

pub fn message(status: StatusCode, message: String) -> (StatusCode, Json<MessageBody>) {
    (status, Json(MessageBody { message }))
}

/// 201 `{"message": "<Type> created successfully"}`
pub fn created(name: &str) -> (StatusCode, Json<MessageBody>) {
    message(StatusCode::CREATED, format!("{} created successfully", name))
}

/// 200 `{"message": "<Type> updated successfully"}`
pub fn updated(name: &str) -> (StatusCode, Json<MessageBody>) {
    message(StatusCode::OK, format!("{} updated successfully", name))
}
