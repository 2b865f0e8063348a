//! GET /complex-json-file: the configured JSON document, parsed and re-served.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

pub async fn complex_json_file(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let text = tokio::fs::read_to_string(state.asset_path.as_path())
        .await
        .map_err(|e| AppError::Asset(e.to_string()))?;
    let value = serde_json::from_str(&text).map_err(|e| AppError::Asset(e.to_string()))?;
    Ok(Json(value))
}
