//! Resource CRUD handlers, generic over the resource type.

use crate::error::AppError;
use crate::model::Resource;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

/// Path ids are non-negative integers; anything else is rejected before reaching the service.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<u64>()
        .ok()
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid id".into()))
}

fn body_to_map(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AppError> {
    match body {
        Ok(Json(Value::Object(m))) => Ok(m),
        Ok(_) => Err(AppError::BadRequest("Request body must be a JSON object".into())),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, AppError> {
    let records = CrudService::list::<R>(state.store.as_ref()).await?;
    Ok(Json(records))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<R>, AppError> {
    let id = parse_id(&id_str)?;
    let record = CrudService::read::<R>(state.store.as_ref(), id).await?;
    Ok(Json(record))
}

/// The assigned id is not part of the response.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    CrudService::create::<R>(state.store.as_ref(), &body).await?;
    Ok(response::created(R::NAME))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    CrudService::update::<R>(state.store.as_ref(), id, &body).await?;
    Ok(response::updated(R::NAME))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    CrudService::delete::<R>(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
