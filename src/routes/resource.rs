//! Resource CRUD routes, one set per resource type, plus the static JSON document.

use crate::handlers::{complex_json_file, create, delete, list, read, update};
use crate::model::{Category, Order, Pet, Resource, Tag, User};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET/POST `/{segment}`, GET/PUT/DELETE `/{segment}/:id`.
fn crud_routes<R: Resource>(segment: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/{}", segment), get(list::<R>).post(create::<R>))
        .route(
            &format!("/{}/:id", segment),
            get(read::<R>).put(update::<R>).delete(delete::<R>),
        )
}

pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .merge(crud_routes::<User>("users"))
        .merge(crud_routes::<Pet>("pets"))
        .merge(crud_routes::<Order>("orders"))
        .merge(crud_routes::<Category>("categories"))
        .merge(crud_routes::<Tag>("tags"))
        .route("/complex-json-file", get(complex_json_file))
}
