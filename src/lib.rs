//! Pet store REST service: users, pets, orders, categories and tags.
//!
//! Each resource type validates partial JSON input, merges updates over the stored row,
//! and maps rows to typed records. Storage sits behind [`store::RowStore`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError, FieldError, RowError};
pub use model::{Category, Order, Pet, Resource, Tag, User};
pub use routes::{app, common_routes, resource_routes};
pub use service::{CrudService, Mode};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, RowStore};
