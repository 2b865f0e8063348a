//! HTTP handlers for resource CRUD and the static JSON document.

pub mod asset;
pub mod resource;
pub use asset::complex_json_file;
pub use resource::*;
