//! Resource services: validation and CRUD orchestration over a [`RowStore`](crate::store::RowStore).

mod crud;
pub mod validation;
pub use crud::CrudService;
pub use validation::{FieldReader, Mode};
