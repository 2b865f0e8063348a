//! Resource types: records, their tables, input validation, merge and row mapping.

mod category;
mod order;
mod pet;
mod tag;
mod user;

pub use category::{Category, CategoryPatch, CATEGORIES};
pub use order::{Order, OrderPatch, ORDERS};
pub use pet::{Pet, PetPatch, PETS};
pub use tag::{Tag, TagPatch, TAGS};
pub use user::{User, UserPatch, USERS};

use crate::error::{FieldError, RowError};
use crate::service::Mode;
use crate::sql::{Cell, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

/// Every resource table, in bootstrap order.
pub static TABLES: [&Table; 5] = [&USERS, &PETS, &ORDERS, &CATEGORIES, &TAGS];

/// One resource type of the API.
pub trait Resource: Serialize + Sized + Send + Sync + 'static {
    /// Typed partial input: only the fields the caller supplied.
    type Patch: Send;

    /// Display name used in response messages ("User", "Pet", ...).
    const NAME: &'static str;
    const TABLE: &'static Table;

    /// Validate and decode a partial input. Reports the first violated rule.
    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<Self::Patch, FieldError>;

    /// The record a create starts from: defaults for every optional field.
    fn blank() -> Self;

    /// Patch values where supplied, stored values otherwise. Never touches `id`.
    fn merge(self, patch: Self::Patch) -> Self;

    fn from_row(row: &Row) -> Result<Self, RowError>;

    /// Column values in `TABLE.columns` order.
    fn values(&self) -> Vec<Cell>;
}
