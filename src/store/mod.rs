//! Row storage behind the resource services.
//!
//! Services never hold a connection themselves: each operation is handed a store and the
//! store acquires whatever it needs for that one call, releasing it on every exit path.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::sql::{Cell, Row, Table};
use async_trait::async_trait;

/// Turns the currently stored row into the full set of column values to write back.
pub type Resolve<'a> = dyn Fn(&Row) -> Result<Vec<Cell>, AppError> + Send + Sync + 'a;

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list(&self, table: &'static Table) -> Result<Vec<Row>, AppError>;

    async fn get(&self, table: &'static Table, id: i64) -> Result<Option<Row>, AppError>;

    /// Insert `values` (in column order). Returns the id the store assigned.
    async fn insert(&self, table: &'static Table, values: Vec<Cell>) -> Result<i64, AppError>;

    /// Rewrite row `id` with the values `resolve` derives from it. The row cannot change or
    /// vanish between the read and the write. Returns `false` if there was no such row, in
    /// which case `resolve` is not called.
    async fn update_with(
        &self,
        table: &'static Table,
        id: i64,
        resolve: &Resolve<'_>,
    ) -> Result<bool, AppError>;

    /// Returns `false` if there was no such row.
    async fn delete(&self, table: &'static Table, id: i64) -> Result<bool, AppError>;
}
