//! CRUD orchestration shared by every resource type: validate, merge, map, persist.

use crate::error::AppError;
use crate::model::Resource;
use crate::service::Mode;
use crate::sql::{Cell, Row};
use crate::store::RowStore;
use serde_json::{Map, Value};

pub struct CrudService;

impl CrudService {
    /// All records in store order.
    pub async fn list<R: Resource>(store: &dyn RowStore) -> Result<Vec<R>, AppError> {
        let rows = store.list(R::TABLE).await?;
        Ok(rows.iter().map(R::from_row).collect::<Result<_, _>>()?)
    }

    pub async fn read<R: Resource>(store: &dyn RowStore, id: i64) -> Result<R, AppError> {
        let row = store.get(R::TABLE, id).await?.ok_or(AppError::NotFound(R::NAME))?;
        Ok(R::from_row(&row)?)
    }

    /// Validate in create mode and insert. Returns the assigned id.
    pub async fn create<R: Resource>(
        store: &dyn RowStore,
        body: &Map<String, Value>,
    ) -> Result<i64, AppError> {
        let patch = R::parse(body, Mode::Create)?;
        let record = R::blank().merge(patch);
        let id = store.insert(R::TABLE, record.values()).await?;
        tracing::info!(resource = R::NAME, id, "created");
        Ok(id)
    }

    /// A missing row wins over invalid input: NotFound is reported before validation runs.
    pub async fn update<R: Resource>(
        store: &dyn RowStore,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let resolve = |row: &Row| -> Result<Vec<Cell>, AppError> {
            let patch = R::parse(body, Mode::Update)?;
            Ok(R::from_row(row)?.merge(patch).values())
        };
        if !store.update_with(R::TABLE, id, &resolve).await? {
            return Err(AppError::NotFound(R::NAME));
        }
        tracing::info!(resource = R::NAME, id, "updated");
        Ok(())
    }

    pub async fn delete<R: Resource>(store: &dyn RowStore, id: i64) -> Result<(), AppError> {
        if !store.delete(R::TABLE, id).await? {
            return Err(AppError::NotFound(R::NAME));
        }
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }
}
