//! In-process row store. Ids start at 1 per table and are never reused.

use crate::error::AppError;
use crate::sql::{Cell, Row, Table};
use crate::store::{Resolve, RowStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct MemTable {
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, MemTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list(&self, table: &'static Table) -> Result<Vec<Row>, AppError> {
        let tables = self.tables.lock();
        Ok(tables
            .get(table.name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, table: &'static Table, id: i64) -> Result<Option<Row>, AppError> {
        let tables = self.tables.lock();
        Ok(tables.get(table.name).and_then(|t| t.rows.get(&id)).cloned())
    }

    async fn insert(&self, table: &'static Table, values: Vec<Cell>) -> Result<i64, AppError> {
        let mut tables = self.tables.lock();
        let t = tables.entry(table.name).or_default();
        t.last_id += 1;
        let id = t.last_id;
        t.rows.insert(id, Row::from_values(table, id, values));
        Ok(id)
    }

    async fn update_with(
        &self,
        table: &'static Table,
        id: i64,
        resolve: &Resolve<'_>,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.lock();
        let Some(row) = tables.get_mut(table.name).and_then(|t| t.rows.get_mut(&id)) else {
            return Ok(false);
        };
        let values = resolve(row)?;
        *row = Row::from_values(table, id, values);
        Ok(true)
    }

    async fn delete(&self, table: &'static Table, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock();
        Ok(tables
            .get_mut(table.name)
            .and_then(|t| t.rows.remove(&id))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{Column, ColumnKind};

    static NOTES: Table = Table {
        name: "notes",
        columns: &[Column::required("body", ColumnKind::Text)],
    };

    fn text(s: &str) -> Vec<Cell> {
        vec![Cell::Text(s.into())]
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        assert_eq!(store.insert(&NOTES, text("a")).await.unwrap(), 1);
        assert_eq!(store.insert(&NOTES, text("b")).await.unwrap(), 2);
        assert!(store.delete(&NOTES, 2).await.unwrap());
        assert_eq!(store.insert(&NOTES, text("c")).await.unwrap(), 3);
        let ids: Vec<_> = store.list(&NOTES).await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn update_with_sees_current_row() {
        let store = MemoryStore::new();
        let id = store.insert(&NOTES, text("draft")).await.unwrap();
        let updated = store
            .update_with(&NOTES, id, &|row: &Row| -> Result<Vec<Cell>, AppError> {
                let body = row.text("body")?;
                Ok(text(&format!("{} v2", body)))
            })
            .await
            .unwrap();
        assert!(updated);
        let row = store.get(&NOTES, id).await.unwrap().unwrap();
        assert_eq!(row.text("body").unwrap(), "draft v2");
    }

    #[tokio::test]
    async fn missing_rows() {
        let store = MemoryStore::new();
        assert!(store.get(&NOTES, 1).await.unwrap().is_none());
        assert!(!store.delete(&NOTES, 1).await.unwrap());
        let called = store
            .update_with(&NOTES, 1, &|_: &Row| -> Result<Vec<Cell>, AppError> { unreachable!() })
            .await
            .unwrap();
        assert!(!called);
        assert!(store.list(&NOTES).await.unwrap().is_empty());
    }
}
