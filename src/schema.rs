//! Schema bootstrap: CREATE TABLE IF NOT EXISTS for every resource table.
//! Foreign-key-shaped columns (category_id, pet_id) are plain BIGINTs, so deletes never cascade or fail.

use crate::error::AppError;
use crate::model::TABLES;
use crate::sql::{quoted, Table, ID_COLUMN};
use sqlx::PgPool;

/// DDL for one table.
pub fn create_table_sql(table: &Table) -> String {
    let mut col_defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quoted(ID_COLUMN))];
    for c in table.columns {
        let mut def = format!("{} {}", quoted(c.name), c.kind.sql_type());
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(d) = c.default {
            def.push_str(" DEFAULT ");
            def.push_str(d);
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(table.name),
        col_defs.join(",\n  ")
    )
}

/// Create all resource tables. Idempotent.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for table in TABLES {
        let sql = create_table_sql(table);
        tracing::debug!(sql = %sql, "schema");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, Pet, Resource, User};

    #[test]
    fn users_ddl() {
        assert_eq!(
            create_table_sql(User::TABLE),
            "CREATE TABLE IF NOT EXISTS \"users\" (\n  \"id\" BIGSERIAL PRIMARY KEY,\n  \"username\" TEXT NOT NULL,\n  \"email\" TEXT NOT NULL,\n  \"phone\" TEXT NOT NULL,\n  \"address\" TEXT,\n  \"user_status\" BIGINT\n)"
        );
    }

    #[test]
    fn defaults_are_rendered() {
        let pets = create_table_sql(Pet::TABLE);
        assert!(pets.contains("\"photo_urls\" TEXT NOT NULL DEFAULT ''"));
        assert!(!pets.contains("REFERENCES"));
        let orders = create_table_sql(Order::TABLE);
        assert!(orders.contains("\"complete\" BOOLEAN NOT NULL DEFAULT FALSE"));
    }

    #[test]
    fn every_resource_has_a_table() {
        let names: Vec<_> = TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names, ["users", "pets", "orders", "categories", "tags"]);
    }
}
