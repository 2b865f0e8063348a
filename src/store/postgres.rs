//! PostgreSQL row store over a connection pool.

use crate::error::AppError;
use crate::sql::{self, Cell, ColumnKind, Param, QueryBuf, Row, Table, ID_COLUMN};
use crate::store::{Resolve, RowStore};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Create the resource tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        crate::schema::ensure_tables(&self.pool).await
    }
}

/// Bind params by column kind so a NULL carries the column's type.
fn bind_params<'q>(
    query: Query<'q, Postgres, PgArguments>,
    params: &'q [Param],
) -> Query<'q, Postgres, PgArguments> {
    params.iter().fold(query, |query, p| match (&p.value, p.kind) {
        (Cell::Null, ColumnKind::Integer) => query.bind(None::<i64>),
        (Cell::Null, ColumnKind::Text) => query.bind(None::<String>),
        (Cell::Null, ColumnKind::Boolean) => query.bind(None::<bool>),
        (Cell::Int(n), _) => query.bind(*n),
        (Cell::Bool(b), _) => query.bind(*b),
        (Cell::Text(s), _) => query.bind(s.as_str()),
    })
}

fn prepared(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    bind_params(sqlx::query(&q.sql), &q.params)
}

fn decode_row(table: &'static Table, row: &PgRow) -> Result<Row, AppError> {
    use sqlx::Row as _;
    let mut out = Row::new(row.try_get::<i64, _>(ID_COLUMN)?);
    for c in table.columns {
        let cell = match c.kind {
            ColumnKind::Integer => row.try_get::<Option<i64>, _>(c.name)?.map(Cell::Int),
            ColumnKind::Text => row.try_get::<Option<String>, _>(c.name)?.map(Cell::Text),
            ColumnKind::Boolean => row.try_get::<Option<bool>, _>(c.name)?.map(Cell::Bool),
        };
        out.set(c.name, cell.unwrap_or(Cell::Null));
    }
    Ok(out)
}

#[async_trait]
impl RowStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, table: &'static Table) -> Result<Vec<Row>, AppError> {
        let q = sql::select_list(table);
        let rows = prepared(&q).fetch_all(&self.pool).await?;
        rows.iter().map(|r| decode_row(table, r)).collect()
    }

    async fn get(&self, table: &'static Table, id: i64) -> Result<Option<Row>, AppError> {
        let q = sql::select_by_id(table, id, false);
        let row = prepared(&q).fetch_optional(&self.pool).await?;
        row.map(|r| decode_row(table, &r)).transpose()
    }

    async fn insert(&self, table: &'static Table, values: Vec<Cell>) -> Result<i64, AppError> {
        use sqlx::Row as _;
        let q = sql::insert(table, values);
        let row = prepared(&q).fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(ID_COLUMN)?)
    }

    async fn update_with(
        &self,
        table: &'static Table,
        id: i64,
        resolve: &Resolve<'_>,
    ) -> Result<bool, AppError> {
        // Dropping `tx` on any early return rolls back and releases the row lock.
        let mut tx = self.pool.begin().await?;
        let q = sql::select_by_id(table, id, true);
        let Some(found) = prepared(&q).fetch_optional(&mut *tx).await? else {
            return Ok(false);
        };
        let existing = decode_row(table, &found)?;
        let q = sql::update(table, id, resolve(&existing)?);
        prepared(&q).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, table: &'static Table, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(table, id);
        let done = prepared(&q).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }
}

/// Connect to the server's `postgres` database and create the target database if missing.
/// A URL without a database name leaves the server default in place.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    let (admin, target) = admin_options(database_url)?;
    let Some(db_name) = target.filter(|name| name != "postgres") else {
        return Ok(());
    };
    let mut conn = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance `postgres` database on the same server, plus the target name.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), sqlx::Error> {
    let target = PgConnectOptions::from_str(database_url)?;
    let name = target.get_database().map(str::to_owned);
    Ok((target.database("postgres"), name))
}
