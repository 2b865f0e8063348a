//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table definition.
//! Identifiers come from static table definitions only; values are always parameters.

use crate::sql::params::{Cell, Param};
use crate::sql::table::{Table, ID_COLUMN};

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Param>,
}

impl QueryBuf {
    fn push_param(&mut self, p: Param) -> usize {
        self.params.push(p);
        self.params.len()
    }
}

/// `"id", "col1", "col2", ...`
fn select_column_list(table: &Table) -> String {
    std::iter::once(ID_COLUMN)
        .chain(table.columns.iter().map(|c| c.name))
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row, ordered by id.
pub fn select_list(table: &Table) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {} ORDER BY {}",
            select_column_list(table),
            quoted(table.name),
            quoted(ID_COLUMN)
        ),
        params: Vec::new(),
    }
}

/// SELECT by id. With `lock`, takes a row lock for the rest of the transaction.
pub fn select_by_id(table: &Table, id: i64, lock: bool) -> QueryBuf {
    let mut q = QueryBuf::default();
    let n = q.push_param(Param::id(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}{}",
        select_column_list(table),
        quoted(table.name),
        quoted(ID_COLUMN),
        n,
        if lock { " FOR UPDATE" } else { "" }
    );
    q
}

/// INSERT all non-id columns, values in column order. Returns the generated id.
pub fn insert(table: &Table, values: Vec<Cell>) -> QueryBuf {
    let mut q = QueryBuf::default();
    let mut cols = Vec::with_capacity(table.columns.len());
    let mut placeholders = Vec::with_capacity(table.columns.len());
    for (c, value) in table.columns.iter().zip(values) {
        let n = q.push_param(Param { kind: c.kind, value });
        cols.push(quoted(c.name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", "),
        quoted(ID_COLUMN)
    );
    q
}

/// Full-row UPDATE by id: every non-id column is rewritten.
pub fn update(table: &Table, id: i64, values: Vec<Cell>) -> QueryBuf {
    let mut q = QueryBuf::default();
    let mut sets = Vec::with_capacity(table.columns.len());
    for (c, value) in table.columns.iter().zip(values) {
        let n = q.push_param(Param { kind: c.kind, value });
        sets.push(format!("{} = ${}", quoted(c.name), n));
    }
    let n = q.push_param(Param::id(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(table.name),
        sets.join(", "),
        quoted(ID_COLUMN),
        n
    );
    q
}

/// DELETE by id.
pub fn delete(table: &Table, id: i64) -> QueryBuf {
    let mut q = QueryBuf::default();
    let n = q.push_param(Param::id(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(table.name), quoted(ID_COLUMN), n);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::table::{Column, ColumnKind};

    static PETS: Table = Table {
        name: "pets",
        columns: &[
            Column::required("name", ColumnKind::Text),
            Column::required("category_id", ColumnKind::Integer),
        ],
    };

    #[test]
    fn select_by_id_with_and_without_lock() {
        let q = select_by_id(&PETS, 3, false);
        assert_eq!(q.sql, r#"SELECT "id", "name", "category_id" FROM "pets" WHERE "id" = $1"#);
        assert_eq!(q.params, vec![Param::id(3)]);
        assert!(select_by_id(&PETS, 3, true).sql.ends_with(" FOR UPDATE"));
    }

    #[test]
    fn insert_binds_values_in_column_order() {
        let q = insert(&PETS, vec![Cell::Text("Rex".into()), Cell::Int(2)]);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "pets" ("name", "category_id") VALUES ($1, $2) RETURNING "id""#
        );
        assert_eq!(q.params[1], Param { kind: ColumnKind::Integer, value: Cell::Int(2) });
    }

    #[test]
    fn update_puts_id_last() {
        let q = update(&PETS, 9, vec![Cell::Text("Rex".into()), Cell::Null]);
        assert_eq!(q.sql, r#"UPDATE "pets" SET "name" = $1, "category_id" = $2 WHERE "id" = $3"#);
        assert_eq!(q.params.len(), 3);
        assert_eq!(q.params[2], Param::id(9));
    }

    #[test]
    fn delete_and_list() {
        assert_eq!(delete(&PETS, 1).sql, r#"DELETE FROM "pets" WHERE "id" = $1"#);
        assert_eq!(
            select_list(&PETS).sql,
            r#"SELECT "id", "name", "category_id" FROM "pets" ORDER BY "id""#
        );
    }

    #[test]
    fn quoting_escapes_double_quotes() {
        assert_eq!(quoted(r#"a"b"#), r#""a""b""#);
    }
}
