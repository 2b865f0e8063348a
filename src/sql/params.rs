//! Column values as they travel between records, statements and stores.

use crate::error::RowError;
use crate::sql::table::{ColumnKind, Table};
use std::collections::BTreeMap;

/// One column value. NULL carries no type; the column's [`ColumnKind`] decides how it binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Cell {
    fn describe(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "a boolean",
            Cell::Int(_) => "an integer",
            Cell::Text(_) => "text",
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// A bound statement parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub kind: ColumnKind,
    pub value: Cell,
}

impl Param {
    pub fn id(id: i64) -> Self {
        Param { kind: ColumnKind::Integer, value: Cell::Int(id) }
    }
}

/// A stored row: its id plus named column values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    cells: BTreeMap<&'static str, Cell>,
}

impl Row {
    pub fn new(id: i64) -> Self {
        Row { id, cells: BTreeMap::new() }
    }

    /// Pair `values` with the table's columns in order. Extra values are ignored.
    pub fn from_values(table: &Table, id: i64, values: Vec<Cell>) -> Self {
        let cells = table.columns.iter().map(|c| c.name).zip(values).collect();
        Row { id, cells }
    }

    pub fn set(&mut self, column: &'static str, value: Cell) {
        self.cells.insert(column, value);
    }

    fn cell(&self, column: &'static str) -> Result<&Cell, RowError> {
        self.cells.get(column).ok_or(RowError::MissingColumn(column))
    }

    pub fn text(&self, column: &'static str) -> Result<String, RowError> {
        match self.cell(column)? {
            Cell::Text(s) => Ok(s.clone()),
            other => Err(mismatch(column, "text", other)),
        }
    }

    pub fn opt_text(&self, column: &'static str) -> Result<Option<String>, RowError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Text(s) => Ok(Some(s.clone())),
            other => Err(mismatch(column, "text", other)),
        }
    }

    pub fn integer(&self, column: &'static str) -> Result<i64, RowError> {
        match self.cell(column)? {
            Cell::Int(n) => Ok(*n),
            other => Err(mismatch(column, "an integer", other)),
        }
    }

    pub fn opt_integer(&self, column: &'static str) -> Result<Option<i64>, RowError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Int(n) => Ok(Some(*n)),
            other => Err(mismatch(column, "an integer", other)),
        }
    }

    pub fn boolean(&self, column: &'static str) -> Result<bool, RowError> {
        match self.cell(column)? {
            Cell::Bool(b) => Ok(*b),
            other => Err(mismatch(column, "a boolean", other)),
        }
    }
}

fn mismatch(column: &'static str, expected: &'static str, found: &Cell) -> RowError {
    RowError::Mismatch { column, expected, found: found.describe() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::table::Column;

    static T: Table = Table {
        name: "things",
        columns: &[
            Column::required("label", ColumnKind::Text),
            Column::optional("rank", ColumnKind::Integer),
        ],
    };

    #[test]
    fn named_extraction_follows_column_names_not_positions() {
        let row = Row::from_values(&T, 7, vec![Cell::Text("a".into()), Cell::Null]);
        assert_eq!(row.id, 7);
        assert_eq!(row.text("label").unwrap(), "a");
        assert_eq!(row.opt_integer("rank").unwrap(), None);
    }

    #[test]
    fn type_mismatch_and_missing_column_are_reported() {
        let mut row = Row::new(1);
        row.set("label", Cell::Int(3));
        assert_eq!(
            row.text("label"),
            Err(RowError::Mismatch { column: "label", expected: "text", found: "an integer" })
        );
        assert_eq!(row.integer("rank"), Err(RowError::MissingColumn("rank")));
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Cell::from(None::<String>), Cell::Null);
        assert_eq!(Cell::from(Some(4_i64)), Cell::Int(4));
    }
}
