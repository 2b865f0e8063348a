//! Static table definitions: the column list every mapping and statement is built from.

/// Storage type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Boolean,
}

impl ColumnKind {
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "BIGINT",
            ColumnKind::Text => "TEXT",
            ColumnKind::Boolean => "BOOLEAN",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// SQL literal used as the column default in DDL.
    pub default: Option<&'static str>,
}

impl Column {
    pub const fn required(name: &'static str, kind: ColumnKind) -> Self {
        Column { name, kind, nullable: false, default: None }
    }

    pub const fn optional(name: &'static str, kind: ColumnKind) -> Self {
        Column { name, kind, nullable: true, default: None }
    }

    pub const fn with_default(name: &'static str, kind: ColumnKind, default: &'static str) -> Self {
        Column { name, kind, nullable: false, default: Some(default) }
    }
}

/// A table keyed by a generated `id`. `columns` excludes `id` and is in insert/update order.
#[derive(Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

pub const ID_COLUMN: &str = "id";
