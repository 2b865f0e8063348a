//! Categories: a bare name.

use crate::error::{FieldError, RowError};
use crate::model::Resource;
use crate::service::validation::{parse_name, FieldReader};
use crate::service::Mode;
use crate::sql::{Cell, Column, ColumnKind, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

pub const CATEGORIES: Table = Table {
    name: "categories",
    columns: &[Column::required("name", ColumnKind::Text)],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

impl Resource for Category {
    type Patch = CategoryPatch;

    const NAME: &'static str = "Category";
    const TABLE: &'static Table = &CATEGORIES;

    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<CategoryPatch, FieldError> {
        let name = parse_name(&FieldReader::new(body, mode))?;
        Ok(CategoryPatch { name })
    }

    fn blank() -> Self {
        Category::default()
    }

    fn merge(self, patch: CategoryPatch) -> Self {
        Category {
            id: self.id,
            name: patch.name.unwrap_or(self.name),
        }
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Category {
            id: row.id,
            name: row.text("name")?,
        })
    }

    fn values(&self) -> Vec<Cell> {
        vec![self.name.clone().into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_update_keeps_the_name() {
        let Value::Object(body) = json!({}) else { unreachable!() };
        let patch = Category::parse(&body, Mode::Update).unwrap();
        let stored = Category { id: 1, name: "Dogs".into() };
        assert_eq!(stored.clone().merge(patch), stored);
    }

    #[test]
    fn name_must_be_a_string() {
        let Value::Object(body) = json!({ "name": 5 }) else { unreachable!() };
        assert_eq!(
            Category::parse(&body, Mode::Create),
            Err(FieldError::WrongType { field: "name", expected: "a string" })
        );
    }
}
