//! Tags: a bare name.

use crate::error::{FieldError, RowError};
use crate::model::Resource;
use crate::service::validation::{parse_name, FieldReader};
use crate::service::Mode;
use crate::sql::{Cell, Column, ColumnKind, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

pub const TAGS: Table = Table {
    name: "tags",
    columns: &[Column::required("name", ColumnKind::Text)],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
}

impl Resource for Tag {
    type Patch = TagPatch;

    const NAME: &'static str = "Tag";
    const TABLE: &'static Table = &TAGS;

    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<TagPatch, FieldError> {
        let name = parse_name(&FieldReader::new(body, mode))?;
        Ok(TagPatch { name })
    }

    fn blank() -> Self {
        Tag::default()
    }

    fn merge(self, patch: TagPatch) -> Self {
        Tag {
            id: self.id,
            name: patch.name.unwrap_or(self.name),
        }
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Tag {
            id: row.id,
            name: row.text("name")?,
        })
    }

    fn values(&self) -> Vec<Cell> {
        vec![self.name.clone().into()]
    }
}
