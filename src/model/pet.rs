//! Pets: name, category, photo URLs, tags and status.

use crate::error::{FieldError, RowError};
use crate::model::Resource;
use crate::service::validation::{char_len, ensure, FieldReader, STATUS_TOO_LONG};
use crate::service::Mode;
use crate::sql::{Cell, Column, ColumnKind, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

pub const PETS: Table = Table {
    name: "pets",
    columns: &[
        Column::required("name", ColumnKind::Text),
        Column::required("category_id", ColumnKind::Integer),
        Column::with_default("photo_urls", ColumnKind::Text, "''"),
        Column::with_default("tags", ColumnKind::Text, "''"),
        Column::required("status", ColumnKind::Text),
    ],
};

/// `category_id` refers to a category by convention only; it is not checked for existence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub photo_urls: String,
    pub tags: String,
    pub status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetPatch {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub photo_urls: Option<String>,
    pub tags: Option<String>,
    pub status: Option<String>,
}

impl Resource for Pet {
    type Patch = PetPatch;

    const NAME: &'static str = "Pet";
    const TABLE: &'static Table = &PETS;

    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<PetPatch, FieldError> {
        let r = FieldReader::new(body, mode);
        r.require(&["name", "category_id", "status"])?;

        let name = r.text("name")?;
        let category_id = r.integer("category_id")?;
        if let Some(category_id) = category_id {
            ensure(category_id <= 50, "category_id", "Category must be less than 50")?;
        }
        let status = r.text("status")?;
        if let Some(status) = &status {
            ensure(char_len(status) <= 50, "status", STATUS_TOO_LONG)?;
        }
        let photo_urls = r.text("photo_urls")?;
        let tags = r.text("tags")?;

        Ok(PetPatch { name, category_id, photo_urls, tags, status })
    }

    fn blank() -> Self {
        Pet::default()
    }

    fn merge(self, patch: PetPatch) -> Self {
        Pet {
            id: self.id,
            name: patch.name.unwrap_or(self.name),
            category_id: patch.category_id.unwrap_or(self.category_id),
            photo_urls: patch.photo_urls.unwrap_or(self.photo_urls),
            tags: patch.tags.unwrap_or(self.tags),
            status: patch.status.unwrap_or(self.status),
        }
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Pet {
            id: row.id,
            name: row.text("name")?,
            category_id: row.integer("category_id")?,
            photo_urls: row.text("photo_urls")?,
            tags: row.text("tags")?,
            status: row.text("status")?,
        })
    }

    fn values(&self) -> Vec<Cell> {
        vec![
            self.name.clone().into(),
            self.category_id.into(),
            self.photo_urls.clone().into(),
            self.tags.clone().into(),
            self.status.clone().into(),
        ]
    }
}
