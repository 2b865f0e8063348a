//! Orders: a quantity of a pet, a ship date and completion.

use crate::error::{FieldError, RowError};
use crate::model::Resource;
use crate::service::validation::{char_len, ensure, or_rule, FieldReader, STATUS_TOO_LONG};
use crate::service::Mode;
use crate::sql::{Cell, Column, ColumnKind, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

pub const ORDERS: Table = Table {
    name: "orders",
    columns: &[
        Column::required("pet_id", ColumnKind::Integer),
        Column::required("quantity", ColumnKind::Integer),
        Column::required("ship_date", ColumnKind::Text),
        Column::required("status", ColumnKind::Text),
        Column::with_default("complete", ColumnKind::Boolean, "FALSE"),
    ],
};

/// Clients may send the ship date as `shipDate`.
const ALIASES: &[(&str, &str)] = &[("shipDate", "ship_date")];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: i64,
    pub pet_id: i64,
    pub quantity: i64,
    pub ship_date: String,
    pub status: String,
    pub complete: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub pet_id: Option<i64>,
    pub quantity: Option<i64>,
    pub ship_date: Option<String>,
    pub status: Option<String>,
    pub complete: Option<bool>,
}

impl Resource for Order {
    type Patch = OrderPatch;

    const NAME: &'static str = "Order";
    const TABLE: &'static Table = &ORDERS;

    /// `ship_date` must accompany every update as well as every create.
    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<OrderPatch, FieldError> {
        let r = FieldReader::new(body, mode).with_aliases(ALIASES);
        r.require(&["pet_id", "quantity", "status", "ship_date"])?;

        let status = r.text("status")?;
        if let Some(status) = &status {
            ensure(char_len(status) <= 50, "status", STATUS_TOO_LONG)?;
        }
        let quantity = or_rule(r.integer("quantity"), "Invalid quantity format")?;
        if let Some(quantity) = quantity {
            ensure(quantity > 0, "quantity", "Invalid quantity format")?;
        }
        let pet_id = or_rule(r.integer("pet_id"), "Invalid pet_id format")?;
        if let Some(pet_id) = pet_id {
            ensure(pet_id >= 0, "pet_id", "Invalid pet_id format")?;
        }
        let complete = or_rule(r.boolean("complete"), "Invalid complete format")?;
        ensure(r.contains("ship_date"), "ship_date", "Ship date is required")?;
        let ship_date = r.text("ship_date")?;

        Ok(OrderPatch { pet_id, quantity, ship_date, status, complete })
    }

    fn blank() -> Self {
        Order::default()
    }

    fn merge(self, patch: OrderPatch) -> Self {
        Order {
            id: self.id,
            pet_id: patch.pet_id.unwrap_or(self.pet_id),
            quantity: patch.quantity.unwrap_or(self.quantity),
            ship_date: patch.ship_date.unwrap_or(self.ship_date),
            status: patch.status.unwrap_or(self.status),
            complete: patch.complete.unwrap_or(self.complete),
        }
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Order {
            id: row.id,
            pet_id: row.integer("pet_id")?,
            quantity: row.integer("quantity")?,
            ship_date: row.text("ship_date")?,
            status: row.text("status")?,
            complete: row.boolean("complete")?,
        })
    }

    fn values(&self) -> Vec<Cell> {
        vec![
            self.pet_id.into(),
            self.quantity.into(),
            self.ship_date.clone().into(),
            self.status.clone().into(),
            self.complete.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value, mode: Mode) -> Result<OrderPatch, FieldError> {
        let Value::Object(body) = v else { unreachable!() };
        Order::parse(&body, mode)
    }

    fn message(v: Value, mode: Mode) -> String {
        parse(v, mode).unwrap_err().to_string()
    }

    fn full() -> Value {
        json!({ "pet_id": 1, "quantity": 2, "status": "placed", "ship_date": "2024-05-01" })
    }

    #[test]
    fn create_requires_all_four_fields() {
        assert_eq!(
            parse(json!({ "pet_id": 1, "quantity": 2, "status": "placed" }), Mode::Create),
            Err(FieldError::MissingField("ship_date"))
        );
        let order = Order::blank().merge(parse(full(), Mode::Create).unwrap());
        assert!(!order.complete);
        assert_eq!(order.ship_date, "2024-05-01");
    }

    #[test]
    fn ship_date_alias_is_accepted() {
        let p = parse(json!({ "pet_id": 1, "quantity": 2, "status": "placed", "shipDate": "2024-06-01" }), Mode::Create)
            .unwrap();
        assert_eq!(p.ship_date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn format_rules() {
        let with = |k: &str, v: Value| {
            let mut b = full();
            b[k] = v;
            b
        };
        assert_eq!(message(with("quantity", json!(0)), Mode::Create), "Invalid quantity format");
        assert_eq!(message(with("quantity", json!("2")), Mode::Create), "Invalid quantity format");
        assert_eq!(message(with("pet_id", json!(-1)), Mode::Create), "Invalid pet_id format");
        assert_eq!(message(with("pet_id", json!(1.5)), Mode::Create), "Invalid pet_id format");
        assert!(parse(with("pet_id", json!(0)), Mode::Create).is_ok());
        assert_eq!(message(with("complete", json!("yes")), Mode::Create), "Invalid complete format");
        assert_eq!(message(with("status", json!("s".repeat(51))), Mode::Create), STATUS_TOO_LONG);
    }

    #[test]
    fn update_always_requires_ship_date() {
        assert_eq!(message(json!({}), Mode::Update), "Ship date is required");
        assert_eq!(message(json!({ "quantity": 3 }), Mode::Update), "Ship date is required");
        let p = parse(json!({ "ship_date": "2024-07-01", "complete": true }), Mode::Update).unwrap();
        assert_eq!(p.complete, Some(true));
        assert_eq!(p.quantity, None);
    }

    #[test]
    fn quantity_is_checked_before_pet_id_and_ship_date() {
        let err = parse(json!({ "quantity": -1, "pet_id": -1 }), Mode::Update).unwrap_err();
        assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn merge_and_row_mapping() {
        let stored = Order {
            id: 2,
            pet_id: 1,
            quantity: 2,
            ship_date: "2024-05-01".into(),
            status: "placed".into(),
            complete: false,
        };
        let row = Row::from_values(&ORDERS, 2, stored.values());
        assert_eq!(Order::from_row(&row).unwrap(), stored);

        let patch = OrderPatch {
            ship_date: Some("2024-05-02".into()),
            complete: Some(true),
            ..OrderPatch::default()
        };
        let merged = stored.clone().merge(patch);
        assert_eq!(merged.ship_date, "2024-05-02");
        assert!(merged.complete);
        assert_eq!(merged.quantity, stored.quantity);
    }
}
