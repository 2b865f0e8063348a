//! Typed reading of partial JSON input. Every accessor distinguishes "absent" from "present";
//! a present value of the wrong JSON type is a [`FieldError`], never coerced.

use crate::error::FieldError;
use serde_json::{Map, Value};

/// Create enforces required fields; Update validates only what is supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

pub struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    mode: Mode,
    aliases: &'static [(&'static str, &'static str)],
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Map<String, Value>, mode: Mode) -> Self {
        FieldReader { body, mode, aliases: &[] }
    }

    /// Accept `(alias, field)` pairs: a missing `field` is looked up under its alias.
    pub fn with_aliases(mut self, aliases: &'static [(&'static str, &'static str)]) -> Self {
        self.aliases = aliases;
        self
    }

    fn raw(&self, field: &str) -> Option<&'a Value> {
        self.body.get(field).or_else(|| {
            self.aliases
                .iter()
                .find(|(_, f)| *f == field)
                .and_then(|(alias, _)| self.body.get(*alias))
        })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.raw(field).is_some()
    }

    /// Create mode: the first of `fields` that is absent is reported.
    pub fn require(&self, fields: &[&'static str]) -> Result<(), FieldError> {
        if self.mode == Mode::Create {
            if let Some(missing) = fields.iter().find(|f| !self.contains(f)) {
                return Err(FieldError::MissingField(*missing));
            }
        }
        Ok(())
    }

    pub fn text(&self, field: &'static str) -> Result<Option<String>, FieldError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type(field, "a string")),
        }
    }

    /// `Some(None)` when the caller explicitly sent `null`.
    pub fn nullable_text(&self, field: &'static str) -> Result<Option<Option<String>>, FieldError> {
        match self.raw(field) {
            Some(Value::Null) => Ok(Some(None)),
            _ => Ok(self.text(field)?.map(Some)),
        }
    }

    pub fn integer(&self, field: &'static str) -> Result<Option<i64>, FieldError> {
        match self.raw(field) {
            None => Ok(None),
            Some(v) => v.as_i64().map(Some).ok_or_else(|| wrong_type(field, "an integer")),
        }
    }

    pub fn nullable_integer(&self, field: &'static str) -> Result<Option<Option<i64>>, FieldError> {
        match self.raw(field) {
            Some(Value::Null) => Ok(Some(None)),
            _ => Ok(self.integer(field)?.map(Some)),
        }
    }

    pub fn boolean(&self, field: &'static str) -> Result<Option<bool>, FieldError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(wrong_type(field, "a boolean")),
        }
    }
}

fn wrong_type(field: &'static str, expected: &'static str) -> FieldError {
    FieldError::WrongType { field, expected }
}

/// `Err(Rule)` unless `ok`.
pub fn ensure(ok: bool, field: &'static str, message: &'static str) -> Result<(), FieldError> {
    if ok {
        Ok(())
    } else {
        Err(FieldError::Rule { field, message })
    }
}

/// Replace a type mismatch with the rule's own message.
pub fn or_rule<T>(r: Result<T, FieldError>, message: &'static str) -> Result<T, FieldError> {
    r.map_err(|e| FieldError::Rule { field: e.field(), message })
}

/// Length in characters, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub const NAME_TOO_LONG: &str = "Name must be less than 50 characters long";
pub const STATUS_TOO_LONG: &str = "Status must be less than 50 characters long";

/// Shared `name` rule of categories and tags.
pub fn parse_name(r: &FieldReader<'_>) -> Result<Option<String>, FieldError> {
    r.require(&["name"])?;
    let name = r.text("name")?;
    if let Some(name) = &name {
        ensure(char_len(name) <= 50, "name", NAME_TOO_LONG)?;
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn absent_null_and_present_are_distinct() {
        let body = obj(json!({ "a": null, "b": "x" }));
        let r = FieldReader::new(&body, Mode::Update);
        assert_eq!(r.nullable_text("a").unwrap(), Some(None));
        assert_eq!(r.nullable_text("b").unwrap(), Some(Some("x".into())));
        assert_eq!(r.nullable_text("c").unwrap(), None);
        assert!(r.text("a").is_err());
    }

    #[test]
    fn numbers_are_not_coerced() {
        let body = obj(json!({ "n": "5", "f": 2.5, "b": 1 }));
        let r = FieldReader::new(&body, Mode::Update);
        assert_eq!(r.integer("n"), Err(FieldError::WrongType { field: "n", expected: "an integer" }));
        assert!(r.integer("f").is_err());
        assert!(r.boolean("b").is_err());
        assert_eq!(
            r.integer("n").unwrap_err().to_string(),
            "n must be an integer"
        );
    }

    #[test]
    fn require_only_applies_on_create() {
        let body = obj(json!({ "a": 1 }));
        assert_eq!(
            FieldReader::new(&body, Mode::Create).require(&["a", "b", "c"]),
            Err(FieldError::MissingField("b"))
        );
        assert!(FieldReader::new(&body, Mode::Update).require(&["b"]).is_ok());
    }

    #[test]
    fn aliases_are_consulted() {
        let body = obj(json!({ "shipDate": "2024-01-01" }));
        let r = FieldReader::new(&body, Mode::Create).with_aliases(&[("shipDate", "ship_date")]);
        assert!(r.require(&["ship_date"]).is_ok());
        assert_eq!(r.text("ship_date").unwrap().as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn name_rule_counts_characters() {
        let ok = obj(json!({ "name": "é".repeat(50) }));
        assert!(parse_name(&FieldReader::new(&ok, Mode::Create)).is_ok());
        let long = obj(json!({ "name": "x".repeat(51) }));
        assert_eq!(
            parse_name(&FieldReader::new(&long, Mode::Update)).unwrap_err().to_string(),
            NAME_TOO_LONG
        );
        let empty = obj(json!({}));
        assert_eq!(
            parse_name(&FieldReader::new(&empty, Mode::Create)),
            Err(FieldError::MissingField("name"))
        );
    }
}
