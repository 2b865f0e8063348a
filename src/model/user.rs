//! Users: contact details with an optional address and status.

use crate::error::{FieldError, RowError};
use crate::model::Resource;
use crate::service::validation::{char_len, ensure, FieldReader};
use crate::service::Mode;
use crate::sql::{Cell, Column, ColumnKind, Row, Table};
use serde::Serialize;
use serde_json::{Map, Value};

pub const USERS: Table = Table {
    name: "users",
    columns: &[
        Column::required("username", ColumnKind::Text),
        Column::required("email", ColumnKind::Text),
        Column::required("phone", ColumnKind::Text),
        Column::optional("address", ColumnKind::Text),
        Column::optional("user_status", ColumnKind::Integer),
    ],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub user_status: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Option<String>>,
    pub user_status: Option<Option<i64>>,
}

fn is_phone(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

impl Resource for User {
    type Patch = UserPatch;

    const NAME: &'static str = "User";
    const TABLE: &'static Table = &USERS;

    fn parse(body: &Map<String, Value>, mode: Mode) -> Result<UserPatch, FieldError> {
        let r = FieldReader::new(body, mode);
        r.require(&["username", "email", "phone"])?;

        let email = r.text("email")?;
        if let Some(email) = &email {
            ensure(email.contains('@'), "email", "Invalid email format")?;
        }
        let phone = r.text("phone")?;
        if let Some(phone) = &phone {
            ensure(
                is_phone(phone),
                "phone",
                "Invalid phone number format. Phone number must be 10 digits.",
            )?;
        }
        let username = r.text("username")?;
        if let Some(username) = &username {
            let len = char_len(username);
            ensure(
                (3..=50).contains(&len),
                "username",
                "Username must be between 3 and 50 characters long.",
            )?;
        }
        let address = r.nullable_text("address")?;
        if let Some(Some(address)) = &address {
            ensure(
                char_len(address) <= 100,
                "address",
                "Address must be less than 100 characters long.",
            )?;
        }
        let user_status = r.nullable_integer("user_status")?;
        if let Some(Some(status)) = user_status {
            ensure(status <= 50, "user_status", "User status must be less than 50")?;
        }

        Ok(UserPatch { username, email, phone, address, user_status })
    }

    fn blank() -> Self {
        User::default()
    }

    fn merge(self, patch: UserPatch) -> Self {
        User {
            id: self.id,
            username: patch.username.unwrap_or(self.username),
            email: patch.email.unwrap_or(self.email),
            phone: patch.phone.unwrap_or(self.phone),
            address: patch.address.unwrap_or(self.address),
            user_status: patch.user_status.unwrap_or(self.user_status),
        }
    }

    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(User {
            id: row.id,
            username: row.text("username")?,
            email: row.text("email")?,
            phone: row.text("phone")?,
            address: row.opt_text("address")?,
            user_status: row.opt_integer("user_status")?,
        })
    }

    fn values(&self) -> Vec<Cell> {
        vec![
            self.username.clone().into(),
            self.email.clone().into(),
            self.phone.clone().into(),
            self.address.clone().into(),
            self.user_status.into(),
        ]
    }
}
