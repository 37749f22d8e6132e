use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldMap, SqlValue, TableDescriptor};
use crate::storage::Entity;

use super::error::ValidationError;
use super::validation::{require_login, require_phone, require_text};

/// Table layout for users. `login` is unique and doubles as a lookup key.
pub static USERS: TableDescriptor = TableDescriptor {
    entity_type: "User",
    table: "users",
    id_column: "user_id",
    columns: &[
        "first_name",
        "last_name",
        "login",
        "password",
        "phone_number",
    ],
    alternate_key: Some("login"),
    default_page_size: 5,
};

const MAX_NAME_LEN: usize = 100;
const MAX_LOGIN_LEN: usize = 64;
const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 128;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    /// Never serialized into responses.
    #[serde(default, skip_serializing)]
    pub password: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

/// Partial update for a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

fn check_password(password: &str) -> Result<SqlValue, ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::InvalidField {
            field: "password",
            reason: format!("must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password",
            max: MAX_PASSWORD_LEN,
        });
    }
    Ok(SqlValue::Text(password.to_string()))
}

impl Entity for User {
    type Create = CreateUser;
    type Patch = UpdateUser;

    fn descriptor() -> &'static TableDescriptor {
        &USERS
    }

    fn insert_fields(input: &CreateUser) -> Result<FieldMap, ValidationError> {
        Ok(FieldMap::from([
            (
                "first_name",
                require_text("first_name", &input.first_name, MAX_NAME_LEN)?,
            ),
            (
                "last_name",
                require_text("last_name", &input.last_name, MAX_NAME_LEN)?,
            ),
            ("login", require_login(&input.login, MAX_LOGIN_LEN)?),
            ("password", check_password(&input.password)?),
            ("phone_number", require_phone(&input.phone_number)?),
        ]))
    }

    fn patch_fields(patch: &UpdateUser) -> Result<FieldMap, ValidationError> {
        let mut fields = FieldMap::new();
        if let Some(first_name) = &patch.first_name {
            fields.insert(
                "first_name",
                require_text("first_name", first_name, MAX_NAME_LEN)?,
            );
        }
        if let Some(last_name) = &patch.last_name {
            fields.insert(
                "last_name",
                require_text("last_name", last_name, MAX_NAME_LEN)?,
            );
        }
        if let Some(login) = &patch.login {
            fields.insert("login", require_login(login, MAX_LOGIN_LEN)?);
        }
        if let Some(password) = &patch.password {
            fields.insert("password", check_password(password)?);
        }
        if let Some(phone_number) = &patch.phone_number {
            fields.insert("phone_number", require_phone(phone_number)?);
        }
        Ok(fields)
    }
}
