use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldMap, SqlValue, TableDescriptor};
use crate::storage::Entity;

use super::error::ValidationError;
use super::validation::{format_date, require_text};

/// Table layout for books.
pub static BOOKS: TableDescriptor = TableDescriptor {
    entity_type: "Book",
    table: "books",
    id_column: "book_id",
    columns: &["name", "author_name", "price", "date"],
    alternate_key: None,
    default_page_size: 10,
};

const MAX_NAME_LEN: usize = 200;

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: Uuid,
    pub name: String,
    pub author_name: String,
    pub price: f64,
    /// Publication date.
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub name: String,
    pub author_name: String,
    pub price: f64,
    pub date: NaiveDate,
}

/// Partial update for a book. Only `Some` fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl UpdateBook {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the book name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

fn check_price(price: f64) -> Result<SqlValue, ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidField {
            field: "price",
            reason: format!("must be a non-negative number, got {price}"),
        });
    }
    Ok(SqlValue::Real(price))
}

impl Entity for Book {
    type Create = CreateBook;
    type Patch = UpdateBook;

    fn descriptor() -> &'static TableDescriptor {
        &BOOKS
    }

    fn insert_fields(input: &CreateBook) -> Result<FieldMap, ValidationError> {
        Ok(FieldMap::from([
            ("name", require_text("name", &input.name, MAX_NAME_LEN)?),
            (
                "author_name",
                require_text("author_name", &input.author_name, MAX_NAME_LEN)?,
            ),
            ("price", check_price(input.price)?),
            ("date", format_date(&input.date).into()),
        ]))
    }

    fn patch_fields(patch: &UpdateBook) -> Result<FieldMap, ValidationError> {
        let mut fields = FieldMap::new();
        if let Some(name) = &patch.name {
            fields.insert("name", require_text("name", name, MAX_NAME_LEN)?);
        }
        if let Some(author_name) = &patch.author_name {
            fields.insert(
                "author_name",
                require_text("author_name", author_name, MAX_NAME_LEN)?,
            );
        }
        if let Some(price) = patch.price {
            fields.insert("price", check_price(price)?);
        }
        if let Some(date) = &patch.date {
            fields.insert("date", format_date(date).into());
        }
        Ok(fields)
    }
}
