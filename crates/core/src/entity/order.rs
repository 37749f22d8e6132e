use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::{FieldMap, TableDescriptor};
use crate::storage::Entity;

use super::error::ValidationError;

/// Table layout for orders. `book_id` and `user_id` are foreign keys.
pub static ORDERS: TableDescriptor = TableDescriptor {
    entity_type: "Order",
    table: "orders",
    id_column: "order_id",
    columns: &["book_id", "user_id"],
    alternate_key: None,
    default_page_size: 10,
};

/// A user's order of one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrder {
    pub book_id: Uuid,
    pub user_id: Uuid,
}

/// Partial update for an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Entity for Order {
    type Create = CreateOrder;
    type Patch = UpdateOrder;

    fn descriptor() -> &'static TableDescriptor {
        &ORDERS
    }

    fn insert_fields(input: &CreateOrder) -> Result<FieldMap, ValidationError> {
        Ok(FieldMap::from([
            ("book_id", input.book_id.to_string().into()),
            ("user_id", input.user_id.to_string().into()),
        ]))
    }

    fn patch_fields(patch: &UpdateOrder) -> Result<FieldMap, ValidationError> {
        let mut fields = FieldMap::new();
        if let Some(book_id) = patch.book_id {
            fields.insert("book_id", book_id.to_string().into());
        }
        if let Some(user_id) = patch.user_id {
            fields.insert("user_id", user_id.to_string().into());
        }
        Ok(fields)
    }
}
