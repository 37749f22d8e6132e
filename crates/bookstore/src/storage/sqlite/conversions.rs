//! SQLite row conversion functions.
//!
//! Rows are read by column name, so the same decoders serve both the
//! single-row select and the paged list statement.

use bookstore_core::entity::{Book, Order, User};
use bookstore_core::storage::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// An entity that can be decoded from a SQLite row.
pub trait SqliteEntity: Entity {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self>;
}

impl SqliteEntity for Book {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        row_to_book(row)
    }
}

impl SqliteEntity for Order {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        row_to_order(row)
    }
}

impl SqliteEntity for User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        row_to_user(row)
    }
}

// ============================================================================
// Entity conversions
// ============================================================================

/// Convert a SQLite row to a Book.
///
/// Expected columns: book_id, name, author_name, price, date, created_at, updated_at
pub fn row_to_book(row: &SqliteRow) -> sqlx::Result<Book> {
    Ok(Book {
        book_id: parse_uuid(row, "book_id")?,
        name: row.try_get("name")?,
        author_name: row.try_get("author_name")?,
        price: row.try_get("price")?,
        date: parse_date(row, "date")?,
        created_at: parse_datetime(row, "created_at")?,
        updated_at: parse_datetime(row, "updated_at")?,
    })
}

/// Convert a SQLite row to an Order.
///
/// Expected columns: order_id, book_id, user_id, created_at, updated_at
pub fn row_to_order(row: &SqliteRow) -> sqlx::Result<Order> {
    Ok(Order {
        order_id: parse_uuid(row, "order_id")?,
        book_id: parse_uuid(row, "book_id")?,
        user_id: parse_uuid(row, "user_id")?,
        created_at: parse_datetime(row, "created_at")?,
        updated_at: parse_datetime(row, "updated_at")?,
    })
}

/// Convert a SQLite row to a User.
///
/// Expected columns: user_id, first_name, last_name, login, password,
/// phone_number, created_at, updated_at
pub fn row_to_user(row: &SqliteRow) -> sqlx::Result<User> {
    Ok(User {
        user_id: parse_uuid(row, "user_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        login: row.try_get("login")?,
        password: row.try_get("password")?,
        phone_number: row.try_get("phone_number")?,
        created_at: parse_datetime(row, "created_at")?,
        updated_at: parse_datetime(row, "updated_at")?,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

/// Read a text column holding a UUID.
pub fn parse_uuid(row: &SqliteRow, column: &str) -> sqlx::Result<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| decode_error(column, e))
}

/// Read a text column holding a date (YYYY-MM-DD).
fn parse_date(row: &SqliteRow, column: &str) -> sqlx::Result<NaiveDate> {
    let raw: String = row.try_get(column)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| decode_error(column, e))
}

/// Read a text column holding an RFC 3339 datetime.
fn parse_datetime(row: &SqliteRow, column: &str) -> sqlx::Result<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| decode_error(column, e))
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
