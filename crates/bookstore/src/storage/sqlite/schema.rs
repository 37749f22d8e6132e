//! SQLite schema definition.
//!
//! Statement text for entity CRUD is derived from table descriptors in
//! `bookstore_core::query::template`; only the DDL lives here.

/// SQL statement to create all tables. Safe to run on every start.
pub const CREATE_TABLES: &str = r#"
-- Books table
CREATE TABLE IF NOT EXISTS books (
    book_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    author_name TEXT NOT NULL,
    price REAL NOT NULL CHECK (price >= 0),
    date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    login TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Orders table; referenced rows cannot be deleted while an order points at them
CREATE TABLE IF NOT EXISTS orders (
    order_id TEXT PRIMARY KEY,
    book_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (book_id) REFERENCES books(book_id),
    FOREIGN KEY (user_id) REFERENCES users(user_id)
);

CREATE INDEX IF NOT EXISTS idx_orders_book_id ON orders(book_id);
CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id);
"#;
