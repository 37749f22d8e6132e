//! Functional core for the bookstore storage layer.
//!
//! Everything in this crate is pure: entity types and their validation,
//! the repository contracts, the error taxonomy and the query template
//! rewriter. Backends that perform I/O live in the `bookstore` crate.

pub mod entity;
pub mod query;
pub mod storage;
