//! SQLite-backed storage for the bookstore.
//!
//! Wires the pure pieces from `bookstore_core` to a pooled `sqlx` backend:
//! a generic repository per entity kind, a lazily populated storage facade,
//! a thin service layer and the command-line surface.

pub mod cli;
pub mod config;
pub mod output;
pub mod service;
pub mod storage;
