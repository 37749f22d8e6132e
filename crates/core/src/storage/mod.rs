//! Storage abstractions.
//!
//! Backend-agnostic repository traits, the error taxonomy every backend maps
//! into, and the request/response types shared by list and lookup calls.

mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::{CrudRepository, Entity, Storage};
pub use types::{ListRequest, ListResponse, LookupKey};
