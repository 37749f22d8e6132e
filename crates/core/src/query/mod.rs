mod rewrite;
mod table;
pub mod template;
mod value;

pub use rewrite::{rewrite, RewriteError, Rewritten};
pub use table::{TableDescriptor, CREATED_AT, UPDATED_AT};
pub use value::{FieldMap, SqlValue};
