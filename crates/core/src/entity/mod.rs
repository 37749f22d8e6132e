mod book;
mod error;
mod order;
mod user;
mod validation;

pub use book::{Book, CreateBook, UpdateBook, BOOKS};
pub use error::ValidationError;
pub use order::{CreateOrder, Order, UpdateOrder, ORDERS};
pub use user::{CreateUser, UpdateUser, User, USERS};
pub use validation::format_date;
