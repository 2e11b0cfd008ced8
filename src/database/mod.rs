pub mod connection;
pub mod models;
pub mod reviews;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
