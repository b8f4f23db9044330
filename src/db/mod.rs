pub mod connection;
pub mod contacts;
pub mod listings;

pub use connection::{init_db, Database};
