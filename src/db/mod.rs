//! Store connection and collection repositories.

pub mod connection;
pub mod department;
pub mod employee;
pub mod seed;

pub use connection::{CollectionCounts, connect, get_collection_counts, test_connection};
