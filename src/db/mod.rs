//! Persistent storage for the trading data

pub mod queries;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use seed::seed_demo;
pub use sqlite::{Database, Dataset};
