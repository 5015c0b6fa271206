//! Database layer - connection pool and schema

pub mod migrations;
pub mod pool;

pub use pool::{create_pool, create_pool_with_options};
