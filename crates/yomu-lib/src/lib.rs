pub mod aggregation;
pub mod error;
pub mod models;
pub mod prelude;
pub mod query;
