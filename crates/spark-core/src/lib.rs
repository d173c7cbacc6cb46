//! Domain types shared by every Spark crate.

pub mod config;
pub mod error;
pub mod generation;
pub mod membership;
pub mod message;
pub mod payment;
pub mod profile;
pub mod view;

// Re-export common error type
pub use error::SparkError;
