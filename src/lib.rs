// Library exports for testing
pub mod api;
pub mod config;
pub mod downstream;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod operation;
