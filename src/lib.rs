pub mod config;
pub mod constants;
pub mod error;
pub mod idempotency;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod types;

// Application use case and its adapters
pub mod app;
pub mod infra;
