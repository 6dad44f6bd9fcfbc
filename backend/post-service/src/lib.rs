/// Post Service Library
///
/// Serves an ordered collection of short text posts over HTTP and keeps the whole
/// sequence durable across restarts.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route wiring
/// - `services`: Collection logic (id assignment, ordering policy, not-found rules)
/// - `db`: Persistent store holding the full ordered sequence
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
