//! Middleware and cross-cutting infrastructure.

pub mod logging;
pub mod metrics;

pub use metrics::{init_metrics, metrics_handler};
