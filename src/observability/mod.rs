//! # Observability Infrastructure
//!
//! Structured logging for the gwvalidate binary. The validators do not log;
//! events are emitted where documents are loaded, decoded and reported.

pub mod logging;

pub use logging::{build_filter, init_logging, log_settings_info};
