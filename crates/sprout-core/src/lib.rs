//! # sprout-core
//!
//! Shared configuration and logging for the sprout crates.
//!
//! ## Modules
//!
//! - `config`: Layered TOML configuration
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, DiffConfig, DiffScope, LogConfig};
pub use logging::init_logging;
