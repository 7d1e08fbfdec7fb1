//! Configuration loading for the payroll service.
//!
//! This module provides functionality to load the service configuration
//! (listener, storage backend and logging) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Listening on {}", config.listen_addr().unwrap());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ServerConfig, StorageConfig};
