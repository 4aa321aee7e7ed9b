//! Client configuration
//!
//! Layered with the 12-factor app pattern:
//! 1. Defaults (from code)
//! 2. Config file (cvs.toml)
//! 3. Environment variables (CVS_* prefix, `__` for nesting)
//!
//! # Example
//!
//! ```no_run
//! use cvs_client::config::ConfigLoader;
//!
//! // Load from default locations
//! let config = ConfigLoader::load_default().expect("Failed to load config");
//!
//! // Or load from specific file
//! let config = ConfigLoader::new()
//!     .with_file("./cvs.toml")
//!     .load()
//!     .expect("Failed to load config");
//! ```
pub mod error;
pub mod loader;

pub use error::{ConfigError, Result};
pub use loader::{ClientConfig, ConfigLoader};
