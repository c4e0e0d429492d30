//! outlay-config
//!
//! Settings model, JSON persistence and environment overrides.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{default_base_dir, Config};
