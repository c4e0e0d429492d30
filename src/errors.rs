use outlay_config::ConfigError;
use outlay_core::CoreError;
use thiserror::Error;

/// Top-level failure for the binaries.
#[derive(Debug, Error)]
pub enum OutlayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Shell error: {0}")]
    Cli(String),
}
