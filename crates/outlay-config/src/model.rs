use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

pub use outlay_core::dashboard::RECENT_LIMIT as DEFAULT_RECENT_LIMIT;
pub use outlay_core::DEFAULT_ALERT_THRESHOLD;

pub const DEFAULT_PORT: u16 = 11000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

pub const ENV_DATA_DIR: &str = "OUTLAY_DATA_DIR";
pub const ENV_BIND: &str = "OUTLAY_BIND";
pub const ENV_PORT: &str = "PORT";
pub const ENV_ALERT_THRESHOLD: &str = "OUTLAY_ALERT_THRESHOLD";

/// Settings shared by the server and the terminal shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Root for stored books and users. Defaults to `<data dir>/outlay`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_bind_address")]
    pub bind_address: String,
    #[serde(default = "Config::default_port")]
    pub port: u16,
    #[serde(default = "Config::default_alert_threshold")]
    pub alert_threshold: i64,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            bind_address: Self::default_bind_address(),
            port: Self::default_port(),
            alert_threshold: Self::default_alert_threshold(),
            currency_symbol: Self::default_currency_symbol(),
            recent_limit: Self::default_recent_limit(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn default_bind_address() -> String {
        DEFAULT_BIND_ADDRESS.into()
    }

    pub fn default_port() -> u16 {
        DEFAULT_PORT
    }

    pub fn default_alert_threshold() -> i64 {
        DEFAULT_ALERT_THRESHOLD
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_recent_limit() -> usize {
        DEFAULT_RECENT_LIMIT
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        default_base_dir()
    }

    /// Parsed listen address, falling back to the default bind on bad input.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .unwrap_or_else(|_| {
                tracing::warn!(
                    bind = %self.bind_address,
                    "invalid bind address, using {DEFAULT_BIND_ADDRESS}"
                );
                SocketAddr::from(([127, 0, 0, 1], self.port))
            })
    }

    /// Overlays values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Overlays values from `lookup`; unparsable values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|value| !value.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(bind) = lookup(ENV_BIND).filter(|value| !value.trim().is_empty()) {
            self.bind_address = bind.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(%port, "{ENV_PORT} is not a valid port, keeping {}", self.port),
            }
        }
        if let Some(threshold) = lookup(ENV_ALERT_THRESHOLD) {
            match threshold.trim().parse() {
                Ok(threshold) => self.alert_threshold = threshold,
                Err(_) => tracing::warn!(
                    %threshold,
                    "{ENV_ALERT_THRESHOLD} is not a number, keeping {}",
                    self.alert_threshold
                ),
            }
        }
    }
}

/// `<platform data dir>/outlay`, or `./outlay` when no data dir is known.
pub fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("outlay")
}
