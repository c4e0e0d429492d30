use std::{env, path::PathBuf};

use outlay_config::{default_base_dir, model::ENV_DATA_DIR, Config, ConfigManager};

use crate::OutlayError;

/// Directory holding `config.json`: `OUTLAY_DATA_DIR` when set, else the
/// platform default.
pub fn config_base_dir() -> PathBuf {
    env::var_os(ENV_DATA_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_base_dir)
}

/// Loads `.env`, then the stored config, then environment overrides.
pub fn load_config() -> Result<(ConfigManager, Config), OutlayError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let manager = ConfigManager::with_base_dir(config_base_dir())?;
    let config = manager.load_with_env()?;
    Ok((manager, config))
}
