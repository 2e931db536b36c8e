use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::constants::{API_BASE_ENV_VAR, CONFIG_FILE, DEFAULT_API_BASE};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub api_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config { api_base: None }
    }
}

pub fn load_config() -> Config {
    let home_dir = dirs::home_dir().expect("Could not find home directory");
    let config_path = home_dir.join(CONFIG_FILE);

    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).expect("Failed to read config file");
        serde_json::from_str(&config_str).unwrap_or_default()
    } else {
        Config::default()
    }
}

pub fn save_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(CONFIG_FILE);

    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;

    Ok(())
}

/// Resolve the API base URL: environment variable first, then the config
/// file, then the built-in default. Trailing slashes are trimmed so path
/// joining stays predictable.
pub fn get_api_base() -> String {
    if let Ok(base) = env::var(API_BASE_ENV_VAR) {
        return base.trim_end_matches('/').to_string();
    }

    let config = load_config();
    if let Some(base) = config.api_base {
        return base.trim_end_matches('/').to_string();
    }

    DEFAULT_API_BASE.to_string()
}
