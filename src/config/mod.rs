pub mod config;

pub use config::{get_api_base, load_config, save_config, Config};
