// Module declarations
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod store;

// Re-export commonly used items
pub use client::ApiClient;
pub use config::{get_api_base, load_config, save_config, Config};
pub use error::{EvlensError, EvlensResult};
pub use models::*;
pub use store::{Action, AppState, DataLoader, Store};
