use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:27606";
pub const CONFIG_FILE: &str = ".evlens-config.json";
pub const API_BASE_ENV_VAR: &str = "EVLENS_API_BASE";

// Retry policy for the /user_ids endpoint. Only that endpoint retries;
// every other fetch surfaces its failure straight to the store.
pub const USER_IDS_RETRY_DELAY: Duration = Duration::from_secs(10);
pub const USER_IDS_RETRY_ATTEMPTS: u32 = 4;
