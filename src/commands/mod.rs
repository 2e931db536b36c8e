pub mod addresses;
pub mod compare;
pub mod config;
pub mod events;
pub mod users;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::client::ApiClient;
use crate::config::get_api_base;
use crate::store::{DataLoader, RetryTick, SharedStore, Store};

/// One store/loader pair for a single command invocation.
pub fn build_loader() -> (SharedStore, DataLoader, UnboundedReceiver<RetryTick>) {
    let store = Store::new().into_shared();
    let client = ApiClient::new(get_api_base());
    let (loader, ticks) = DataLoader::new(client, store.clone());
    (store, loader, ticks)
}
