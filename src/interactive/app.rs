use std::error::Error;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::client::ApiClient;
use crate::config::get_api_base;
use crate::store::selectors::{can_compare, can_select_events, event_key, undeleted_addresses};
use crate::store::{Action, AppState, DataLoader, RetryTick, SharedStore, Store};

/// Which pane key navigation applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Users,
    Addresses,
    Events,
}

pub struct InteractiveApp {
    pub store: SharedStore,
    pub loader: DataLoader,
    retry_ticks: UnboundedReceiver<RetryTick>,
    pub focus: Focus,
    pub user_index: usize,
    pub address_index: usize,
    pub event_index: usize,
    pub should_quit: bool,
}

impl InteractiveApp {
    pub async fn new() -> Result<Self, Box<dyn Error>> {
        let store = Store::new().into_shared();
        let client = ApiClient::new(get_api_base());
        let (loader, retry_ticks) = DataLoader::new(client, store.clone());

        let mut app = Self {
            store,
            loader,
            retry_ticks,
            focus: Focus::Users,
            user_index: 0,
            address_index: 0,
            event_index: 0,
            should_quit: false,
        };

        app.loader.fetch_user_ids().await;
        Ok(app)
    }

    /// Snapshot of the current state for one render or handler pass.
    pub fn state(&self) -> AppState {
        self.store.lock().unwrap().state().clone()
    }

    fn dispatch(&self, action: Action) {
        self.store.lock().unwrap().dispatch(action);
    }

    /// Run any retry timers that expired since the last pass.
    pub async fn drain_retry_ticks(&mut self) {
        while self.retry_ticks.try_recv().is_ok() {
            self.loader.run_scheduled_retry().await;
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Users => Focus::Addresses,
            Focus::Addresses => Focus::Events,
            Focus::Events => Focus::Users,
        };
    }

    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Users => Focus::Events,
            Focus::Addresses => Focus::Users,
            Focus::Events => Focus::Addresses,
        };
    }

    fn focused_len(&self, state: &AppState) -> usize {
        match self.focus {
            Focus::Users => state.user_ids.len(),
            Focus::Addresses => undeleted_addresses(&state.addresses).len(),
            Focus::Events => state.events.len(),
        }
    }

    fn focused_index_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Users => &mut self.user_index,
            Focus::Addresses => &mut self.address_index,
            Focus::Events => &mut self.event_index,
        }
    }

    pub fn move_up(&mut self) {
        let index = self.focused_index_mut();
        *index = index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let state = self.state();
        let len = self.focused_len(&state);
        let index = self.focused_index_mut();
        if len > 0 && *index + 1 < len {
            *index += 1;
        }
    }

    /// Enter on the users pane: select the user and load their addresses.
    pub async fn select_focused_user(&mut self) {
        let state = self.state();
        if let Some(user_id) = state.user_ids.get(self.user_index).cloned() {
            self.dispatch(Action::ChangeSelectedUser(user_id.clone()));
            self.loader.fetch_addresses(&user_id).await;
            self.address_index = 0;
            self.event_index = 0;
        }
    }

    /// Enter on the addresses pane: select the address and load its
    /// events. Indexing follows the rendered (undeleted) list.
    pub async fn select_focused_address(&mut self) {
        let state = self.state();
        let visible = undeleted_addresses(&state.addresses);
        if let Some(address) = visible.get(self.address_index) {
            let address_id = address.id.clone();
            self.dispatch(Action::RequestAddressDetails(address_id.clone()));
            self.loader.fetch_events(&address_id).await;
            self.event_index = 0;
        }
    }

    /// Space on the events pane. Checking is blocked once two events are
    /// selected; unchecking is always allowed.
    pub fn toggle_focused_event(&mut self) {
        let state = self.state();
        if let Some(event) = state.events.get(self.event_index) {
            let key = event_key(event);
            let already_selected = state.selected_events.get(&key).copied().unwrap_or(false);
            if already_selected || can_select_events(&state.selected_events) {
                self.dispatch(Action::ToggleEventSelection(key));
            }
        }
    }

    /// Fetch the two selected detail payloads and open the overlay.
    pub async fn compare_selected(&mut self) {
        let state = self.state();
        if can_compare(&state.selected_events) {
            self.loader.fetch_selected_event_details().await;
            self.dispatch(Action::CompareSelectedEvents);
        }
    }

    pub fn cancel_compare(&mut self) {
        self.dispatch(Action::StopComparingEvents);
    }

    pub async fn refresh_user_ids(&mut self) {
        self.loader.fetch_user_ids().await;
    }
}
