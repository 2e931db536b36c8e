use std::collections::HashMap;

use crate::models::{Address, Event, EventDetail, UserId};

/// The complete application state. One instance lives in the [`Store`]
/// and is only ever replaced through [`reduce`].
///
/// [`Store`]: crate::store::Store
/// [`reduce`]: crate::store::reduce
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Ids available in the user picker
    pub user_ids: Vec<UserId>,
    /// Currently selected user id (if any)
    pub selected_user_id: Option<UserId>,
    /// Addresses of the selected user, deleted ones included
    pub addresses: Vec<Address>,
    /// Currently selected address id (if any)
    pub selected_address_id: Option<String>,
    /// Events of the selected address
    pub events: Vec<Event>,
    /// Selection state per event key (see [`event_key`])
    ///
    /// [`event_key`]: crate::store::selectors::event_key
    pub selected_events: HashMap<String, bool>,
    /// Whether the comparison overlay is open
    pub comparing_events: bool,
    /// Fetched detail payloads, slots 0 and 1 in fetch order
    pub comparison_json: Vec<EventDetail>,
    /// Message describing the last failed workflow step
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
