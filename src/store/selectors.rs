//! Pure derivation functions over a state snapshot. Nothing in here
//! touches the store or performs I/O, so every selector is callable from
//! a render pass, a command handler, or a test alike.

use std::collections::HashMap;

use super::state::AppState;
use crate::models::{Address, Event};

/// Addresses that have not been soft-deleted, in their original order.
pub fn undeleted_addresses(addresses: &[Address]) -> Vec<&Address> {
    addresses.iter().filter(|a| !a.is_deleted()).collect()
}

/// Composite key identifying an event row within the loaded event list.
/// Every selection lookup and toggle uses this exact derivation; a
/// mismatch anywhere would silently break selection.
pub fn event_key(event: &Event) -> String {
    format!("{}-{}", event.created_at, event.id)
}

/// True while fewer than two events are selected. Already-selected rows
/// stay toggleable so they can be unchecked.
pub fn can_select_events(selected_events: &HashMap<String, bool>) -> bool {
    selected_count(selected_events) < 2
}

/// True once exactly two events are selected and comparison can start.
pub fn can_compare(selected_events: &HashMap<String, bool>) -> bool {
    selected_count(selected_events) == 2
}

fn selected_count(selected_events: &HashMap<String, bool>) -> usize {
    selected_events.values().filter(|selected| **selected).count()
}

/// The event record backing comparison slot `slot`, looked up by the id
/// stored in the fetched detail payload. `None` when the slot is empty or
/// the event is no longer in the list.
pub fn selected_event(state: &AppState, slot: usize) -> Option<&Event> {
    let detail = state.comparison_json.get(slot)?;
    state.events.iter().find(|e| e.id == detail.event_id)
}
