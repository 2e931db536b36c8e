use super::action::Action;
use super::state::AppState;

/// Apply one action to the state tree and return the new state. Pure:
/// no I/O, no clock, no dispatching from inside.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::ChangeSelectedUser(user_id) => {
            state.selected_user_id = Some(user_id);
        }

        Action::FetchUsersSuccess(user_ids) => {
            state.user_ids = user_ids;
            state.last_error = None;
        }

        Action::FetchUsersError => {
            state.last_error = Some("Failed to load user ids.".to_string());
        }

        Action::RequestAddressDetails(address_id) => {
            state.selected_address_id = Some(address_id);
        }

        Action::FetchAddressesSuccess(addresses) => {
            state.addresses = addresses;
            state.last_error = None;
        }

        Action::FetchAddressesError => {
            state.last_error = Some("Failed to load addresses.".to_string());
        }

        Action::FetchEventsSuccess(events) => {
            state.events = events;
            // Keys are scoped to one loaded event list; selections made
            // against the previous list must not survive the reload.
            state.selected_events.clear();
            state.last_error = None;
        }

        Action::FetchEventsError => {
            state.last_error = Some("Failed to load events.".to_string());
        }

        Action::ToggleEventSelection(key) => {
            let current = state.selected_events.get(&key).copied().unwrap_or(false);
            state.selected_events.insert(key, !current);
        }

        Action::CompareSelectedEvents => {
            state.comparing_events = true;
        }

        Action::StopComparingEvents => {
            state.comparing_events = false;
            state.comparison_json.clear();
        }

        Action::EventDetailsSuccess(details) => {
            state.comparison_json = details;
            state.last_error = None;
        }

        Action::EventDetailsError => {
            state.last_error = Some("Failed to load event details.".to_string());
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Event, EventDetail, UserId};
    use serde_json::Map;

    fn event(id: &str, created_at: &str) -> Event {
        Event {
            id: id.to_string(),
            event_type: "inspection".to_string(),
            created_at: created_at.to_string(),
            url: format!("/events/{}", id),
            extra: Map::new(),
        }
    }

    fn detail(event_id: &str) -> EventDetail {
        EventDetail {
            event_id: event_id.to_string(),
            fields: Map::new(),
        }
    }

    #[test]
    fn test_select_user_sets_id_only() {
        let state = AppState::new();
        let next = reduce(state.clone(), Action::ChangeSelectedUser(UserId::from("u1")));

        assert_eq!(next.selected_user_id, Some(UserId::from("u1")));
        assert_eq!(next.user_ids, state.user_ids);
        assert_eq!(next.addresses, state.addresses);
    }

    #[test]
    fn test_users_success_replaces_list_and_clears_error() {
        let mut state = AppState::new();
        state.user_ids = vec![UserId::from("old")];
        state.last_error = Some("Failed to load user ids.".to_string());

        let next = reduce(
            state,
            Action::FetchUsersSuccess(vec![UserId::from("u1"), UserId::Number(2)]),
        );

        assert_eq!(next.user_ids, vec![UserId::from("u1"), UserId::Number(2)]);
        assert_eq!(next.last_error, None);
    }

    #[test]
    fn test_error_actions_set_last_error() {
        let next = reduce(AppState::new(), Action::FetchUsersError);
        assert!(next.last_error.is_some());

        let next = reduce(AppState::new(), Action::FetchEventsError);
        assert_eq!(next.last_error, Some("Failed to load events.".to_string()));
    }

    #[test]
    fn test_events_success_clears_stale_selection() {
        let mut state = AppState::new();
        state.selected_events.insert("t1-e1".to_string(), true);
        state.selected_events.insert("t2-e2".to_string(), false);

        let next = reduce(
            state,
            Action::FetchEventsSuccess(vec![event("e3", "t3")]),
        );

        assert!(next.selected_events.is_empty());
        assert_eq!(next.events.len(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let state = AppState::new();
        let key = "t1-e1".to_string();

        let once = reduce(state.clone(), Action::ToggleEventSelection(key.clone()));
        assert_eq!(once.selected_events.get(&key), Some(&true));

        let twice = reduce(once, Action::ToggleEventSelection(key.clone()));
        assert_eq!(twice.selected_events.get(&key), Some(&false));

        // A third toggle flips back to selected again
        let thrice = reduce(twice, Action::ToggleEventSelection(key.clone()));
        assert_eq!(thrice.selected_events.get(&key), Some(&true));
    }

    #[test]
    fn test_stop_comparing_clears_comparison_slots() {
        let mut state = AppState::new();
        state.comparing_events = true;
        state.comparison_json = vec![detail("e1"), detail("e2")];

        let next = reduce(state, Action::StopComparingEvents);

        assert!(!next.comparing_events);
        assert!(next.comparison_json.is_empty());
    }

    #[test]
    fn test_details_success_populates_slots_in_order() {
        let next = reduce(
            AppState::new(),
            Action::EventDetailsSuccess(vec![detail("e2"), detail("e1")]),
        );

        assert_eq!(next.comparison_json[0].event_id, "e2");
        assert_eq!(next.comparison_json[1].event_id, "e1");
    }

    #[test]
    fn test_non_applicable_actions_leave_state_unchanged_by_value() {
        // With an empty tree these actions have nothing to change; the
        // reduced value must compare equal to the input.
        let state = AppState::new();

        assert_eq!(reduce(state.clone(), Action::StopComparingEvents), state);
        assert_eq!(
            reduce(state.clone(), Action::FetchUsersSuccess(Vec::new())),
            state
        );
        assert_eq!(
            reduce(state.clone(), Action::EventDetailsSuccess(Vec::new())),
            state
        );
    }
}
