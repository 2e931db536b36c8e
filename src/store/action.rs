use crate::models::{Address, Event, EventDetail, UserId};

/// The sole unit of state mutation. Each dispatched action is reduced in
/// full before the next one is looked at.
#[derive(Debug, Clone)]
pub enum Action {
    // User picker
    ChangeSelectedUser(UserId),
    FetchUsersSuccess(Vec<UserId>),
    FetchUsersError,

    // Address list
    RequestAddressDetails(String),
    FetchAddressesSuccess(Vec<Address>),
    FetchAddressesError,

    // Event list
    FetchEventsSuccess(Vec<Event>),
    FetchEventsError,
    ToggleEventSelection(String),

    // Comparison
    CompareSelectedEvents,
    StopComparingEvents,
    EventDetailsSuccess(Vec<EventDetail>),
    EventDetailsError,
}
