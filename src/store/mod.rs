pub mod action;
pub mod ops;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use action::Action;
pub use ops::{DataLoader, RetryState, RetryTick};
pub use reducer::reduce;
pub use state::AppState;

use std::sync::{Arc, Mutex};

type Subscriber = Box<dyn Fn(&AppState) + Send>;

/// Holds the state tree and applies actions through [`reduce`]. After
/// every dispatch each subscriber is notified synchronously, in
/// subscription order, with the new state.
pub struct Store {
    state: AppState,
    subscribers: Vec<Subscriber>,
}

/// Handle shared between the view loop and the async operations. The
/// reduce-and-notify step runs under the lock, so no two dispatches
/// interleave.
pub type SharedStore = Arc<Mutex<Store>>;

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::new())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// The current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&AppState) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn dispatch(&mut self, action: Action) {
        let next = reduce(self.state.clone(), action);
        self.state = next;

        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
