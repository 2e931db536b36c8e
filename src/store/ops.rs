//! Async operations that bridge the HTTP API and the store. Every
//! operation converts its outcome into a dispatched action; failures
//! never propagate past the operation boundary.

use std::time::Duration;

use futures::future;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::selectors::event_key;
use super::{Action, SharedStore};
use crate::client::ApiClient;
use crate::constants::{USER_IDS_RETRY_ATTEMPTS, USER_IDS_RETRY_DELAY};
use crate::logging::{log_debug, log_error};
use crate::models::{Event, UserId};

/// Message sent when the retry timer expires. The loop that owns the
/// receiver answers it by calling [`DataLoader::run_scheduled_retry`].
pub struct RetryTick;

/// The single retry slot for the user-ids fetch: one timer, one attempt
/// counter. Mutated only through `schedule`, `reset`, and the loader's
/// `run_scheduled_retry`.
pub struct RetryState {
    timer: Option<JoinHandle<()>>,
    attempts: u32,
    delay: Duration,
    tx: UnboundedSender<RetryTick>,
}

impl RetryState {
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<RetryTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                timer: None,
                attempts: 0,
                delay,
                tx,
            },
            rx,
        )
    }

    /// Arm the timer. A stale pending timer is aborted first; the slot
    /// never holds more than one.
    fn schedule(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(RetryTick);
        }));
    }

    /// Abort any pending timer and zero the attempt counter.
    fn reset(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.attempts = 0;
    }

    /// True while a retry chain is in flight.
    pub fn pending(&self) -> bool {
        self.timer.is_some()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Performs the network requests and dispatches their outcomes into the
/// store.
pub struct DataLoader {
    client: ApiClient,
    store: SharedStore,
    retry: RetryState,
}

impl DataLoader {
    pub fn new(client: ApiClient, store: SharedStore) -> (Self, UnboundedReceiver<RetryTick>) {
        Self::with_retry_delay(client, store, USER_IDS_RETRY_DELAY)
    }

    /// Like [`DataLoader::new`] but with an explicit retry delay.
    pub fn with_retry_delay(
        client: ApiClient,
        store: SharedStore,
        delay: Duration,
    ) -> (Self, UnboundedReceiver<RetryTick>) {
        let (retry, ticks) = RetryState::new(delay);
        (
            Self {
                client,
                store,
                retry,
            },
            ticks,
        )
    }

    pub fn retry_pending(&self) -> bool {
        self.retry.pending()
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry.attempts()
    }

    fn dispatch(&self, action: Action) {
        self.store.lock().unwrap().dispatch(action);
    }

    /// GET /user_ids. A 5xx status or a network failure arms the retry
    /// timer; any other failure disarms it. All failures dispatch
    /// `FetchUsersError`.
    pub async fn fetch_user_ids(&mut self) {
        log_debug("Fetching user ids");

        match self.client.get_user_ids().await {
            Ok(user_ids) => {
                self.retry.reset();
                self.dispatch(Action::FetchUsersSuccess(user_ids));
            }
            Err(err) => {
                if err.is_retryable() {
                    self.retry.schedule();
                } else {
                    self.retry.reset();
                }
                log_error(&format!("Failed to fetch user ids: {}", err));
                self.dispatch(Action::FetchUsersError);
            }
        }
    }

    /// Answer an expired retry timer: bump the attempt counter, halt the
    /// chain once it passes the maximum, otherwise fetch again.
    pub async fn run_scheduled_retry(&mut self) {
        self.retry.attempts += 1;

        if self.retry.attempts > USER_IDS_RETRY_ATTEMPTS {
            log_debug("Retry budget exhausted, halting user-ids retry chain");
            self.retry.reset();
            return;
        }

        log_debug(&format!(
            "Retrying user-ids fetch, attempt {}",
            self.retry.attempts
        ));
        self.fetch_user_ids().await;
    }

    /// GET a user's addresses. No retry.
    pub async fn fetch_addresses(&mut self, user_id: &UserId) {
        log_debug(&format!("Fetching addresses for user {}", user_id));

        match self.client.get_addresses(user_id).await {
            Ok(addresses) => self.dispatch(Action::FetchAddressesSuccess(addresses)),
            Err(err) => {
                log_error(&format!("Failed to fetch addresses: {}", err));
                self.dispatch(Action::FetchAddressesError);
            }
        }
    }

    /// GET an address's events. No retry.
    pub async fn fetch_events(&mut self, address_id: &str) {
        log_debug(&format!("Fetching events for address {}", address_id));

        match self.client.get_events(address_id).await {
            Ok(events) => self.dispatch(Action::FetchEventsSuccess(events)),
            Err(err) => {
                log_error(&format!("Failed to fetch events: {}", err));
                self.dispatch(Action::FetchEventsError);
            }
        }
    }

    /// Fetch the detail payload of every selected event, concurrently.
    /// Results keep the event-list order regardless of response arrival;
    /// any single failure fails the whole operation with one error
    /// action.
    pub async fn fetch_selected_event_details(&mut self) {
        let (selected_events, events) = {
            let store = self.store.lock().unwrap();
            let state = store.state();
            (state.selected_events.clone(), state.events.clone())
        };

        let chosen: Vec<Event> = events
            .into_iter()
            .filter(|event| {
                selected_events
                    .get(&event_key(event))
                    .copied()
                    .unwrap_or(false)
            })
            .collect();

        log_debug(&format!("Fetching details for {} selected events", chosen.len()));

        let fetches = chosen
            .iter()
            .map(|event| self.client.get_event_detail(event));

        match future::try_join_all(fetches).await {
            Ok(details) => self.dispatch(Action::EventDetailsSuccess(details)),
            Err(err) => {
                log_error(&format!("Failed to fetch event details: {}", err));
                self.dispatch(Action::EventDetailsError);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const TEST_RETRY_DELAY: Duration = Duration::from_millis(10);

    /// Minimal HTTP responder: routes a request path to a status code and
    /// a body, counting every request it serves.
    async fn spawn_server<F>(routes: F) -> (SocketAddr, Arc<AtomicUsize>)
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_server = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                hits_in_server.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes(&path);
                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (addr, hits)
    }

    fn loader_against(
        addr: SocketAddr,
        store: SharedStore,
    ) -> (DataLoader, UnboundedReceiver<RetryTick>) {
        DataLoader::with_retry_delay(
            ApiClient::new(format!("http://{}", addr)),
            store,
            TEST_RETRY_DELAY,
        )
    }

    /// Counts dispatches by piggybacking on subscriber notification.
    fn count_dispatches(store: &SharedStore) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_in_subscriber = count.clone();
        store.lock().unwrap().subscribe(move |_state| {
            count_in_subscriber.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    async fn drain_retry_chain(loader: &mut DataLoader, ticks: &mut UnboundedReceiver<RetryTick>) {
        while loader.retry_pending() {
            if ticks.recv().await.is_none() {
                break;
            }
            loader.run_scheduled_retry().await;
        }
    }

    #[tokio::test]
    async fn test_fetch_user_ids_success() {
        let (addr, hits) = spawn_server(|path| match path {
            "/user_ids" => (200, r#"["u1", 7]"#.to_string()),
            _ => (404, String::new()),
        })
        .await;

        let store = Store::new().into_shared();
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_user_ids().await;

        let state = store.lock().unwrap().state().clone();
        assert_eq!(state.user_ids, vec![UserId::from("u1"), UserId::Number(7)]);
        assert_eq!(state.last_error, None);
        assert!(!loader.retry_pending());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_five_server_errors_schedule_exactly_four_retries() {
        let (addr, hits) = spawn_server(|_| (500, String::new())).await;

        let store = Store::new().into_shared();
        let (mut loader, mut ticks) = loader_against(addr, store.clone());

        loader.fetch_user_ids().await;
        assert!(loader.retry_pending());

        drain_retry_chain(&mut loader, &mut ticks).await;

        // Initial request plus 4 re-invocations, then the chain halts
        // with the counter back at zero.
        assert_eq!(hits.load(Ordering::SeqCst), 5);
        assert!(!loader.retry_pending());
        assert_eq!(loader.retry_attempts(), 0);
        assert!(store.lock().unwrap().state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_client_error_does_not_schedule_retry() {
        let (addr, hits) = spawn_server(|_| (404, String::new())).await;

        let store = Store::new().into_shared();
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_user_ids().await;

        assert!(!loader.retry_pending());
        assert_eq!(loader.retry_attempts(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(store.lock().unwrap().state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_malformed_body_dispatches_error_without_retry() {
        let (addr, _hits) = spawn_server(|_| (200, "not json".to_string())).await;

        let store = Store::new().into_shared();
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_user_ids().await;

        assert!(!loader.retry_pending());
        assert!(store.lock().unwrap().state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_success_after_failure_resets_the_chain() {
        let (addr, hits) = spawn_server(|_| (503, String::new())).await;
        let (good_addr, _good_hits) = spawn_server(|path| match path {
            "/user_ids" => (200, r#"["u1"]"#.to_string()),
            _ => (404, String::new()),
        })
        .await;

        let store = Store::new().into_shared();
        // Long delay keeps the timer from firing mid-test; only the reset
        // path is under test here.
        let (mut loader, mut ticks) = DataLoader::with_retry_delay(
            ApiClient::new(format!("http://{}", addr)),
            store.clone(),
            Duration::from_secs(60),
        );

        loader.fetch_user_ids().await;
        assert!(loader.retry_pending());
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // A fresh successful fetch (operator pointed us at a live server)
        // must disarm the pending timer and zero the counter.
        loader.client = ApiClient::new(format!("http://{}", good_addr));
        loader.fetch_user_ids().await;

        assert!(!loader.retry_pending());
        assert_eq!(loader.retry_attempts(), 0);
        assert!(ticks.try_recv().is_err());
        assert_eq!(
            store.lock().unwrap().state().user_ids,
            vec![UserId::from("u1")]
        );
    }

    #[tokio::test]
    async fn test_fetch_addresses_success_carries_parsed_body() {
        let (addr, _hits) = spawn_server(|path| match path {
            "/users/u1/addresses" => (
                200,
                r#"[{"id": "a1", "street": "1 Main St"}, {"id": "a2", "deleted": true}]"#
                    .to_string(),
            ),
            _ => (404, String::new()),
        })
        .await;

        let store = Store::new().into_shared();
        let dispatches = count_dispatches(&store);
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_addresses(&UserId::from("u1")).await;

        let state = store.lock().unwrap().state().clone();
        assert_eq!(state.addresses.len(), 2);
        assert_eq!(state.addresses[0].id, "a1");
        assert_eq!(state.addresses[0].extra["street"], "1 Main St");
        assert!(state.addresses[1].is_deleted());
        assert_eq!(state.last_error, None);
        assert_eq!(dispatches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_events_failure_sets_error() {
        let (addr, _hits) = spawn_server(|_| (500, String::new())).await;

        let store = Store::new().into_shared();
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_events("a1").await;

        let state = store.lock().unwrap().state().clone();
        assert!(state.events.is_empty());
        assert_eq!(state.last_error, Some("Failed to load events.".to_string()));
        // Only the user-ids endpoint retries.
        assert!(!loader.retry_pending());
    }

    fn seed_two_selected_events(store: &SharedStore) {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"id": "e1", "type": "inspection", "created_at": "t1", "url": "/events/e1"},
                {"id": "e2", "type": "repair", "created_at": "t2", "url": "/events/e2"},
                {"id": "e3", "type": "sale", "created_at": "t3", "url": "/events/e3"}
            ]"#,
        )
        .unwrap();

        let mut store = store.lock().unwrap();
        store.dispatch(Action::FetchEventsSuccess(events));
        // Select out of list order on purpose.
        store.dispatch(Action::ToggleEventSelection("t2-e2".to_string()));
        store.dispatch(Action::ToggleEventSelection("t1-e1".to_string()));
    }

    #[tokio::test]
    async fn test_event_details_keep_event_list_order() {
        let (addr, _hits) = spawn_server(|path| match path {
            "/events/e1" => (200, r#"{"status": "open"}"#.to_string()),
            "/events/e2" => (200, r#"{"status": "closed"}"#.to_string()),
            _ => (404, String::new()),
        })
        .await;

        let store = Store::new().into_shared();
        seed_two_selected_events(&store);
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_selected_event_details().await;

        let state = store.lock().unwrap().state().clone();
        // e2 was selected first, but e1 precedes it in the event list.
        assert_eq!(state.comparison_json.len(), 2);
        assert_eq!(state.comparison_json[0].event_id, "e1");
        assert_eq!(state.comparison_json[0].fields["status"], "open");
        assert_eq!(state.comparison_json[1].event_id, "e2");
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn test_one_failed_detail_fails_the_whole_operation() {
        let (addr, _hits) = spawn_server(|path| match path {
            "/events/e1" => (200, r#"{"status": "open"}"#.to_string()),
            "/events/e2" => (500, String::new()),
            _ => (404, String::new()),
        })
        .await;

        let store = Store::new().into_shared();
        seed_two_selected_events(&store);
        let dispatches = count_dispatches(&store);
        let (mut loader, _ticks) = loader_against(addr, store.clone());

        loader.fetch_selected_event_details().await;

        let state = store.lock().unwrap().state().clone();
        // Exactly one error action, zero success actions.
        assert_eq!(dispatches.load(Ordering::SeqCst), 1);
        assert!(state.comparison_json.is_empty());
        assert_eq!(
            state.last_error,
            Some("Failed to load event details.".to_string())
        );
    }
}
