use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{EvlensError, EvlensResult};
use crate::models::{Address, Event, EventDetail, UserId};

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the body. Non-2xx statuses and malformed
    /// bodies are surfaced as distinct error variants so callers can tell
    /// a dead server from a broken payload.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> EvlensResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(EvlensError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvlensError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(EvlensError::from_request)?;
        serde_json::from_str(&body).map_err(|e| EvlensError::Parse(e.to_string()))
    }

    pub async fn get_user_ids(&self) -> EvlensResult<Vec<UserId>> {
        self.get_json("/user_ids").await
    }

    pub async fn get_addresses(&self, user_id: &UserId) -> EvlensResult<Vec<Address>> {
        self.get_json(&format!("/users/{}/addresses", user_id)).await
    }

    pub async fn get_events(&self, address_id: &str) -> EvlensResult<Vec<Event>> {
        self.get_json(&format!("/addresses/{}/events", address_id))
            .await
    }

    /// Fetch one event's detail payload from its server-relative URL and
    /// tag it with the event's id.
    pub async fn get_event_detail(&self, event: &Event) -> EvlensResult<EventDetail> {
        let fields: Map<String, Value> = self.get_json(&event.url).await?;

        Ok(EventDetail {
            event_id: event.id.clone(),
            fields,
        })
    }
}
