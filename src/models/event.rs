use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An event row as returned by /addresses/{id}/events. `url` is the
/// server-relative path of the event's detail payload.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fetched detail payload, tagged with the id of the event it belongs
/// to. The tag is assigned by the fetch operation, not parsed from the
/// body.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EventDetail {
    pub event_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event: Event = serde_json::from_str(
            r#"{"id": "e1", "type": "inspection", "created_at": "2020-01-01", "url": "/events/e1", "inspector": "kim"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "inspection");
        assert_eq!(event.extra["inspector"], "kim");
    }
}
