use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An address record. Only `id` and the soft-delete flag are structured;
/// everything else the server sends is kept verbatim for display.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Address {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Address {
    pub fn is_deleted(&self) -> bool {
        self.deleted == Some(true)
    }
}
