use serde::{Deserialize, Serialize};

/// A persisted item as exposed over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Always serialized, `null` when the item has no description.
    pub description: Option<String>,
}

/// Request body for `POST /api/items` and `PUT /api/items/{id}`.
///
/// Both fields are optional on the wire; a missing field is written as `NULL`
/// and left for the store to accept or reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
        }
    }
}
