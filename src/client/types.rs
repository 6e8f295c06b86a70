//! Wire types for the backend's `kv` and `fahrten` resources.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One key/value entry scoped to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvEntry {
    pub id: i64,
    pub page: String,
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Upsert payload for `POST /api/kv`.
#[derive(Debug, Clone, Serialize)]
pub struct KvSet<'a> {
    pub page: &'a str,
    pub key: &'a str,
    pub value: &'a Value,
}

/// A recorded trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fahrt {
    pub id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    pub start: String,
    pub ziel: String,
    #[serde(default)]
    pub dauer_minutes: Option<i64>,
}

/// Create payload for `POST /api/fahrten`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFahrt {
    pub start: String,
    pub ziel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dauer_minutes: Option<i64>,
}

/// Partial update for `PUT /api/fahrten/<id>`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FahrtUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ziel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dauer_minutes: Option<i64>,
}

/// List responses come wrapped in `{"items": [...]}` or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Wrapped {
        #[serde(default = "Vec::new")]
        items: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            ListBody::Wrapped { items } => items,
            ListBody::Bare(items) => items,
        }
    }
}
