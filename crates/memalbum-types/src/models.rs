use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub code: String,
    pub recipient: String,
    pub occasion: String,
    pub custom_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub author: String,
    pub message: String,
    pub gif: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of an album. The passcode hash never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A card as listed inside an album, with the link metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumCardEntry {
    pub card_id: Uuid,
    pub code: String,
    pub recipient: String,
    pub occasion: String,
    pub year: Option<i32>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "added_at")]
    pub added_at: DateTime<Utc>,
}
