use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Album, AlbumCardEntry, Card, Message};

// -- Cards --

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCardRequest {
    pub recipient: Option<String>,
    pub occasion: Option<String>,
    pub custom_message: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub card: Card,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardExistsResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardMessagesResponse {
    pub card: Card,
    pub messages: Vec<Message>,
}

// -- Messages --

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub author: Option<String>,
    pub message: Option<String>,
    pub gif: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: Message,
}

// -- Albums --

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAlbumRequest {
    pub name: Option<String>,
    pub passcode: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub album: Album,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddCardRequest {
    pub album_id: Option<String>,
    pub passcode: Option<String>,
    pub card_code: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedCard {
    pub album_id: Uuid,
    pub card_code: String,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddCardResponse {
    pub added: AddedCard,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ViewAlbumRequest {
    pub album_code: Option<String>,
    pub passcode: Option<String>,
}

/// Passcode carried either in the query string or in a JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct PasscodeParams {
    pub passcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlbumViewResponse {
    pub album: Album,
    pub cards: Vec<AlbumCardEntry>,
}

// -- Stats --

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub cards: u64,
    pub messages: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
