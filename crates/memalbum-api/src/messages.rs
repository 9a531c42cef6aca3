use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use memalbum_db::models::NewMessage;
use memalbum_types::api::{MessageResponse, SendMessageRequest};
use memalbum_types::models::Message;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::{clean, clip, rows, with_db};

pub const DEFAULT_AUTHOR: &str = "Anon";

const MAX_AUTHOR_LEN: usize = 80;
const MAX_MESSAGE_LEN: usize = 5000;
const MAX_GIF_URL_LEN: usize = 2048;

/// POST /api/cards/{code}/messages/send: append a message to a card.
///
/// The GIF is a URL the client already picked from its search provider; it
/// is only trimmed and clipped, never fetched.
pub async fn send_message(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(code) = path?;
    let code = clean(Some(code)).ok_or_else(|| ApiError::bad_request("Missing code"))?;
    let Json(req) = payload?;

    let author = clip(
        clean(req.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        MAX_AUTHOR_LEN,
    );
    let body = clean(req.message)
        .map(|m| clip(m, MAX_MESSAGE_LEN))
        .ok_or_else(|| ApiError::bad_request("Message text is required"))?;
    let gif = clean(req.gif).map(|g| clip(g, MAX_GIF_URL_LEN));

    let id = Uuid::new_v4();
    let created_at = rows::now();

    let inserted = {
        let row_id = id.to_string();
        let author = author.clone();
        let body = body.clone();
        let gif = gif.clone();
        let stamp = rows::format_timestamp(created_at);

        with_db(&state, move |db| {
            let Some(card) = db.get_card_by_code(&code)? else {
                return Ok(None);
            };
            db.insert_message(&NewMessage {
                id: &row_id,
                card_id: &card.id,
                author: &author,
                message: &body,
                gif: gif.as_deref(),
                created_at: &stamp,
            })?;
            Ok(Some(card.code))
        })
        .await?
    };

    let card_code = inserted.ok_or_else(|| ApiError::not_found("Card not found"))?;
    info!("Message {} added to card {}", id, card_code);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: Message {
                id,
                author,
                message: body,
                gif,
                created_at,
            },
        }),
    ))
}
