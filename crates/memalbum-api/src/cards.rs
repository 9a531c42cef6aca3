use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use memalbum_crypto::codes::generate_card_code;
use memalbum_db::models::NewCard;
use memalbum_types::api::{CardExistsResponse, CardMessagesResponse, CardResponse, CreateCardRequest};
use memalbum_types::models::Card;

use crate::auth::AppState;
use crate::codes::insert_with_unique_code;
use crate::error::ApiError;
use crate::{clean, clip, rows, with_db};

pub const DEFAULT_RECIPIENT: &str = "Someone special";
pub const DEFAULT_OCCASION: &str = "Other";

const MAX_RECIPIENT_LEN: usize = 120;
const MAX_OCCASION_LEN: usize = 120;
const MAX_CUSTOM_MESSAGE_LEN: usize = 500;

/// POST /api/cards/new: create a card, honouring a requested code when free.
pub async fn create_card(
    State(state): State<AppState>,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let recipient = clip(
        clean(req.recipient).unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
        MAX_RECIPIENT_LEN,
    );
    let occasion = clip(
        clean(req.occasion).unwrap_or_else(|| DEFAULT_OCCASION.to_string()),
        MAX_OCCASION_LEN,
    );
    let custom_message = clean(req.custom_message).map(|m| clip(m, MAX_CUSTOM_MESSAGE_LEN));
    let requested = clean(req.code);

    let id = Uuid::new_v4();
    let created_at = rows::now();

    let card = {
        let recipient = recipient.clone();
        let occasion = occasion.clone();
        let custom_message = custom_message.clone();
        let stamp = rows::format_timestamp(created_at);
        let row_id = id.to_string();

        with_db(&state, move |db| {
            insert_with_unique_code(
                requested.as_deref(),
                generate_card_code,
                |code| db.card_code_exists(code),
                |code| {
                    db.insert_card(&NewCard {
                        id: &row_id,
                        code,
                        recipient: &recipient,
                        occasion: &occasion,
                        custom_message: custom_message.as_deref(),
                        created_at: &stamp,
                    })
                },
            )
        })
        .await?
    };

    info!("Card {} created for {}", card, recipient);

    Ok((
        StatusCode::CREATED,
        Json(CardResponse {
            card: Card {
                id,
                code: card,
                recipient,
                occasion,
                custom_message,
                created_at,
            },
        }),
    ))
}

/// GET /api/cards/{code}/exists: case-sensitive existence check.
pub async fn card_exists(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(code) = path?;
    let code = clean(Some(code)).ok_or_else(|| ApiError::bad_request("Missing code"))?;

    let lookup = code.clone();
    let exists = with_db(&state, move |db| db.card_code_exists(&lookup)).await?;

    if !exists {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(CardExistsResponse {
                exists: false,
                code: None,
            }),
        )
            .into_response());
    }

    Ok(Json(CardExistsResponse {
        exists: true,
        code: Some(code),
    })
    .into_response())
}

/// GET /api/cards/{code}/messages: the card plus its messages, newest first.
pub async fn card_messages(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(code) = path?;
    let code = clean(Some(code)).ok_or_else(|| ApiError::bad_request("Missing code"))?;

    let found = with_db(&state, move |db| {
        let Some(card) = db.get_card_by_code(&code)? else {
            return Ok(None);
        };
        let messages = db.get_messages_for_card(&card.id)?;
        Ok(Some((card, messages)))
    })
    .await?;

    let (card, messages) = found.ok_or_else(|| ApiError::not_found("Card not found"))?;

    Ok(Json(CardMessagesResponse {
        card: rows::card(card),
        messages: messages.into_iter().map(rows::message).collect(),
    }))
}
