use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use memalbum_crypto::codes::generate_album_code;
use memalbum_crypto::passcode::{MIN_PASSCODE_LEN, hash_passcode};
use memalbum_db::models::{AlbumRow, NewAlbum};
use memalbum_types::api::{
    AddCardRequest, AddCardResponse, AddedCard, AlbumResponse, AlbumViewResponse,
    CreateAlbumRequest, PasscodeParams, ViewAlbumRequest,
};
use memalbum_types::models::Album;

use crate::auth::{AlbumKey, AppState, unlock_album};
use crate::codes::insert_with_unique_code;
use crate::error::ApiError;
use crate::{blocking, clean, clip, rows, with_db};

const MAX_NAME_LEN: usize = 120;

/// POST /api/albums/create: create a passcode-protected album.
pub async fn create_album(
    State(state): State<AppState>,
    payload: Result<Json<CreateAlbumRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let name = clean(req.name)
        .map(|n| clip(n, MAX_NAME_LEN))
        .ok_or_else(|| ApiError::bad_request("Name is required"))?;
    let passcode = clean(req.passcode)
        .filter(|p| p.chars().count() >= MIN_PASSCODE_LEN)
        .ok_or_else(|| {
            ApiError::bad_request(format!("Passcode must be at least {} chars", MIN_PASSCODE_LEN))
        })?;
    let requested = clean(req.code).map(|c| c.to_ascii_uppercase());

    let passcode_hash = blocking(move || hash_passcode(&passcode)).await?;

    let id = Uuid::new_v4();
    let created_at = rows::now();

    let code = {
        let row_id = id.to_string();
        let name = name.clone();
        let stamp = rows::format_timestamp(created_at);

        with_db(&state, move |db| {
            insert_with_unique_code(
                requested.as_deref(),
                generate_album_code,
                |code| db.album_code_exists(code),
                |code| {
                    db.insert_album(&NewAlbum {
                        id: &row_id,
                        code,
                        name: &name,
                        passcode_hash: &passcode_hash,
                        created_at: &stamp,
                    })
                },
            )
        })
        .await?
    };

    info!("Album {} ({}) created", id, code);

    Ok((
        StatusCode::CREATED,
        Json(AlbumResponse {
            album: Album {
                id,
                code,
                name,
                created_at,
            },
        }),
    ))
}

/// POST /api/albums/add-card: link a card to an album, upserting the link.
pub async fn add_card(
    State(state): State<AppState>,
    payload: Result<Json<AddCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let (Some(album_id), Some(passcode), Some(card_code)) =
        (clean(req.album_id), clean(req.passcode), clean(req.card_code))
    else {
        return Err(ApiError::bad_request(
            "albumId, passcode, and cardCode are required",
        ));
    };

    let album = unlock_album(&state, AlbumKey::IdOrCode(album_id), passcode).await?;

    let year = req.year;
    let added_at = rows::format_timestamp(rows::now());
    let album_row_id = album.id.clone();

    let linked = with_db(&state, move |db| {
        let Some(card) = db.get_card_by_code(&card_code)? else {
            return Ok(None);
        };
        let stored_year = db.upsert_album_card(&album_row_id, &card.id, year, &added_at)?;
        Ok(Some((card.code, stored_year)))
    })
    .await?;

    let (card_code, year) = linked.ok_or_else(|| ApiError::not_found("Card not found"))?;
    info!("Card {} linked to album {}", card_code, album.id);

    Ok((
        StatusCode::CREATED,
        Json(AddCardResponse {
            added: AddedCard {
                album_id: rows::parse_id(&album.id),
                card_code,
                year,
            },
        }),
    ))
}

/// POST /api/album: open an album by its shareable code.
pub async fn view_album(
    State(state): State<AppState>,
    payload: Result<Json<ViewAlbumRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let (Some(album_code), Some(passcode)) = (clean(req.album_code), clean(req.passcode)) else {
        return Err(ApiError::bad_request("albumCode and passcode are required"));
    };

    let album = unlock_album(&state, AlbumKey::Code(album_code), passcode).await?;
    album_view(&state, album).await
}

/// GET /api/albums/{id}/cards?passcode=: id or code, passcode in the query.
pub async fn album_cards(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<PasscodeParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let passcode = query.ok().and_then(|Query(q)| q.passcode);
    open_album_cards(&state, id, passcode).await
}

/// POST /api/albums/{id}/cards: same as the GET, passcode in the body.
/// An unreadable body counts as a missing passcode.
pub async fn album_cards_with_body(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<PasscodeParams>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let passcode = payload.ok().and_then(|Json(p)| p.passcode);
    open_album_cards(&state, id, passcode).await
}

async fn open_album_cards(
    state: &AppState,
    id_or_code: String,
    passcode: Option<String>,
) -> Result<Json<AlbumViewResponse>, ApiError> {
    let passcode = clean(passcode).ok_or_else(|| ApiError::bad_request("Passcode required"))?;
    let id_or_code = clean(Some(id_or_code)).ok_or_else(|| ApiError::not_found("Album not found"))?;

    let album = unlock_album(state, AlbumKey::IdOrCode(id_or_code), passcode).await?;
    album_view(state, album).await
}

async fn album_view(state: &AppState, album: AlbumRow) -> Result<Json<AlbumViewResponse>, ApiError> {
    let album_id = album.id.clone();
    let cards = with_db(state, move |db| db.get_album_cards(&album_id)).await?;

    Ok(Json(AlbumViewResponse {
        album: rows::album(&album),
        cards: cards.into_iter().map(rows::album_card).collect(),
    }))
}
