pub mod albums;
pub mod auth;
pub mod cards;
pub mod codes;
pub mod error;
pub mod messages;
pub mod stats;

mod rows;

use axum::{
    Router,
    routing::{get, post},
};
use memalbum_db::Database;

pub use auth::{AppState, AppStateInner};
pub use error::ApiError;

/// All JSON routes. The binary adds CORS and tracing layers on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/cards/new", post(cards::create_card))
        .route("/api/cards/{code}/exists", get(cards::card_exists))
        .route("/api/cards/{code}/messages", get(cards::card_messages))
        .route("/api/cards/{code}/messages/send", post(messages::send_message))
        .route("/api/albums/create", post(albums::create_album))
        .route("/api/albums/add-card", post(albums::add_card))
        .route(
            "/api/albums/{id}/cards",
            get(albums::album_cards).post(albums::album_cards_with_body),
        )
        .route("/api/album", post(albums::view_album))
        .route("/api/stats", get(stats::stats))
        .route("/health", get(stats::health))
        .with_state(state)
}

/// Run blocking work (SQLite, Argon2) off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))?
        .map_err(ApiError::Internal)
}

pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    blocking(move || f(&state.db)).await
}

/// Trim an optional input field; blank counts as missing.
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Cut `value` to at most `max` characters.
pub(crate) fn clip(mut value: String, max: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max) {
        value.truncate(idx);
    }
    value
}
