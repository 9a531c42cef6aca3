use std::sync::Arc;

use tracing::warn;

use memalbum_crypto::passcode::verify_passcode;
use memalbum_db::Database;
use memalbum_db::models::AlbumRow;

use crate::error::ApiError;
use crate::{blocking, with_db};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        Arc::new(Self { db })
    }
}

/// How a request names an album.
pub enum AlbumKey {
    /// Internal id first, then the upper-cased shareable code.
    IdOrCode(String),
    /// Shareable code only, upper-cased before lookup.
    Code(String),
}

/// Find an album and check its passcode.
///
/// Missing albums are reported before wrong passcodes. A mismatch never says
/// which half was wrong.
pub async fn unlock_album(
    state: &AppState,
    key: AlbumKey,
    passcode: String,
) -> Result<AlbumRow, ApiError> {
    let album = with_db(state, move |db| match key {
        AlbumKey::IdOrCode(value) => match db.get_album_by_id(&value)? {
            Some(album) => Ok(Some(album)),
            None => db.get_album_by_code(&value.to_ascii_uppercase()),
        },
        AlbumKey::Code(code) => db.get_album_by_code(&code.to_ascii_uppercase()),
    })
    .await?
    .ok_or_else(|| ApiError::not_found("Album not found"))?;

    let hash = album.passcode_hash.clone();
    let valid = blocking(move || Ok(verify_passcode(&passcode, &hash))).await?;
    if !valid {
        warn!("Rejected passcode for album {}", album.id);
        return Err(ApiError::Unauthorized);
    }

    Ok(album)
}
