/// Database row types: these map directly to SQLite rows.
/// Distinct from memalbum-types API models to keep the DB layer independent.

pub struct CardRow {
    pub id: String,
    pub code: String,
    pub recipient: String,
    pub occasion: String,
    pub custom_message: Option<String>,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub card_id: String,
    pub author: String,
    pub message: String,
    pub gif: Option<String>,
    pub created_at: String,
}

pub struct AlbumRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub passcode_hash: String,
    pub created_at: String,
}

/// One card inside an album, joined with its link metadata.
pub struct AlbumCardRow {
    pub card_id: String,
    pub code: String,
    pub recipient: String,
    pub occasion: String,
    pub card_created_at: String,
    pub year: Option<i32>,
    pub added_at: String,
}

/// Input for a new card. Timestamps are generated by the caller.
pub struct NewCard<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub recipient: &'a str,
    pub occasion: &'a str,
    pub custom_message: Option<&'a str>,
    pub created_at: &'a str,
}

pub struct NewMessage<'a> {
    pub id: &'a str,
    pub card_id: &'a str,
    pub author: &'a str,
    pub message: &'a str,
    pub gif: Option<&'a str>,
    pub created_at: &'a str,
}

pub struct NewAlbum<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub name: &'a str,
    pub passcode_hash: &'a str,
    pub created_at: &'a str,
}
