//! Conversions from store rows to wire models.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use tracing::warn;
use uuid::Uuid;

use memalbum_db::models::{AlbumCardRow, AlbumRow, CardRow, MessageRow};
use memalbum_types::models::{Album, AlbumCardEntry, Card, Message};

/// Current time at the precision we persist.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str, owner: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand in sqlite3 tend to use "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on '{}': {}", raw, owner, e);
            DateTime::default()
        })
}

pub(crate) fn parse_id(raw: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt id '{}': {}", raw, e);
        Uuid::default()
    })
}

pub(crate) fn card(row: CardRow) -> Card {
    Card {
        id: parse_id(&row.id),
        created_at: parse_timestamp(&row.created_at, &row.id),
        code: row.code,
        recipient: row.recipient,
        occasion: row.occasion,
        custom_message: row.custom_message,
    }
}

pub(crate) fn message(row: MessageRow) -> Message {
    Message {
        id: parse_id(&row.id),
        created_at: parse_timestamp(&row.created_at, &row.id),
        author: row.author,
        message: row.message,
        gif: row.gif,
    }
}

pub(crate) fn album(row: &AlbumRow) -> Album {
    Album {
        id: parse_id(&row.id),
        code: row.code.clone(),
        name: row.name.clone(),
        created_at: parse_timestamp(&row.created_at, &row.id),
    }
}

pub(crate) fn album_card(row: AlbumCardRow) -> AlbumCardEntry {
    AlbumCardEntry {
        card_id: parse_id(&row.card_id),
        created_at: parse_timestamp(&row.card_created_at, &row.card_id),
        added_at: parse_timestamp(&row.added_at, &row.card_id),
        code: row.code,
        recipient: row.recipient,
        occasion: row.occasion,
        year: row.year,
    }
}
