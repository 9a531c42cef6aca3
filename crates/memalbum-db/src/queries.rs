use crate::models::{AlbumCardRow, AlbumRow, CardRow, MessageRow, NewAlbum, NewCard, NewMessage};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, Row};

const CARD_COLUMNS: &str = "id, code, recipient, occasion, custom_message, created_at";
const ALBUM_COLUMNS: &str = "id, code, name, passcode_hash, created_at";

impl Database {
    // -- Cards --

    pub fn card_code_exists(&self, code: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT 1 FROM cards WHERE code = ?1", [code], |row| row.get(0))
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Fails with a UNIQUE violation if `card.code` is already taken;
    /// see [`crate::is_unique_violation`].
    pub fn insert_card(&self, card: &NewCard<'_>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO cards (id, code, recipient, occasion, custom_message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    card.id,
                    card.code,
                    card.recipient,
                    card.occasion,
                    card.custom_message,
                    card.created_at,
                ],
            )?;
            Ok(())
        })
    }

    /// Case-sensitive lookup by shareable code.
    pub fn get_card_by_code(&self, code: &str) -> Result<Option<CardRow>> {
        self.with_conn(|conn| query_card_by_code(conn, code))
    }

    // -- Messages --

    pub fn insert_message(&self, message: &NewMessage<'_>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, card_id, author, message, gif, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    message.id,
                    message.card_id,
                    message.author,
                    message.message,
                    message.gif,
                    message.created_at,
                ],
            )?;
            Ok(())
        })
    }

    /// All messages for a card, newest first.
    pub fn get_messages_for_card(&self, card_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages(conn, card_id))
    }

    // -- Albums --

    pub fn album_code_exists(&self, code: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT 1 FROM albums WHERE code = ?1", [code], |row| row.get(0))
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn insert_album(&self, album: &NewAlbum<'_>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO albums (id, code, name, passcode_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    album.id,
                    album.code,
                    album.name,
                    album.passcode_hash,
                    album.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_album_by_id(&self, id: &str) -> Result<Option<AlbumRow>> {
        self.with_conn(|conn| query_album(conn, "id", id))
    }

    pub fn get_album_by_code(&self, code: &str) -> Result<Option<AlbumRow>> {
        self.with_conn(|conn| query_album(conn, "code", code))
    }

    // -- Album cards --

    /// Link a card to an album, or refresh the existing link.
    ///
    /// A `None` year keeps whatever label the link already has; `added_at`
    /// only applies to a new link. Returns the year stored afterwards.
    pub fn upsert_album_card(
        &self,
        album_id: &str,
        card_id: &str,
        year: Option<i32>,
        added_at: &str,
    ) -> Result<Option<i32>> {
        self.with_conn(|conn| {
            let stored = conn.query_row(
                "INSERT INTO album_cards (album_id, card_id, year, added_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (album_id, card_id)
                 DO UPDATE SET year = COALESCE(excluded.year, album_cards.year)
                 RETURNING year",
                rusqlite::params![album_id, card_id, year, added_at],
                |row| row.get(0),
            )?;
            Ok(stored)
        })
    }

    /// Cards in an album, most recently added first.
    pub fn get_album_cards(&self, album_id: &str) -> Result<Vec<AlbumCardRow>> {
        self.with_conn(|conn| query_album_cards(conn, album_id))
    }

    // -- Stats --

    pub fn count_cards(&self) -> Result<u64> {
        self.with_conn(|conn| count_rows(conn, "cards"))
    }

    pub fn count_messages(&self) -> Result<u64> {
        self.with_conn(|conn| count_rows(conn, "messages"))
    }
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        code: row.get(1)?,
        recipient: row.get(2)?,
        occasion: row.get(3)?,
        custom_message: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn query_card_by_code(conn: &Connection, code: &str) -> Result<Option<CardRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE code = ?1"))?;
    let row = stmt.query_row([code], card_from_row).optional()?;
    Ok(row)
}

fn query_messages(conn: &Connection, card_id: &str) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, card_id, author, message, gif, created_at
         FROM messages
         WHERE card_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([card_id], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                card_id: row.get(1)?,
                author: row.get(2)?,
                message: row.get(3)?,
                gif: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// `column` is always one of our own column names, never user input.
fn query_album(conn: &Connection, column: &str, value: &str) -> Result<Option<AlbumRow>> {
    let mut stmt =
        conn.prepare(&format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE {column} = ?1"))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(AlbumRow {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                passcode_hash: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_album_cards(conn: &Connection, album_id: &str) -> Result<Vec<AlbumCardRow>> {
    // JOIN cards so the listing is a single query
    let mut stmt = conn.prepare(
        "SELECT c.id, c.code, c.recipient, c.occasion, c.created_at, ac.year, ac.added_at
         FROM album_cards ac
         JOIN cards c ON c.id = ac.card_id
         WHERE ac.album_id = ?1
         ORDER BY ac.added_at DESC, ac.rowid DESC",
    )?;

    let rows = stmt
        .query_map([album_id], |row| {
            Ok(AlbumCardRow {
                card_id: row.get(0)?,
                code: row.get(1)?,
                recipient: row.get(2)?,
                occasion: row.get(3)?,
                card_created_at: row.get(4)?,
                year: row.get(5)?,
                added_at: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn count_rows(conn: &Connection, table: &str) -> Result<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
