use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE cards (
                id              TEXT PRIMARY KEY,
                code            TEXT NOT NULL UNIQUE,
                recipient       TEXT NOT NULL,
                occasion        TEXT NOT NULL,
                custom_message  TEXT,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE messages (
                id          TEXT PRIMARY KEY,
                card_id     TEXT NOT NULL REFERENCES cards(id),
                author      TEXT NOT NULL DEFAULT 'Anon',
                message     TEXT NOT NULL,
                gif         TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_messages_card
                ON messages(card_id, created_at);

            CREATE TABLE albums (
                id              TEXT PRIMARY KEY,
                code            TEXT NOT NULL UNIQUE,
                name            TEXT NOT NULL,
                passcode_hash   TEXT NOT NULL,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE album_cards (
                album_id    TEXT NOT NULL REFERENCES albums(id),
                card_id     TEXT NOT NULL REFERENCES cards(id),
                year        INTEGER,
                added_at    TEXT NOT NULL,
                PRIMARY KEY (album_id, card_id)
            );

            CREATE INDEX idx_album_cards_added
                ON album_cards(album_id, added_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
