use anyhow::Result;
use tracing::warn;

/// Length of a shareable card or album code.
pub const CODE_LEN: usize = 6;

/// Existence checks made before settling on a code.
pub const MAX_ATTEMPTS: usize = 5;

/// Random 6-character lowercase hex code for a card.
pub fn generate_card_code() -> String {
    let bytes: [u8; 4] = rand::random();
    let mut code = hex::encode(bytes);
    code.truncate(CODE_LEN);
    code
}

/// Album codes are upper case so lookups can normalise user input.
pub fn generate_album_code() -> String {
    generate_card_code().to_ascii_uppercase()
}

/// Pick a code that is not yet taken according to `taken`.
///
/// A caller-supplied `requested` code is tried first. Each collision draws a
/// fresh code from `generate`, up to [`MAX_ATTEMPTS`] checks; after that the
/// last candidate is returned unchecked and the store's unique constraint has
/// the final say.
pub fn resolve_code<F>(requested: Option<&str>, generate: fn() -> String, mut taken: F) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    let mut code = match requested {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => generate(),
    };

    for _ in 0..MAX_ATTEMPTS {
        if !taken(&code)? {
            return Ok(code);
        }
        code = generate();
    }

    warn!("Code still colliding after {} attempts, using {}", MAX_ATTEMPTS, code);
    Ok(code)
}
