use anyhow::Result;
use tracing::warn;

use memalbum_crypto::codes::resolve_code;
use memalbum_db::is_unique_violation;

/// Resolve a free code and insert the row that carries it.
///
/// The existence check and the insert are not atomic, so a concurrent writer
/// can take the code in between. The UNIQUE constraint catches that; we then
/// draw a fresh code (dropping any requested one) and insert exactly once
/// more. Returns the code that was stored.
pub fn insert_with_unique_code<E, I>(
    requested: Option<&str>,
    generate: fn() -> String,
    mut taken: E,
    mut insert: I,
) -> Result<String>
where
    E: FnMut(&str) -> Result<bool>,
    I: FnMut(&str) -> Result<()>,
{
    let code = resolve_code(requested, generate, &mut taken)?;
    match insert(&code) {
        Ok(()) => Ok(code),
        Err(e) if is_unique_violation(&e) => {
            warn!("Code {} was taken before insert, retrying with a new one", code);
            let code = resolve_code(None, generate, &mut taken)?;
            insert(&code)?;
            Ok(code)
        }
        Err(e) => Err(e),
    }
}
