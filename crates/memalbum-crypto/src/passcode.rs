use anyhow::{Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Shortest passcode accepted when creating an album.
pub const MIN_PASSCODE_LEN: usize = 4;

/// Hash a passcode with Argon2id and a fresh random salt.
/// Returns the PHC string to persist.
pub fn hash_passcode(passcode: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(passcode.as_bytes(), &salt)
        .map_err(|e| anyhow!("Passcode hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// Check a candidate passcode against a stored PHC hash.
///
/// Malformed or empty hashes count as a mismatch.
pub fn verify_passcode(candidate: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
