/// Memory Album crypto helpers
///
/// - Shareable code generation with collision retries
/// - Argon2id passcode hashing for albums

pub mod codes;
pub mod passcode;
