//! Short code candidate generation.
//!
//! Codes are content-derived: the SHA-256 digest of the URL, hex-encoded and
//! truncated to [`CODE_LENGTH`] characters. The same URL therefore yields the
//! same first candidate on every call. Retries after a collision mix a salt
//! into the digest.

use sha2::{Digest, Sha256};

/// Number of hex characters in a short code (48 bits).
pub const CODE_LENGTH: usize = 12;

/// Produces candidate short codes for a URL.
///
/// `salt` is `0` for the first candidate and increases by one for every
/// collision the allocator has to step over.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, original_url: &str, salt: u32) -> String;
}

/// SHA-256 based generator used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashCodeGenerator;

impl CodeGenerator for HashCodeGenerator {
    fn generate(&self, original_url: &str, salt: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(original_url.as_bytes());
        if salt > 0 {
            hasher.update(b"#");
            hasher.update(salt.to_be_bytes());
        }

        let mut code = hex::encode(hasher.finalize());
        code.truncate(CODE_LENGTH);
        code
    }
}

/// Returns true if `code` has the shape of a generated short code.
///
/// Lets the redirect path answer 404 for paths like `favicon.ico` without a
/// database round-trip.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
