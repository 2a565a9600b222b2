//! API token formatting and hashing.
//!
//! A raw token is `pn_<64 hex chars>`; only its sha256 digest is stored, so a
//! token is shown exactly once, at minting time.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "pn";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[must_use]
pub fn generate_api_token_secret() -> [u8; API_TOKEN_SECRET_BYTES] {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    secret
}

#[must_use]
pub fn format_api_token(secret: &[u8; API_TOKEN_SECRET_BYTES]) -> String {
    format!("{API_TOKEN_PREFIX}_{}", encode_hex(secret))
}

/// Digest stored in `api_tokens.token_hash` and looked up on every request.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    encode_hex(&digest)
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}
