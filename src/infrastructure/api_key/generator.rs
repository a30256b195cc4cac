//! API key token generation
//!
//! Tokens are `<type prefix><base64url random bytes>`. Only a SHA-256 hash
//! is stored; the display prefix (type prefix plus 8 random characters)
//! identifies a key in listings without revealing it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random characters kept in the display prefix
const DISPLAY_CHARS: usize = 8;

/// A freshly generated token
#[derive(Debug, Clone)]
pub struct GeneratedApiKey {
    /// Full token, shown once
    pub token: String,
    /// Display prefix
    pub prefix: String,
    /// Hash kept in storage
    pub hash: String,
}

#[derive(Debug, Clone)]
pub struct ApiKeyGenerator {
    prefix: String,
    key_bytes: usize,
}

impl ApiKeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            key_bytes: 32,
        }
    }

    /// Generator for production keys (`nrv_live_`)
    pub fn live() -> Self {
        Self::new("nrv_live_")
    }

    pub fn generate(&self) -> GeneratedApiKey {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        self.from_secret(&URL_SAFE_NO_PAD.encode(&random_bytes))
    }

    /// Build a token from a known secret, for seeding and tests
    pub fn from_secret(&self, secret: &str) -> GeneratedApiKey {
        let token = format!("{}{}", self.prefix, secret);
        let display = &secret[..DISPLAY_CHARS.min(secret.len())];

        GeneratedApiKey {
            prefix: format!("{}{}", self.prefix, display),
            hash: hash_token(&token),
            token,
        }
    }
}

impl Default for ApiKeyGenerator {
    fn default() -> Self {
        Self::live()
    }
}

/// Hash a full token for storage and lookup
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("sha256${}", URL_SAFE_NO_PAD.encode(digest))
}

/// Compare two hashes without early exit
pub fn hashes_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
