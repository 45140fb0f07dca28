//! Sealing and opening tokens with AES-256-GCM.
//!
//! The functions here are pure given an [`Environment`]: encoding reads the
//! clock once and draws one nonce, decoding reads the clock once for the TTL
//! check. The `_with` variants take an explicit environment for
//! deterministic testing; the plain variants wire in [`SystemEnv`].

use std::time::Duration;

use aes_gcm::Nonce;
use aes_gcm::aead::{Aead as _, Payload};

use crate::env::{Environment, SystemEnv};
use crate::error::TokenError;
use crate::key::SealKey;
use crate::token::{self, NONCE_LEN, TokenParts};

/// Generate a fresh key, returned in its URL-safe base64 form.
#[must_use]
pub fn generate_key() -> String {
    generate_key_with(&SystemEnv::new())
}

/// Generate a fresh key using the given environment's random source.
#[must_use]
pub fn generate_key_with(env: &impl Environment) -> String {
    SealKey::generate(env).encoded()
}

/// Seal `plaintext` into a token under `key`.
///
/// The token embeds the current wall-clock time (nanoseconds since epoch)
/// as authenticated associated data: visible in the token, tamper-evident,
/// not encrypted. A fresh random nonce makes two encodings of the same
/// plaintext under the same key produce different tokens.
///
/// # Errors
///
/// `TokenError::InvalidKey` if `key` is not valid base64url of exactly
/// 32 bytes.
pub fn encode(plaintext: &str, key: &str) -> Result<String, TokenError> {
    encode_with(&SystemEnv::new(), plaintext, key)
}

/// Seal `plaintext` into a token using the given environment's clock and
/// random source.
pub fn encode_with(
    env: &impl Environment,
    plaintext: &str,
    key: &str,
) -> Result<String, TokenError> {
    let key = SealKey::from_encoded(key)?;

    let timestamp = env.now_unix_ns().to_be_bytes();

    let mut nonce = [0u8; NONCE_LEN];
    env.random_bytes(&mut nonce);

    let payload = Payload { msg: plaintext.as_bytes(), aad: &timestamp };
    let Ok(sealed) = key.cipher().encrypt(Nonce::from_slice(&nonce), payload) else {
        unreachable!("AES-256-GCM encryption cannot fail with a 96-bit nonce and in-memory plaintext");
    };

    Ok(token::encode_text(&token::assemble(&timestamp, &nonce, &sealed)))
}

/// Verify and open a token, enforcing `ttl`.
///
/// Authentication happens before anything else is interpreted: the tag
/// covers the timestamp (as associated data), the ciphertext, and implicitly
/// the nonce. Tag verification is the AEAD primitive's own constant-behavior
/// check; a wrong key and a flipped bit are indistinguishable to the caller.
///
/// A `ttl` of [`Duration::ZERO`] means the token never expires. A token
/// whose timestamp lies in the future (clock skew between issuer and
/// verifier) is not an error; only excess elapsed time expires a token.
///
/// # Errors
///
/// - `TokenError::InvalidKey` if `key` is not valid base64url of exactly
///   32 bytes
/// - `TokenError::MalformedToken` if `token` is not valid base64url or
///   decodes to fewer than 36 bytes
/// - `TokenError::AuthenticationFailed` if the tag does not verify
/// - `TokenError::TokenExpired` if `ttl` is nonzero and exceeded
/// - `TokenError::MalformedPayload` if the authenticated bytes are not
///   valid UTF-8
pub fn decode(token: &str, key: &str, ttl: Duration) -> Result<String, TokenError> {
    decode_with(&SystemEnv::new(), token, key, ttl)
}

/// Verify and open a token using the given environment's clock for the TTL
/// check.
pub fn decode_with(
    env: &impl Environment,
    token: &str,
    key: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    let key = SealKey::from_encoded(key)?;

    let bytes = token::decode_text(token)?;
    let parts = TokenParts::split(&bytes)?;

    let payload = Payload { msg: parts.sealed, aad: parts.timestamp };
    let plaintext =
        key.cipher().decrypt(Nonce::from_slice(parts.nonce), payload).map_err(|_| {
            tracing::debug!(token_len = bytes.len(), "rejecting token: authentication failed");
            TokenError::AuthenticationFailed
        })?;

    // The timestamp is trustworthy from here on: it authenticated as
    // associated data.
    let ttl_ns = ttl.as_nanos();
    if ttl_ns != 0 {
        let age_ns = env.now_unix_ns().saturating_sub(parts.issued_at_ns());
        if u128::from(age_ns) > ttl_ns {
            tracing::debug!(age_ns, ttl_ns = ttl_ns as u64, "rejecting token: expired");
            return Err(TokenError::TokenExpired { age_ns, ttl_ns: ttl_ns as u64 });
        }
    }

    String::from_utf8(plaintext).map_err(|_| TokenError::MalformedPayload)
}
