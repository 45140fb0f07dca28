//! Binary token layout and its URL-safe text form.
//!
//! A token decodes to three contiguous fields, in order:
//!
//! ```text
//! ┌─────────────┬───────────┬──────────────────────────┐
//! │ timestamp   │ nonce     │ sealed payload           │
//! │ 8 bytes     │ 12 bytes  │ ciphertext ‖ 16-byte tag │
//! │ BE u64 ns   │ random    │ variable, >= 16 bytes    │
//! └─────────────┴───────────┴──────────────────────────┘
//! ```
//!
//! The timestamp is stored in the clear but bound into the authentication
//! tag as associated data, so it cannot be altered without invalidating the
//! token. All multi-byte integers are big-endian.

use base64::{Engine as _, engine::general_purpose::URL_SAFE};

use crate::error::TokenError;

/// Size of the issuance timestamp (big-endian u64, nanoseconds since epoch)
pub const TIMESTAMP_LEN: usize = 8;

/// Size of the AEAD nonce (96 bits, NIST recommended size for GCM)
pub const NONCE_LEN: usize = 12;

/// Size of the authentication tag appended to the ciphertext
pub const TAG_LEN: usize = 16;

/// Minimum decoded token length: timestamp + nonce + tag (empty plaintext)
pub const MIN_TOKEN_LEN: usize = TIMESTAMP_LEN + NONCE_LEN + TAG_LEN;

/// A raw token split into its three fields (borrowed, zero-copy).
#[derive(Debug, Clone, Copy)]
pub struct TokenParts<'a> {
    /// The 8-byte issuance timestamp, also the AEAD associated data
    pub timestamp: &'a [u8; TIMESTAMP_LEN],
    /// The 12-byte per-encryption nonce
    pub nonce: &'a [u8; NONCE_LEN],
    /// Ciphertext with the 16-byte tag appended
    pub sealed: &'a [u8],
}

impl<'a> TokenParts<'a> {
    /// Split raw token bytes into fields.
    ///
    /// Pure layout validation; no cryptography happens here. Tokens below
    /// the minimum length are rejected before any decryption is attempted.
    ///
    /// # Errors
    ///
    /// `TokenError::MalformedToken` if `bytes` is shorter than
    /// [`MIN_TOKEN_LEN`].
    pub fn split(bytes: &'a [u8]) -> Result<Self, TokenError> {
        if bytes.len() < MIN_TOKEN_LEN {
            return Err(TokenError::MalformedToken {
                reason: format!("{} bytes, need at least {MIN_TOKEN_LEN}", bytes.len()),
            });
        }

        let Some((timestamp, rest)) = bytes.split_first_chunk::<TIMESTAMP_LEN>() else {
            unreachable!("length checked above");
        };
        let Some((nonce, sealed)) = rest.split_first_chunk::<NONCE_LEN>() else {
            unreachable!("length checked above");
        };

        Ok(Self { timestamp, nonce, sealed })
    }

    /// Issuance time as nanoseconds since the Unix epoch.
    ///
    /// Only meaningful after the token has authenticated: until then these
    /// bytes are attacker-controlled.
    pub fn issued_at_ns(&self) -> u64 {
        u64::from_be_bytes(*self.timestamp)
    }
}

/// Assemble raw token bytes from the three fields.
pub fn assemble(
    timestamp: &[u8; TIMESTAMP_LEN],
    nonce: &[u8; NONCE_LEN],
    sealed: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(TIMESTAMP_LEN + NONCE_LEN + sealed.len());
    bytes.extend_from_slice(timestamp);
    bytes.extend_from_slice(nonce);
    bytes.extend_from_slice(sealed);
    bytes
}

/// Encode raw token bytes as padded URL-safe base64.
pub fn encode_text(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Decode token text from padded URL-safe base64.
///
/// # Errors
///
/// `TokenError::MalformedToken` if the text is not valid base64url.
pub fn decode_text(text: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE
        .decode(text)
        .map_err(|e| TokenError::MalformedToken { reason: format!("not base64url: {e}") })
}

#[cfg(test)]
mod tests {
    use super::{MIN_TOKEN_LEN, NONCE_LEN, TAG_LEN, TIMESTAMP_LEN, TokenParts};
    use crate::error::TokenError;

    #[test]
    fn layout_constants() {
        assert_eq!(TIMESTAMP_LEN, 8);
        assert_eq!(NONCE_LEN, 12);
        assert_eq!(TAG_LEN, 16);
        assert_eq!(MIN_TOKEN_LEN, 36);
    }

    #[test]
    fn split_rejects_short_input() {
        let bytes = [0u8; MIN_TOKEN_LEN - 1];
        let result = TokenParts::split(&bytes);
        assert!(matches!(result, Err(TokenError::MalformedToken { .. })));
    }

    #[test]
    fn split_accepts_minimum_length() {
        let bytes = [0u8; MIN_TOKEN_LEN];
        let parts = TokenParts::split(&bytes).unwrap();
        assert_eq!(parts.sealed.len(), TAG_LEN);
    }

    #[test]
    fn split_field_boundaries() {
        let mut bytes = vec![0u8; MIN_TOKEN_LEN + 4];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&[0x11; TIMESTAMP_LEN]);
        bytes[TIMESTAMP_LEN..TIMESTAMP_LEN + NONCE_LEN].copy_from_slice(&[0x22; NONCE_LEN]);

        let parts = TokenParts::split(&bytes).unwrap();
        assert_eq!(parts.timestamp, &[0x11; TIMESTAMP_LEN]);
        assert_eq!(parts.nonce, &[0x22; NONCE_LEN]);
        assert_eq!(parts.sealed.len(), TAG_LEN + 4);
    }

    #[test]
    fn timestamp_is_big_endian() {
        let mut bytes = vec![0u8; MIN_TOKEN_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&0x0102_0304_0506_0708u64.to_be_bytes());

        let parts = TokenParts::split(&bytes).unwrap();
        assert_eq!(parts.issued_at_ns(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn assemble_then_split_round_trips() {
        let timestamp = [0xAA; TIMESTAMP_LEN];
        let nonce = [0xBB; NONCE_LEN];
        let sealed = [0xCC; TAG_LEN + 3];

        let bytes = super::assemble(&timestamp, &nonce, &sealed);
        assert_eq!(bytes.len(), TIMESTAMP_LEN + NONCE_LEN + sealed.len());

        let parts = TokenParts::split(&bytes).unwrap();
        assert_eq!(parts.timestamp, &timestamp);
        assert_eq!(parts.nonce, &nonce);
        assert_eq!(parts.sealed, &sealed);
    }

    #[test]
    fn text_encoding_is_url_safe_and_padded() {
        // 0xfb 0xff maps into the +/ range in standard base64; URL-safe
        // must use - and _ instead, and keep the trailing padding.
        let encoded = super::encode_text(&[0xfb, 0xff, 0xbf]);
        assert_eq!(encoded, "-_-_");

        let encoded = super::encode_text(&[0xfb]);
        assert!(encoded.ends_with('='));
    }

    #[test]
    fn text_decoding_rejects_invalid_base64() {
        let result = super::decode_text("not!valid!base64!");
        assert!(matches!(result, Err(TokenError::MalformedToken { .. })));
    }
}
