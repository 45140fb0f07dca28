//! The 32-byte symmetric key and its URL-safe external form.

use aes_gcm::{Aes256Gcm, KeyInit as _};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use zeroize::Zeroize;

use crate::env::Environment;
use crate::error::TokenError;

/// Size of the raw symmetric key (AES-256)
pub const KEY_LEN: usize = 32;

/// A 32-byte symmetric key for sealing and opening tokens.
///
/// Externally the key is a padded URL-safe base64 string, safe to carry in
/// configuration or environment variables; internally it is exactly 32 raw
/// bytes. Any other decoded length is rejected outright rather than handed
/// to the cipher.
///
/// # Security
///
/// - Key bytes are zeroized when the key is dropped
/// - The raw bytes are never exposed; only the encoded form is readable
/// - No `Debug` implementation, so the key cannot leak through logging
#[derive(Clone)]
pub struct SealKey {
    bytes: [u8; KEY_LEN],
}

impl SealKey {
    /// Generate a fresh key from the environment's random source.
    #[must_use]
    pub fn generate(env: &impl Environment) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        env.random_bytes(&mut bytes);
        Self { bytes }
    }

    /// Parse a key from its padded URL-safe base64 form.
    ///
    /// # Errors
    ///
    /// `TokenError::InvalidKey` if the text is not valid base64url or does
    /// not decode to exactly 32 bytes.
    pub fn from_encoded(text: &str) -> Result<Self, TokenError> {
        let mut decoded = URL_SAFE
            .decode(text)
            .map_err(|e| TokenError::InvalidKey { reason: format!("not base64url: {e}") })?;

        if decoded.len() != KEY_LEN {
            let actual = decoded.len();
            decoded.zeroize();
            return Err(TokenError::InvalidKey {
                reason: format!("decodes to {actual} bytes, need exactly {KEY_LEN}"),
            });
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();

        Ok(Self { bytes })
    }

    /// The key's padded URL-safe base64 external form.
    #[must_use]
    pub fn encoded(&self) -> String {
        URL_SAFE.encode(self.bytes)
    }

    /// Build the AES-256-GCM cipher for this key.
    ///
    /// Shared by the seal and open paths; the key length has already been
    /// validated so cipher construction cannot fail.
    pub(crate) fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new((&self.bytes).into())
    }
}

// Zeroize key material on drop
impl Drop for SealKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
