//! Error types for token operations

use thiserror::Error;

/// Errors from key handling, token encoding, and token decoding.
///
/// Every failure a caller can observe is one of these variants; nothing is
/// retried internally and nothing degrades to a default value.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Key text is not valid URL-safe base64, or does not decode to exactly
    /// 32 bytes
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// What was wrong with the supplied key
        reason: String,
    },

    /// Token text is not valid URL-safe base64, or decodes to fewer bytes
    /// than the fixed layout requires
    #[error("malformed token: {reason}")]
    MalformedToken {
        /// What was wrong with the supplied token
        reason: String,
    },

    /// The authentication tag did not verify.
    ///
    /// Covers a wrong key and any bit-level tampering of the timestamp,
    /// nonce, ciphertext, or tag. Deliberately carries no detail about
    /// which region failed.
    #[error("token authentication failed")]
    AuthenticationFailed,

    /// Authentication succeeded but the token's age exceeds the TTL
    #[error("token expired: age {age_ns}ns exceeds ttl {ttl_ns}ns")]
    TokenExpired {
        /// Nanoseconds elapsed since the token was issued
        age_ns: u64,
        /// The caller-supplied TTL in nanoseconds
        ttl_ns: u64,
    },

    /// Authenticated plaintext bytes are not valid UTF-8.
    ///
    /// Cannot occur for tokens sealed by this crate; checked because the
    /// byte stream is attacker-influenced up to the authentication boundary.
    #[error("token payload is not valid UTF-8")]
    MalformedPayload,
}

impl TokenError {
    /// Returns true if this error indicates a forged, corrupted, or
    /// otherwise hostile input.
    ///
    /// Suspicious failures warrant rejection and logging. `TokenExpired` is
    /// the one benign failure: the token was genuine, it just aged out, and
    /// the right caller response is re-issuance.
    pub fn is_suspicious(&self) -> bool {
        match self {
            Self::InvalidKey { .. }
            | Self::MalformedToken { .. }
            | Self::AuthenticationFailed
            | Self::MalformedPayload => true,

            Self::TokenExpired { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenError;

    #[test]
    fn authentication_failure_is_suspicious() {
        assert!(TokenError::AuthenticationFailed.is_suspicious());
    }

    #[test]
    fn expiry_is_not_suspicious() {
        let err = TokenError::TokenExpired { age_ns: 10, ttl_ns: 5 };
        assert!(!err.is_suspicious());
    }

    #[test]
    fn authentication_failure_display_is_opaque() {
        // No byte offsets, no region names, nothing an attacker can use
        // to localize a tag mismatch.
        assert_eq!(TokenError::AuthenticationFailed.to_string(), "token authentication failed");
    }

    #[test]
    fn error_display() {
        let err = TokenError::TokenExpired { age_ns: 100, ttl_ns: 50 };
        assert_eq!(err.to_string(), "token expired: age 100ns exceeds ttl 50ns");
    }
}
