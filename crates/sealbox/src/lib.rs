//! Sealbox: self-contained, tamper-evident, time-bounded tokens.
//!
//! A token carries an opaque payload plus its issuance timestamp, sealed
//! with AES-256-GCM under a shared 32-byte key. Anyone holding the key can
//! verify and open the token; nobody else can read or alter it. Verifiers
//! additionally enforce a caller-chosen TTL against the embedded timestamp.
//!
//! # Token format
//!
//! ```text
//! plaintext (UTF-8)
//!        │
//!        ▼ AES-256-GCM seal
//!        │   nonce = 12 random bytes
//!        │   associated data = issuance time (8-byte BE u64, ns since epoch)
//!        ▼
//! timestamp ‖ nonce ‖ ciphertext ‖ tag
//!        │
//!        ▼ URL-safe base64 (padded)
//! opaque token string
//! ```
//!
//! The timestamp rides in the clear but is bound into the authentication
//! tag as associated data, so it cannot be altered without invalidating the
//! token. Nothing else about the token is inspectable without the key.
//!
//! # Security
//!
//! Authenticity:
//! - AES-256-GCM tag covers ciphertext, nonce, and timestamp
//! - Any single-bit change anywhere in the token fails verification
//! - Wrong-key attempts are indistinguishable from tampering
//!
//! Confidentiality:
//! - Fresh 96-bit random nonce per encryption; identical plaintexts
//!   produce unrelated tokens
//! - Nonces come from OS cryptographic entropy, never reused by counter
//!
//! Freshness:
//! - Issuance time is authenticated metadata; TTL enforcement happens only
//!   after the tag verifies
//! - TTL is supplied per decode call, so different verifiers can apply
//!   different freshness policies to the same token
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! let key = sealbox::generate_key();
//! let token = sealbox::encode("hello world", &key)?;
//!
//! // Duration::ZERO means "never expires"
//! let plaintext = sealbox::decode(&token, &key, Duration::ZERO)?;
//! assert_eq!(plaintext, "hello world");
//! # Ok::<(), sealbox::TokenError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod key;
pub mod seal;
pub mod token;

pub use env::{Environment, SystemEnv};
pub use error::TokenError;
pub use key::{KEY_LEN, SealKey};
pub use seal::{decode, decode_with, encode, encode_with, generate_key, generate_key_with};
pub use token::{MIN_TOKEN_LEN, NONCE_LEN, TAG_LEN, TIMESTAMP_LEN, TokenParts};
