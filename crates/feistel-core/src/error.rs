//! Error type for the cipher.

use thiserror::Error;

/// Errors produced by key derivation and block processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeistelError {
    /// Input to `encrypt`/`decrypt` is not exactly one block long.
    #[error("block must be {expected} bytes, got {actual}")]
    InvalidBlockSize {
        /// Required block length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// The key derivation primitive rejected the secret.
    #[error("secret rejected by key derivation: {0}")]
    InvalidSecret(String),
}
