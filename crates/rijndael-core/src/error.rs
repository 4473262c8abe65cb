//! Errors raised when constructing or driving a cipher context.

use thiserror::Error;

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Precondition failures. Every operation checks these before touching data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Block width outside {4, 6, 8} words.
    #[error("invalid block size: {0} words (expected 4, 6 or 8)")]
    InvalidBlockSize(usize),
    /// Raw key not 16, 24 or 32 bytes long.
    #[error("invalid key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),
    /// Block buffer does not match the context's block size.
    #[error("block must be {expected} bytes, got {actual}")]
    BlockLength {
        /// Block size of the context.
        expected: usize,
        /// Length of the buffer handed in.
        actual: usize,
    },
}
