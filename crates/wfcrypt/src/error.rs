//! Codec errors and their numeric status codes.

use thiserror::Error;

/// Result alias for the codec.
pub type Result<T> = core::result::Result<T, Error>;

/// Status codes reported through an [`ErrorSink`](crate::ErrorSink).
///
/// The numeric values are part of the interface and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// Operation completed.
    Success = 0,
    /// Input buffer (data or IV) cannot be read as requested.
    InvalidMemoryRead = 0x2400_0001,
    /// Block size parameter outside {4, 6, 8}.
    WrongNb = 0x2440_0002,
    /// Key size parameter outside {4, 6, 8}.
    WrongNk = 0x2440_0004,
    /// Key buffer does not hold `4 * Nk` bytes.
    WrongKeyLength = 0x2440_0008,
    /// Output buffer cannot hold the result.
    InvalidMemoryWrite = 0x2400_0010,
}

impl ErrorCode {
    /// Raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.value()
    }
}

/// Failures of a CBC call. All are detected before any data is modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// `Nb` is not 4, 6 or 8.
    #[error("block size must be 4, 6 or 8 words, got {0}")]
    WrongBlockSize(i32),
    /// `Nk` is not 4, 6 or 8.
    #[error("key size must be 4, 6 or 8 words, got {0}")]
    WrongKeyWords(i32),
    /// The key buffer disagrees with `Nk`.
    #[error("key must be {expected} bytes, got {actual}")]
    WrongKeyLength {
        /// `4 * Nk`.
        expected: usize,
        /// Length of the supplied key.
        actual: usize,
    },
    /// Empty buffer, or one that is not a whole number of blocks.
    #[error("data length {len} is not a positive multiple of the {block} byte block")]
    InvalidLength {
        /// Length of the data buffer.
        len: usize,
        /// Block size in bytes.
        block: usize,
    },
    /// Caller-supplied IV is shorter than one block.
    #[error("initialization vector must be at least {expected} bytes, got {actual}")]
    InvalidIv {
        /// Block size in bytes.
        expected: usize,
        /// Length of the supplied IV.
        actual: usize,
    },
    /// IV output buffer is shorter than one block.
    #[error("IV output buffer must be at least {expected} bytes, got {actual}")]
    IvBufferTooSmall {
        /// Block size in bytes.
        expected: usize,
        /// Length of the output buffer.
        actual: usize,
    },
    /// Rejected by the block cipher itself.
    #[error(transparent)]
    Cipher(#[from] rijndael_core::Error),
}

impl Error {
    /// Status code reported to the error sink for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::WrongBlockSize(_) => ErrorCode::WrongNb,
            Error::WrongKeyWords(_) => ErrorCode::WrongNk,
            Error::WrongKeyLength { .. } => ErrorCode::WrongKeyLength,
            Error::InvalidLength { .. } | Error::InvalidIv { .. } => ErrorCode::InvalidMemoryRead,
            Error::IvBufferTooSmall { .. } => ErrorCode::InvalidMemoryWrite,
            Error::Cipher(inner) => match inner {
                rijndael_core::Error::InvalidBlockSize(_) => ErrorCode::WrongNb,
                rijndael_core::Error::InvalidKeyLength(_) => ErrorCode::WrongKeyLength,
                rijndael_core::Error::BlockLength { .. } => ErrorCode::InvalidMemoryRead,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_their_wire_values() {
        assert_eq!(ErrorCode::Success.value(), 0);
        assert_eq!(ErrorCode::InvalidMemoryRead.value(), 0x2400_0001);
        assert_eq!(ErrorCode::WrongNb.value(), 0x2440_0002);
        assert_eq!(ErrorCode::WrongNk.value(), 0x2440_0004);
        assert_eq!(ErrorCode::WrongKeyLength.value(), 0x2440_0008);
        assert_eq!(u32::from(ErrorCode::InvalidMemoryWrite), 0x2400_0010);
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(Error::WrongBlockSize(5).code(), ErrorCode::WrongNb);
        assert_eq!(Error::WrongKeyWords(7).code(), ErrorCode::WrongNk);
        assert_eq!(
            Error::InvalidLength { len: 17, block: 16 }.code(),
            ErrorCode::InvalidMemoryRead
        );
        assert_eq!(
            Error::from(rijndael_core::Error::InvalidKeyLength(20)).code(),
            ErrorCode::WrongKeyLength
        );
    }

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            Error::InvalidLength { len: 17, block: 16 }.to_string(),
            "data length 17 is not a positive multiple of the 16 byte block"
        );
        assert_eq!(
            Error::WrongBlockSize(5).to_string(),
            "block size must be 4, 6 or 8 words, got 5"
        );
    }
}
