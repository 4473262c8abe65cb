//! CBC-mode encryption over variable block size Rijndael.
//!
//! [`CbcCodec`] is the typed interface. The [`api`] module exposes the
//! flag-returning `encrypt`/`decrypt` pair that reports status codes through
//! an [`ErrorSink`], by default a per-thread last-error slot.
//!
//! Buffers are processed in place and must hold a non-zero whole number of
//! blocks. Each encryption draws a fresh IV of `Nb` little-endian random
//! words; the IV travels next to the ciphertext and is required to decrypt.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod api;
mod codec;
mod error;
mod sink;

pub use crate::api::{decrypt, encrypt};
pub use crate::codec::{decrypt_buffer, encrypt_buffer, CbcCodec, Params};
pub use crate::error::{Error, ErrorCode, Result};
pub use crate::sink::{last_error, set_last_error, ErrorSink, LastError};
pub use rijndael_core::{BlockSize, KeyLength, Rijndael};
