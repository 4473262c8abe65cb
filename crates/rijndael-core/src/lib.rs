//! Variable block size Rijndael, the cipher AES was standardised from.
//!
//! This crate provides:
//! - Block widths of 128, 192 and 256 bits (`Nb` = 4, 6, 8).
//! - Keys of 128, 192 and 256 bits (`Nk` = 4, 6, 8).
//! - The key schedule, single-block encryption and decryption, and the
//!   round transforms they are built from.
//!
//! With `Nb = 4` the output is plain AES (FIPS-197). The implementation is
//! table-driven and makes no constant-time guarantees; it should not be
//! treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
pub mod round;
pub mod sbox;

pub use crate::block::{
    round_count, xor_in_place, BlockSize, KeyLength, MAX_BLOCK_BYTES, MAX_EXPANDED_KEY_BYTES,
};
pub use crate::cipher::Rijndael;
pub use crate::error::{Error, Result};
pub use crate::key::RoundKeys;
