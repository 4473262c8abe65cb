//! Block and key geometry.

use crate::error::{Error, Result};

/// Largest block handled by the cipher (Nb = 8).
pub const MAX_BLOCK_BYTES: usize = 32;

/// Largest expanded key: `4 * 8 * (14 + 1)` bytes.
pub const MAX_EXPANDED_KEY_BYTES: usize = 480;

/// Block width in 32-bit words (Nb).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockSize {
    /// 128-bit blocks (Nb = 4), plain AES.
    #[default]
    Nb4,
    /// 192-bit blocks (Nb = 6).
    Nb6,
    /// 256-bit blocks (Nb = 8).
    Nb8,
}

impl BlockSize {
    /// All supported block sizes, smallest first.
    pub const ALL: [BlockSize; 3] = [BlockSize::Nb4, BlockSize::Nb6, BlockSize::Nb8];

    /// Parses a word count, rejecting anything outside {4, 6, 8}.
    pub fn from_words(words: usize) -> Result<Self> {
        match words {
            4 => Ok(Self::Nb4),
            6 => Ok(Self::Nb6),
            8 => Ok(Self::Nb8),
            other => Err(Error::InvalidBlockSize(other)),
        }
    }

    /// Number of 32-bit words per block.
    #[inline]
    pub const fn words(self) -> usize {
        match self {
            Self::Nb4 => 4,
            Self::Nb6 => 6,
            Self::Nb8 => 8,
        }
    }

    /// Number of bytes per block.
    #[inline]
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }
}

/// Key width in 32-bit words (Nk).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyLength {
    /// 128-bit key (Nk = 4).
    Nk4,
    /// 192-bit key (Nk = 6).
    Nk6,
    /// 256-bit key (Nk = 8).
    Nk8,
}

impl KeyLength {
    /// All supported key lengths, shortest first.
    pub const ALL: [KeyLength; 3] = [KeyLength::Nk4, KeyLength::Nk6, KeyLength::Nk8];

    /// Parses a word count, rejecting anything outside {4, 6, 8}.
    pub fn from_words(words: usize) -> Result<Self> {
        match words {
            4 => Ok(Self::Nk4),
            6 => Ok(Self::Nk6),
            8 => Ok(Self::Nk8),
            other => Err(Error::InvalidKeyLength(other.saturating_mul(4))),
        }
    }

    /// Derives the key length from a raw key of 16, 24 or 32 bytes.
    pub fn from_key_bytes(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Nk4),
            24 => Ok(Self::Nk6),
            32 => Ok(Self::Nk8),
            other => Err(Error::InvalidKeyLength(other)),
        }
    }

    /// Number of 32-bit words in the raw key.
    #[inline]
    pub const fn words(self) -> usize {
        match self {
            Self::Nk4 => 4,
            Self::Nk6 => 6,
            Self::Nk8 => 8,
        }
    }

    /// Number of bytes in the raw key.
    #[inline]
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }
}

/// Round count `Nr = max(Nb, Nk) + 6`.
#[inline]
pub const fn round_count(block_size: BlockSize, key_length: KeyLength) -> usize {
    let nb = block_size.words();
    let nk = key_length.words();
    (if nb > nk { nb } else { nk }) + 6
}

/// XORs `rhs` into `dst` byte for byte. Both slices must have the same length.
#[inline]
pub fn xor_in_place(dst: &mut [u8], rhs: &[u8]) {
    debug_assert_eq!(dst.len(), rhs.len());
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_counts_follow_the_larger_dimension() {
        assert_eq!(round_count(BlockSize::Nb4, KeyLength::Nk4), 10);
        assert_eq!(round_count(BlockSize::Nb4, KeyLength::Nk6), 12);
        assert_eq!(round_count(BlockSize::Nb4, KeyLength::Nk8), 14);
        assert_eq!(round_count(BlockSize::Nb6, KeyLength::Nk4), 12);
        assert_eq!(round_count(BlockSize::Nb8, KeyLength::Nk4), 14);
        assert_eq!(round_count(BlockSize::Nb8, KeyLength::Nk8), 14);
    }

    #[test]
    fn rejects_odd_word_counts() {
        assert_eq!(BlockSize::from_words(5), Err(Error::InvalidBlockSize(5)));
        assert_eq!(BlockSize::from_words(0), Err(Error::InvalidBlockSize(0)));
        assert_eq!(KeyLength::from_words(7), Err(Error::InvalidKeyLength(28)));
        assert_eq!(
            KeyLength::from_words(usize::MAX),
            Err(Error::InvalidKeyLength(usize::MAX))
        );
        assert_eq!(KeyLength::from_key_bytes(17), Err(Error::InvalidKeyLength(17)));
    }

    #[test]
    fn largest_geometry_fits_the_expanded_key_buffer() {
        let rounds = round_count(BlockSize::Nb8, KeyLength::Nk8);
        assert_eq!(BlockSize::Nb8.bytes() * (rounds + 1), MAX_EXPANDED_KEY_BYTES);
        assert_eq!(BlockSize::Nb8.bytes(), MAX_BLOCK_BYTES);
    }
}
