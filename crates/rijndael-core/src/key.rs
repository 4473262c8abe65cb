//! Key schedule and the expanded key container.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{round_count, BlockSize, KeyLength};
use crate::sbox::{sbox, RCON};

/// Expanded round keys: `Nr + 1` slices of `4 * Nb` bytes each.
///
/// The schedule is expanded directly into one heap allocation and wiped with
/// `zeroize` when dropped. Moving a `RoundKeys` (or a cipher holding one) only
/// moves the pointer, so no copy of the key material is left behind.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    bytes: Box<[u8]>,
    #[zeroize(skip)]
    block_size: BlockSize,
}

impl RoundKeys {
    /// Returns the round key at the requested index (`0..=Nr`).
    #[inline]
    pub fn get(&self, round: usize) -> &[u8] {
        let width = self.block_size.bytes();
        &self.bytes[round * width..(round + 1) * width]
    }

    /// Whole schedule as one flat buffer of `4 * Nb * (Nr + 1)` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of round-key slices (`Nr + 1`).
    #[inline]
    pub fn count(&self) -> usize {
        self.bytes.len() / self.block_size.bytes()
    }
}

impl core::fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundKeys")
            .field("block_size", &self.block_size)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for RoundKeys {
    fn eq(&self, other: &Self) -> bool {
        self.block_size == other.block_size && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for RoundKeys {}

fn rot_word(word: &mut [u8; 4]) {
    word.rotate_left(1);
}

fn sub_word(word: &mut [u8; 4]) {
    for byte in word.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Expands `key` (whose length must match `key_length`) for the given block size.
pub(crate) fn expand_key(block_size: BlockSize, key_length: KeyLength, key: &[u8]) -> RoundKeys {
    let nk = key_length.words();
    let key_bytes = key_length.bytes();
    debug_assert_eq!(key.len(), key_bytes);

    let len = block_size.bytes() * (round_count(block_size, key_length) + 1);
    let mut schedule = RoundKeys {
        bytes: vec![0u8; len].into_boxed_slice(),
        block_size,
    };
    let w = &mut schedule.bytes;
    w[..key_bytes].copy_from_slice(key);

    for i in (key_bytes..len).step_by(4) {
        let word_index = i / 4;
        let mut temp = [w[i - 4], w[i - 3], w[i - 2], w[i - 1]];

        if word_index % nk == 0 {
            rot_word(&mut temp);
            sub_word(&mut temp);
            temp[0] ^= RCON[word_index / nk];
        } else if nk == 8 && word_index % 8 == 4 {
            sub_word(&mut temp);
        }

        for (j, t) in temp.iter().enumerate() {
            w[i + j] = w[i - key_bytes + j] ^ t;
        }
        temp.zeroize();
    }

    schedule
}
