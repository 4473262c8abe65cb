//! Cipher context: key schedule plus single-block encryption/decryption.

use crate::block::{round_count, BlockSize, KeyLength};
use crate::error::{Error, Result};
use crate::key::{expand_key, RoundKeys};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

/// Rijndael context holding an expanded key for a fixed block size.
///
/// Read-only after construction; a shared reference can encrypt blocks from
/// several threads at once as long as each call owns its block buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rijndael {
    block_size: BlockSize,
    key_length: KeyLength,
    rounds: usize,
    round_keys: RoundKeys,
}

impl Rijndael {
    /// Expands `key` (16, 24 or 32 bytes) for blocks of `block_size`.
    pub fn new(block_size: BlockSize, key: &[u8]) -> Result<Self> {
        let key_length = KeyLength::from_key_bytes(key.len())?;
        Ok(Self {
            block_size,
            key_length,
            rounds: round_count(block_size, key_length),
            round_keys: expand_key(block_size, key_length, key),
        })
    }

    /// Block size in bytes (`4 * Nb`).
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size.bytes()
    }

    /// Block geometry this context was built for.
    #[inline]
    pub fn block_geometry(&self) -> BlockSize {
        self.block_size
    }

    /// Key length of the raw key.
    #[inline]
    pub fn key_length(&self) -> KeyLength {
        self.key_length
    }

    /// Number of rounds (`Nr`).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The expanded key schedule.
    #[inline]
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    fn check_block(&self, block: &[u8]) -> Result<()> {
        if block.len() != self.block_size() {
            return Err(Error::BlockLength {
                expected: self.block_size(),
                actual: block.len(),
            });
        }
        Ok(())
    }

    /// Encrypts one block in place.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.check_block(block)?;
        let rks = &self.round_keys;

        add_round_key(block, rks.get(0));
        for round in 1..self.rounds {
            sub_bytes(block);
            shift_rows(block);
            mix_columns(block);
            add_round_key(block, rks.get(round));
        }
        sub_bytes(block);
        shift_rows(block);
        add_round_key(block, rks.get(self.rounds));

        Ok(())
    }

    /// Decrypts one block in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.check_block(block)?;
        let rks = &self.round_keys;

        add_round_key(block, rks.get(self.rounds));
        for round in (1..self.rounds).rev() {
            inv_shift_rows(block);
            inv_sub_bytes(block);
            add_round_key(block, rks.get(round));
            inv_mix_columns(block);
        }
        inv_shift_rows(block);
        inv_sub_bytes(block);
        add_round_key(block, rks.get(0));

        Ok(())
    }
}
