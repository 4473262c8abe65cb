//! Cipher Block Chaining over [`Rijndael`].
//!
//! Buffers must be a whole, non-zero number of blocks; no padding is applied.
//! Every encryption draws a fresh IV from the supplied generator.

use rand::{CryptoRng, RngCore};
use rijndael_core::{xor_in_place, BlockSize, KeyLength, Rijndael, MAX_BLOCK_BYTES};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Validated `(Nb, Nk)` pair for a buffer of known length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Block width.
    pub block_size: BlockSize,
    /// Raw key width.
    pub key_length: KeyLength,
}

impl Params {
    /// Checks `nb`, `nk` and the data length, in that order.
    pub fn check(nb: i32, nk: i32, data_len: usize) -> Result<Self> {
        let block_size = usize::try_from(nb)
            .ok()
            .and_then(|words| BlockSize::from_words(words).ok())
            .ok_or(Error::WrongBlockSize(nb))?;
        let key_length = usize::try_from(nk)
            .ok()
            .and_then(|words| KeyLength::from_words(words).ok())
            .ok_or(Error::WrongKeyWords(nk))?;
        check_data_len(data_len, block_size.bytes())?;
        Ok(Self {
            block_size,
            key_length,
        })
    }

    /// Checks that `key` holds exactly `4 * Nk` bytes.
    pub fn check_key(&self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_length.bytes() {
            return Err(Error::WrongKeyLength {
                expected: self.key_length.bytes(),
                actual: key.len(),
            });
        }
        Ok(())
    }
}

fn check_data_len(len: usize, block: usize) -> Result<()> {
    if len == 0 || len % block != 0 {
        return Err(Error::InvalidLength { len, block });
    }
    Ok(())
}

/// CBC codec bound to one key and block size.
#[derive(Clone, Debug)]
pub struct CbcCodec {
    cipher: Rijndael,
}

impl CbcCodec {
    /// Builds a codec from a block size and a 16, 24 or 32 byte key.
    pub fn new(block_size: BlockSize, key: &[u8]) -> Result<Self> {
        Ok(Self {
            cipher: Rijndael::new(block_size, key)?,
        })
    }

    /// Wraps an existing cipher context.
    pub fn from_cipher(cipher: Rijndael) -> Self {
        Self { cipher }
    }

    /// The underlying block cipher.
    pub fn cipher(&self) -> &Rijndael {
        &self.cipher
    }

    /// Block size in bytes.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    fn check_iv_len(&self, len: usize) -> Result<()> {
        if len < self.block_size() {
            return Err(Error::InvalidIv {
                expected: self.block_size(),
                actual: len,
            });
        }
        Ok(())
    }

    /// Fills the first block of `iv_out` with `Nb` random words, each
    /// stored little-endian.
    pub fn generate_iv<R>(&self, rng: &mut R, iv_out: &mut [u8]) -> Result<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let block = self.block_size();
        if iv_out.len() < block {
            return Err(Error::IvBufferTooSmall {
                expected: block,
                actual: iv_out.len(),
            });
        }
        for word in iv_out[..block].chunks_exact_mut(4) {
            word.copy_from_slice(&rng.next_u32().to_le_bytes());
        }
        Ok(())
    }

    /// Encrypts `data` in place under a freshly generated IV, which is
    /// written to the first block of `iv_out`.
    pub fn encrypt<R>(&self, rng: &mut R, data: &mut [u8], iv_out: &mut [u8]) -> Result<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        check_data_len(data.len(), self.block_size())?;
        self.generate_iv(rng, iv_out)?;
        self.encrypt_with_iv_unchecked(data, &iv_out[..self.block_size()])
    }

    /// Encrypts `data` in place, chaining from a caller-chosen IV.
    ///
    /// Nothing checks that `iv` is fresh: the caller must never repeat an IV
    /// under the same key, or equal plaintext prefixes become visible. Use
    /// [`CbcCodec::encrypt`] unless the IV is fixed by a known-answer vector.
    pub fn encrypt_with_iv_unchecked(&self, data: &mut [u8], iv: &[u8]) -> Result<()> {
        let block = self.block_size();
        check_data_len(data.len(), block)?;
        self.check_iv_len(iv.len())?;

        let mut chain = Zeroizing::new([0u8; MAX_BLOCK_BYTES]);
        chain[..block].copy_from_slice(&iv[..block]);

        for chunk in data.chunks_exact_mut(block) {
            xor_in_place(chunk, &chain[..block]);
            self.cipher.encrypt_block(chunk)?;
            chain[..block].copy_from_slice(chunk);
        }

        log::trace!("cbc encrypted {} blocks of {} bytes", data.len() / block, block);
        Ok(())
    }

    /// Decrypts `data` in place using the IV produced at encryption time.
    pub fn decrypt(&self, data: &mut [u8], iv: &[u8]) -> Result<()> {
        let block = self.block_size();
        check_data_len(data.len(), block)?;
        self.check_iv_len(iv.len())?;

        let mut chain = Zeroizing::new([0u8; MAX_BLOCK_BYTES]);
        let mut next = Zeroizing::new([0u8; MAX_BLOCK_BYTES]);
        chain[..block].copy_from_slice(&iv[..block]);

        for chunk in data.chunks_exact_mut(block) {
            next[..block].copy_from_slice(chunk);
            self.cipher.decrypt_block(chunk)?;
            xor_in_place(chunk, &chain[..block]);
            core::mem::swap(&mut chain, &mut next);
        }

        log::trace!("cbc decrypted {} blocks of {} bytes", data.len() / block, block);
        Ok(())
    }
}

/// Validates every parameter, then CBC-encrypts `data` in place.
///
/// On error nothing has been written to `data` or `iv_out`.
pub fn encrypt_buffer<R>(
    rng: &mut R,
    data: &mut [u8],
    nb: i32,
    nk: i32,
    iv_out: &mut [u8],
    key: &[u8],
) -> Result<()>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let params = Params::check(nb, nk, data.len())?;
    params.check_key(key)?;
    if iv_out.len() < params.block_size.bytes() {
        return Err(Error::IvBufferTooSmall {
            expected: params.block_size.bytes(),
            actual: iv_out.len(),
        });
    }
    CbcCodec::new(params.block_size, key)?.encrypt(rng, data, iv_out)
}

/// Validates every parameter, then CBC-decrypts `data` in place.
///
/// On error `data` is left untouched.
pub fn decrypt_buffer(data: &mut [u8], nb: i32, nk: i32, iv: &[u8], key: &[u8]) -> Result<()> {
    let params = Params::check(nb, nk, data.len())?;
    params.check_key(key)?;
    let codec = CbcCodec::new(params.block_size, key)?;
    codec.decrypt(data, iv)
}
