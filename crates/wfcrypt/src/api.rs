//! Flag-returning entry points for callers that work with status codes.
//!
//! Each call reports exactly one code to its sink: `0` on success, the
//! failure's [`ErrorCode`] otherwise. A failed call leaves every buffer as it
//! was.

use rand::{CryptoRng, RngCore};

use crate::codec::{decrypt_buffer, encrypt_buffer};
use crate::error::{ErrorCode, Result};
use crate::sink::{ErrorSink, LastError};

fn finish(sink: &dyn ErrorSink, op: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => {
            sink.report(ErrorCode::Success);
            true
        }
        Err(err) => {
            log::debug!("{op} rejected ({:#010x}): {err}", err.code().value());
            sink.report(err.code());
            false
        }
    }
}

/// CBC-encrypts `plaintext` in place with `Nb`-word blocks and a `4 * nk`
/// byte key, writing the generated IV to the first `4 * nb` bytes of
/// `iv_out`.
///
/// The IV comes from the thread-local generator and the status goes to the
/// thread's [`last_error`](crate::last_error) slot.
pub fn encrypt(plaintext: &mut [u8], nb: i32, nk: i32, iv_out: &mut [u8], key: &[u8]) -> bool {
    encrypt_with(
        &LastError,
        &mut rand::thread_rng(),
        plaintext,
        nb,
        nk,
        iv_out,
        key,
    )
}

/// CBC-decrypts `ciphertext` in place using the IV returned by [`encrypt`].
pub fn decrypt(ciphertext: &mut [u8], nb: i32, nk: i32, iv: &[u8], key: &[u8]) -> bool {
    decrypt_with(&LastError, ciphertext, nb, nk, iv, key)
}

/// [`encrypt`] with an explicit status sink and IV generator.
pub fn encrypt_with<R>(
    sink: &dyn ErrorSink,
    rng: &mut R,
    plaintext: &mut [u8],
    nb: i32,
    nk: i32,
    iv_out: &mut [u8],
    key: &[u8],
) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    finish(
        sink,
        "encrypt",
        encrypt_buffer(rng, plaintext, nb, nk, iv_out, key),
    )
}

/// [`decrypt`] with an explicit status sink.
pub fn decrypt_with(
    sink: &dyn ErrorSink,
    ciphertext: &mut [u8],
    nb: i32,
    nk: i32,
    iv: &[u8],
    key: &[u8],
) -> bool {
    finish(sink, "decrypt", decrypt_buffer(ciphertext, nb, nk, iv, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::last_error;

    #[test]
    fn success_clears_last_error() {
        let key = [0x11u8; 16];
        let mut data = [0u8; 32];
        let mut iv = [0u8; 16];

        assert!(!encrypt(&mut data, 5, 4, &mut iv, &key));
        assert_eq!(last_error(), ErrorCode::WrongNb.value());

        assert!(encrypt(&mut data, 4, 4, &mut iv, &key));
        assert_eq!(last_error(), 0);
        assert!(decrypt(&mut data, 4, 4, &iv, &key));
        assert_eq!(last_error(), 0);
        assert_eq!(data, [0u8; 32]);
    }

    #[test]
    fn custom_sink_sees_each_code() {
        let codes = std::cell::RefCell::new(Vec::new());
        let sink = |code: ErrorCode| codes.borrow_mut().push(code);
        let mut rng = rand::thread_rng();
        let mut data = [0u8; 24];
        let mut iv = [0u8; 24];

        encrypt_with(&sink, &mut rng, &mut data, 6, 7, &mut iv, &[0u8; 28]);
        encrypt_with(&sink, &mut rng, &mut data, 6, 4, &mut iv, &[0u8; 24]);
        encrypt_with(&sink, &mut rng, &mut data, 6, 4, &mut iv[..8], &[0u8; 16]);
        decrypt_with(&sink, &mut data, 6, 4, &iv[..8], &[0u8; 16]);
        decrypt_with(&sink, &mut data[..20], 6, 4, &iv, &[0u8; 16]);

        assert_eq!(
            codes.into_inner(),
            vec![
                ErrorCode::WrongNk,
                ErrorCode::WrongKeyLength,
                ErrorCode::InvalidMemoryWrite,
                ErrorCode::InvalidMemoryRead,
                ErrorCode::InvalidMemoryRead,
            ]
        );
    }
}
