//! Encrypts a short message with 192-bit blocks and decrypts it again.

use wfcrypt::{api, last_error};

fn main() {
    let key = *b"an example 32 byte key material!";
    let mut message = [0u8; 48];
    message[..44].copy_from_slice(b"two blocks of twenty-four bytes, zero padded");

    let original = message;
    let mut iv = [0u8; 24];
    assert!(api::encrypt(&mut message, 6, 8, &mut iv, &key), "error {:#x}", last_error());
    assert_ne!(message, original);

    assert!(api::decrypt(&mut message, 6, 8, &iv, &key), "error {:#x}", last_error());
    assert_eq!(message, original);

    println!("example succeeded; CBC round trip restored the plaintext");
}
