//! Behavioural properties of the public CBC entry points.

use std::collections::HashSet;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use wfcrypt::{api, last_error, BlockSize, CbcCodec, ErrorCode, KeyLength};

const WORDS: [i32; 3] = [4, 6, 8];

#[test]
fn round_trip_for_every_block_and_key_size() {
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    for nb in WORDS {
        for nk in WORDS {
            let block = 4 * nb as usize;
            for blocks in [1usize, 2, 5] {
                let mut key = vec![0u8; 4 * nk as usize];
                let mut plaintext = vec![0u8; block * blocks];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut plaintext);

                let mut data = plaintext.clone();
                let mut iv = vec![0u8; block];
                assert!(api::encrypt(&mut data, nb, nk, &mut iv, &key));
                assert_ne!(data, plaintext);
                assert!(api::decrypt(&mut data, nb, nk, &iv, &key));
                assert_eq!(data, plaintext, "nb={nb} nk={nk} blocks={blocks}");
            }
        }
    }
}

#[test]
fn rejected_calls_report_codes_and_leave_buffers_alone() {
    let key = [0x24u8; 16];
    let cases: [(i32, i32, usize, ErrorCode); 4] = [
        (5, 4, 32, ErrorCode::WrongNb),
        (4, 7, 32, ErrorCode::WrongNk),
        (4, 4, 17, ErrorCode::InvalidMemoryRead),
        (4, 4, 0, ErrorCode::InvalidMemoryRead),
    ];

    for (nb, nk, len, code) in cases {
        let mut data = vec![0x5au8; len];
        let mut iv = [0xc3u8; 32];
        assert!(!api::encrypt(&mut data, nb, nk, &mut iv, &key));
        assert_eq!(last_error(), code.value());
        assert!(data.iter().all(|&b| b == 0x5a));
        assert!(iv.iter().all(|&b| b == 0xc3));

        assert!(!api::decrypt(&mut data, nb, nk, &iv, &key));
        assert_eq!(last_error(), code.value());
        assert!(data.iter().all(|&b| b == 0x5a));
    }
}

#[test]
fn corrupted_block_only_disturbs_itself_and_its_successor() {
    let key = [0x0fu8; 24];
    let codec = CbcCodec::new(BlockSize::Nb4, &key).unwrap();
    let mut rng = ChaCha20Rng::from_seed([5u8; 32]);

    let mut plaintext = [0u8; 48];
    rng.fill_bytes(&mut plaintext);
    let mut ciphertext = plaintext;
    let mut iv = [0u8; 16];
    codec.encrypt(&mut rng, &mut ciphertext, &mut iv).unwrap();

    ciphertext[16] ^= 0x01;
    let mut decrypted = ciphertext;
    codec.decrypt(&mut decrypted, &iv).unwrap();

    assert_eq!(decrypted[..16], plaintext[..16]);
    assert_ne!(decrypted[16..32], plaintext[16..32]);
    assert_eq!(decrypted[32], plaintext[32] ^ 0x01);
    assert_eq!(decrypted[33..], plaintext[33..]);
}

#[test]
fn every_encryption_draws_a_new_iv() {
    let key = [0u8; 32];
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let mut data = [0u8; 32];
        let mut iv = [0u8; 32];
        assert!(api::encrypt(&mut data, 8, 8, &mut iv, &key));
        assert!(seen.insert(iv), "IV repeated");
    }
}

#[test]
fn api_and_codec_agree() {
    let key = [0x77u8; 32];
    let mut plaintext = [0u8; 48];
    ChaCha20Rng::from_seed([6u8; 32]).fill_bytes(&mut plaintext);

    let mut via_api = plaintext;
    let mut iv = [0u8; 24];
    assert!(api::encrypt(&mut via_api, 6, 8, &mut iv, &key));

    let codec = CbcCodec::new(BlockSize::Nb6, &key).unwrap();
    assert_eq!(codec.cipher().key_length(), KeyLength::Nk8);
    let mut via_codec = plaintext;
    codec.encrypt_with_iv_unchecked(&mut via_codec, &iv).unwrap();
    assert_eq!(via_api, via_codec);
}

#[test]
fn threads_encrypt_independently() {
    let key = [0x31u8; 16];
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let plaintext = [i as u8; 64];
                let mut data = plaintext;
                let mut iv = [0u8; 32];
                assert!(api::encrypt(&mut data, 8, 4, &mut iv, &key));
                assert_eq!(last_error(), 0);
                assert!(api::decrypt(&mut data, 8, 4, &iv, &key));
                data == plaintext
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
