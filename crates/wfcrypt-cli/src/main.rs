//! Command-line interface for `wfcrypt`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{BlockSize, KeyLength, Rijndael};
use wfcrypt::{decrypt_buffer, encrypt_buffer, CbcCodec};

/// CBC encryption with variable block size Rijndael.
#[derive(Parser)]
#[command(name = "wfcrypt", version, author, about = "Rijndael-CBC file encryption")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file; the generated IV is printed as hex.
    Enc {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Block size in 32-bit words (4, 6 or 8).
        #[arg(long, default_value_t = 4)]
        nb: i32,
        /// Input file (length must be a multiple of the block size).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Write the IV as hex to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        iv_out: Option<PathBuf>,
        /// Optional RNG seed for a reproducible IV. Never use for real data.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decrypt a file with the key and the IV printed by `enc`.
    Dec {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Block size in 32-bit words (4, 6 or 8).
        #[arg(long, default_value_t = 4)]
        nb: i32,
        /// IV as hex, one block long.
        #[arg(
            long,
            value_name = "HEX",
            conflicts_with = "iv_in",
            required_unless_present = "iv_in"
        )]
        iv_hex: Option<String>,
        /// Read the IV hex from this file (as written by `enc --iv-out`).
        #[arg(long, value_name = "FILE")]
        iv_in: Option<PathBuf>,
        /// Input file (ciphertext).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Run known-answer vectors and random round trips for every geometry.
    Check {
        /// Random round trips per (Nb, Nk) pair.
        #[arg(long, default_value_t = 4)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt and decrypt random data under a random key.
    Demo {
        /// Block size in 32-bit words (4, 6 or 8).
        #[arg(long, default_value_t = 4)]
        nb: i32,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Enc {
            key_hex,
            nb,
            input,
            output,
            iv_out,
            seed,
        } => cmd_enc(&key_hex, nb, &input, &output, iv_out.as_deref(), seed),
        Commands::Dec {
            key_hex,
            nb,
            iv_hex,
            iv_in,
            input,
            output,
        } => {
            let iv = load_iv(iv_hex.as_deref(), iv_in.as_deref())?;
            cmd_dec(&key_hex, nb, &iv, &input, &output)
        }
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { nb, seed } => cmd_demo(nb, seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_enc(
    key_hex: &str,
    nb: i32,
    input_path: &Path,
    output_path: &Path,
    iv_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<()> {
    let (key, key_length) = parse_key_hex(key_hex)?;
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let mut iv = [0u8; 32];
    let mut rng = seeded_rng(seed);
    encrypt_buffer(&mut rng, &mut data, nb, nk_of(key_length), &mut iv, &key)
        .with_context(|| format!("encrypt {}", input_path.display()))?;
    log::debug!("encrypted {} bytes with nb={nb}", data.len());

    fs::write(output_path, &data).with_context(|| format!("write {}", output_path.display()))?;
    // `nb` was validated by encrypt_buffer.
    let iv_hex = hex::encode(&iv[..4 * nb as usize]);
    match iv_path {
        Some(path) => {
            fs::write(path, &iv_hex).with_context(|| format!("write {}", path.display()))?
        }
        None => println!("iv: {iv_hex}"),
    }
    Ok(())
}

fn load_iv(iv_hex: Option<&str>, iv_path: Option<&Path>) -> Result<Vec<u8>> {
    let text = match (iv_hex, iv_path) {
        (Some(text), None) => text.to_owned(),
        (None, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        _ => bail!("exactly one of --iv-hex and --iv-in is required"),
    };
    hex::decode(text.trim()).context("decode IV hex")
}

fn cmd_dec(
    key_hex: &str,
    nb: i32,
    iv: &[u8],
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let (key, key_length) = parse_key_hex(key_hex)?;
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    decrypt_buffer(&mut data, nb, nk_of(key_length), iv, &key)
        .with_context(|| format!("decrypt {}", input_path.display()))?;
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

const KNOWN_ANSWERS: [(&str, &str, &str); 3] = [
    (
        "000102030405060708090a0b0c0d0e0f",
        "00112233445566778899aabbccddeeff",
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    ),
    (
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        "00112233445566778899aabbccddeeff",
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    ),
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "00112233445566778899aabbccddeeff",
        "8ea2b7ca516745bfeafc49904b496089",
    ),
];

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    for (key_hex, plain_hex, cipher_hex) in KNOWN_ANSWERS {
        let (key, _) = parse_key_hex(key_hex)?;
        let cipher = Rijndael::new(BlockSize::Nb4, &key)?;
        let mut block = hex::decode(plain_hex)?;
        cipher.encrypt_block(&mut block)?;
        ensure!(
            hex::encode(&block) == cipher_hex,
            "known-answer mismatch for {}-bit key",
            key.len() * 8
        );
        cipher.decrypt_block(&mut block)?;
        ensure!(hex::encode(&block) == plain_hex, "known-answer inverse failed");
    }
    println!("known-answer vectors: ok");

    let mut rng = seeded_rng(seed);
    for block_size in BlockSize::ALL {
        for key_length in KeyLength::ALL {
            for _ in 0..samples {
                let mut key = vec![0u8; key_length.bytes()];
                rng.fill_bytes(&mut key);
                let blocks = 1 + (rng.next_u32() % 4) as usize;
                let mut plaintext = vec![0u8; blocks * block_size.bytes()];
                rng.fill_bytes(&mut plaintext);

                let codec = CbcCodec::new(block_size, &key)?;
                let mut data = plaintext.clone();
                let mut iv = [0u8; 32];
                codec.encrypt(&mut rng, &mut data, &mut iv)?;
                codec.decrypt(&mut data, &iv)?;
                if data != plaintext {
                    bail!(
                        "round trip failed for nb={} nk={}",
                        block_size.words(),
                        key_length.words()
                    );
                }
            }
        }
    }
    println!("cbc round trips: ok ({samples} per geometry)");
    Ok(())
}

fn cmd_demo(nb: i32, seed: Option<u64>) -> Result<()> {
    let block_size = usize::try_from(nb)
        .ok()
        .and_then(|words| BlockSize::from_words(words).ok())
        .with_context(|| format!("nb must be 4, 6 or 8, got {nb}"))?;
    let mut rng = seeded_rng(seed);

    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let mut data = vec![0u8; 2 * block_size.bytes()];
    rng.fill_bytes(&mut data);
    let plaintext_hex = hex::encode(&data);

    let mut iv = [0u8; 32];
    encrypt_buffer(&mut rng, &mut data, nb, 8, &mut iv, &key)?;
    let ciphertext_hex = hex::encode(&data);
    let iv = &iv[..block_size.bytes()];

    decrypt_buffer(&mut data, nb, 8, iv, &key)?;
    let decrypted_hex = hex::encode(&data);

    println!("demo key: {}", hex::encode(key));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {plaintext_hex}");
    println!("ciphertext: {ciphertext_hex}");
    println!("decrypted: {decrypted_hex}");
    if decrypted_hex != plaintext_hex {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<(Vec<u8>, KeyLength)> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    let key_length = KeyLength::from_key_bytes(bytes.len())
        .context("key must be 16, 24 or 32 bytes (32, 48 or 64 hex characters)")?;
    Ok((bytes, key_length))
}

fn nk_of(key_length: KeyLength) -> i32 {
    key_length.words() as i32
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
