//! Command-line interface for the 512-bit Feistel cipher.
//!
//! Every command works on exactly one 64-byte block.

#![forbid(unsafe_code)]

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use feistel_core::{FeistelCipher, BLOCK_SIZE, ROUND_COUNT};
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Feistel cipher CLI.
#[derive(Parser)]
#[command(
    name = "feistel",
    version,
    about = "Single-block 512-bit Feistel cipher (PBKDF2-HMAC-SHA256 key schedule)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the secret comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SecretArgs {
    /// Secret as UTF-8 text.
    #[arg(long, value_name = "TEXT")]
    secret: Option<String>,
    /// Secret as hex bytes.
    #[arg(long, value_name = "HEX")]
    secret_hex: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt one block.
    Enc {
        #[command(flatten)]
        secret: SecretArgs,
        /// Plaintext block as 128 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt one block.
    Dec {
        #[command(flatten)]
        secret: SecretArgs,
        /// Ciphertext block as 128 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Print the derived prekey, round keys and postkey.
    Keys {
        #[command(flatten)]
        secret: SecretArgs,
    },
    /// Round-trip random blocks and fail on any mismatch.
    Check {
        #[command(flatten)]
        secret: SecretArgs,
        /// Number of random blocks to test.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random secret and block, encrypt, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Enc { secret, block_hex } => cmd_enc(&secret, &block_hex),
        Commands::Dec { secret, block_hex } => cmd_dec(&secret, &block_hex),
        Commands::Keys { secret } => cmd_keys(&secret),
        Commands::Check {
            secret,
            samples,
            seed,
        } => cmd_check(&secret, samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_enc(secret: &SecretArgs, block_hex: &str) -> Result<()> {
    let cipher = build_cipher(secret)?;
    let block = parse_hex(block_hex).context("decode block hex")?;
    let sealed = cipher.encrypt(&block).context("encrypt block")?;
    info!("encrypted one block");
    println!("{}", hex::encode(sealed));
    Ok(())
}

fn cmd_dec(secret: &SecretArgs, block_hex: &str) -> Result<()> {
    let cipher = build_cipher(secret)?;
    let block = parse_hex(block_hex).context("decode block hex")?;
    let opened = cipher.decrypt(&block).context("decrypt block")?;
    info!("decrypted one block");
    println!("{}", hex::encode(opened));
    Ok(())
}

fn cmd_keys(secret: &SecretArgs) -> Result<()> {
    let cipher = build_cipher(secret)?;
    let keys = cipher.key_material();
    println!("prekey:  {}", hex::encode(keys.prekey()));
    for round in 0..ROUND_COUNT {
        println!("round {round:>2}: {}", hex::encode(keys.round_key(round)));
    }
    println!("postkey: {}", hex::encode(keys.postkey()));
    Ok(())
}

fn cmd_check(secret: &SecretArgs, samples: usize, seed: Option<u64>) -> Result<()> {
    let cipher = build_cipher(secret)?;
    let mut rng = seeded_rng(seed);

    for sample in 0..samples {
        let mut block = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut block);
        let sealed = cipher.encrypt_block(&block);
        if cipher.decrypt_block(&sealed) != block {
            bail!("round trip failed for sample {sample}");
        }
    }
    info!("checked {samples} random blocks");
    println!("ok: {samples} blocks round-tripped");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut secret = [0u8; 16];
    rng.fill_bytes(&mut secret);
    let cipher = FeistelCipher::new(secret).context("derive key material")?;

    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    let sealed = cipher.encrypt_block(&block);
    let opened = cipher.decrypt_block(&sealed);

    println!("demo secret: {}", hex::encode(secret));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(sealed));
    println!("decrypted: {}", hex::encode(opened));
    if opened != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_cipher(args: &SecretArgs) -> Result<FeistelCipher> {
    let secret = secret_bytes(args)?;
    FeistelCipher::new(secret).context("derive key material")
}

fn secret_bytes(args: &SecretArgs) -> Result<Vec<u8>> {
    match (&args.secret, &args.secret_hex) {
        (Some(text), None) => Ok(text.as_bytes().to_vec()),
        (None, Some(hex_str)) => parse_hex(hex_str).context("decode secret hex"),
        _ => bail!("pass exactly one of --secret or --secret-hex"),
    }
}

fn parse_hex(hex_str: &str) -> Result<Vec<u8>> {
    let trimmed = hex_str.trim();
    ensure!(!trimmed.is_empty(), "hex input is empty");
    Ok(hex::decode(trimmed)?)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feistel_core::FeistelError;

    fn text_secret(secret: &str) -> SecretArgs {
        SecretArgs {
            secret: Some(secret.to_owned()),
            secret_hex: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn text_and_hex_secrets_agree() {
        let from_text = secret_bytes(&text_secret("test-key")).unwrap();
        let from_hex = secret_bytes(&SecretArgs {
            secret: None,
            secret_hex: Some(hex::encode("test-key")),
        })
        .unwrap();
        assert_eq!(from_text, from_hex);
    }

    #[test]
    fn rejects_missing_secret() {
        let args = SecretArgs {
            secret: None,
            secret_hex: None,
        };
        assert!(secret_bytes(&args).is_err());
    }

    #[test]
    fn parse_hex_trims_whitespace() {
        assert_eq!(parse_hex(" 00ff\n").unwrap(), vec![0x00, 0xff]);
        assert!(parse_hex("zz").is_err());
        assert!(parse_hex("   ").is_err());
    }

    #[test]
    fn short_block_surfaces_block_size_error() {
        let cipher = build_cipher(&text_secret("test-key")).unwrap();
        let block = parse_hex("00ff").unwrap();
        let err = cipher.encrypt(&block).unwrap_err();
        assert_eq!(
            err,
            FeistelError::InvalidBlockSize {
                expected: BLOCK_SIZE,
                actual: 2
            }
        );
    }

    #[test]
    fn parses_enc_command() {
        let block = "00".repeat(BLOCK_SIZE);
        let cli = Cli::try_parse_from([
            "feistel",
            "enc",
            "--secret",
            "test-key",
            "--block-hex",
            block.as_str(),
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Enc { .. }));
    }

    #[test]
    fn secret_sources_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "feistel",
            "keys",
            "--secret",
            "a",
            "--secret-hex",
            "61",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
