//! 512-bit Feistel block cipher with a PBKDF2-HMAC-SHA256 key schedule.
//!
//! This crate provides:
//! - Key derivation: one PBKDF2 call stretches a secret into whitening keys
//!   and ten half-block round keys.
//! - A round function built on SHA-256.
//! - Single-block encryption and decryption.
//!
//! It is a teaching cipher. There is no mode of operation, no padding and no
//! authentication; callers layering those on top own that choice.
//!
//! ```
//! use feistel_core::{FeistelCipher, BLOCK_SIZE};
//!
//! let cipher = FeistelCipher::new(b"test-key").unwrap();
//! let plain = [0u8; BLOCK_SIZE];
//! let sealed = cipher.encrypt_block(&plain);
//! assert_ne!(sealed, plain);
//! assert_eq!(cipher.decrypt_block(&sealed), plain);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;

pub use crate::block::{
    join, split, swap_halves, xor_in_place, Block, HalfBlock, BLOCK_SIZE, HALF_BLOCK_SIZE,
};
pub use crate::cipher::FeistelCipher;
pub use crate::error::FeistelError;
pub use crate::key::{
    KeyMaterial, KEY_MATERIAL_LEN, PBKDF2_ITERATIONS, PBKDF2_SALT, ROUND_COUNT,
};
pub use crate::round::feistel_round;
