//! Whole-block encryption and decryption.

use log::debug;

use crate::block::{swap_halves, xor_in_place, Block, BLOCK_SIZE};
use crate::error::FeistelError;
use crate::key::{KeyMaterial, ROUND_COUNT};
use crate::round::feistel_round;

/// Feistel cipher keyed by material derived once from a secret.
///
/// Holds no mutable state, so one instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct FeistelCipher {
    keys: KeyMaterial,
}

impl FeistelCipher {
    /// Derives key material from `secret` and builds a cipher around it.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, FeistelError> {
        let keys = KeyMaterial::derive(secret.as_ref())?;
        debug!(
            "feistel cipher ready: {} rounds, {}-byte blocks",
            ROUND_COUNT, BLOCK_SIZE
        );
        Ok(Self { keys })
    }

    /// Wraps already derived key material.
    pub fn from_key_material(keys: KeyMaterial) -> Self {
        Self { keys }
    }

    /// Key material backing this cipher.
    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    /// Encrypts one block given as a byte slice.
    ///
    /// # Errors
    /// [`FeistelError::InvalidBlockSize`] unless `block` is exactly
    /// [`BLOCK_SIZE`] bytes.
    pub fn encrypt(&self, block: &[u8]) -> Result<Block, FeistelError> {
        Ok(self.encrypt_block(&to_block(block)?))
    }

    /// Decrypts one block given as a byte slice.
    ///
    /// # Errors
    /// [`FeistelError::InvalidBlockSize`] unless `block` is exactly
    /// [`BLOCK_SIZE`] bytes.
    pub fn decrypt(&self, block: &[u8]) -> Result<Block, FeistelError> {
        Ok(self.decrypt_block(&to_block(block)?))
    }

    /// Encrypts a single 64-byte block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        xor_in_place(&mut state, self.keys.prekey());

        for round in 0..ROUND_COUNT {
            state = feistel_round(&state, self.keys.round_key(round));
        }

        // Undo the trailing swap so decryption can reuse `feistel_round`.
        let mut state = swap_halves(&state);
        xor_in_place(&mut state, self.keys.postkey());
        state
    }

    /// Decrypts a single 64-byte block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        let mut state = *block;
        xor_in_place(&mut state, self.keys.postkey());

        for round in (0..ROUND_COUNT).rev() {
            state = feistel_round(&state, self.keys.round_key(round));
        }

        let mut state = swap_halves(&state);
        xor_in_place(&mut state, self.keys.prekey());
        state
    }
}

fn to_block(bytes: &[u8]) -> Result<Block, FeistelError> {
    bytes.try_into().map_err(|_| FeistelError::InvalidBlockSize {
        expected: BLOCK_SIZE,
        actual: bytes.len(),
    })
}
