//! Key schedule: PBKDF2-HMAC-SHA256 stretched into whitening and round keys.

use core::fmt;

use hmac::Hmac;
use log::debug;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::block::{Block, HalfBlock, BLOCK_SIZE, HALF_BLOCK_SIZE};
use crate::error::FeistelError;

/// Number of Feistel rounds.
pub const ROUND_COUNT: usize = 10;

/// Length of the derived buffer: one half block per round plus two whole
/// blocks of whitening.
pub const KEY_MATERIAL_LEN: usize = (ROUND_COUNT + 4) * HALF_BLOCK_SIZE;

/// Fixed application salt fed to PBKDF2.
pub const PBKDF2_SALT: &[u8] = b"Computerphile";

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 500;

const ROUND_KEYS_OFFSET: usize = BLOCK_SIZE;
const POSTKEY_OFFSET: usize = KEY_MATERIAL_LEN - BLOCK_SIZE;

// Round keys and postkey tile everything after the prekey.
const _: () = assert!(ROUND_KEYS_OFFSET + ROUND_COUNT * HALF_BLOCK_SIZE == POSTKEY_OFFSET);

/// Derived key material laid out as `[prekey: 64][round keys: 10 x 32][postkey: 64]`.
///
/// The buffer is wiped on drop.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Zeroizing<[u8; KEY_MATERIAL_LEN]>,
}

impl KeyMaterial {
    /// Derives key material from an arbitrary-length secret.
    ///
    /// Empty secrets are accepted; PBKDF2 is well defined for them.
    pub fn derive(secret: &[u8]) -> Result<Self, FeistelError> {
        let mut bytes = Zeroizing::new([0u8; KEY_MATERIAL_LEN]);
        pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, PBKDF2_SALT, PBKDF2_ITERATIONS, &mut bytes[..])
            .map_err(|err| FeistelError::InvalidSecret(err.to_string()))?;
        debug!(
            "derived {} bytes of key material ({} PBKDF2 iterations)",
            KEY_MATERIAL_LEN, PBKDF2_ITERATIONS
        );
        Ok(Self { bytes })
    }

    /// Whitening key applied before the first round of encryption.
    #[inline]
    pub fn prekey(&self) -> &Block {
        self.bytes[..ROUND_KEYS_OFFSET]
            .try_into()
            .expect("prekey spans one block")
    }

    /// Round key for round `round` (0-based).
    ///
    /// # Panics
    /// Panics if `round >= ROUND_COUNT`.
    #[inline]
    pub fn round_key(&self, round: usize) -> &HalfBlock {
        assert!(
            round < ROUND_COUNT,
            "round index {round} out of range 0..{ROUND_COUNT}"
        );
        let start = ROUND_KEYS_OFFSET + round * HALF_BLOCK_SIZE;
        self.bytes[start..start + HALF_BLOCK_SIZE]
            .try_into()
            .expect("round key spans half a block")
    }

    /// Whitening key applied after the last round of encryption.
    #[inline]
    pub fn postkey(&self) -> &Block {
        self.bytes[POSTKEY_OFFSET..]
            .try_into()
            .expect("postkey spans one block")
    }

    /// The whole derived buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &KEY_MATERIAL_LEN)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn buffer_has_expected_length() {
        let km = KeyMaterial::derive(b"test-key").unwrap();
        assert_eq!(KEY_MATERIAL_LEN, 448);
        assert_eq!(km.as_bytes().len(), KEY_MATERIAL_LEN);
        assert_eq!(km.prekey().len(), BLOCK_SIZE);
        assert_eq!(km.postkey().len(), BLOCK_SIZE);
    }

    #[test]
    fn matches_pbkdf2_reference_output() {
        let km = KeyMaterial::derive(b"test-key").unwrap();
        let bytes = km.as_bytes();
        assert_eq!(bytes[..16], hex!("efb29c800163cd084939e02f4fc562f9"));
        assert_eq!(
            bytes[KEY_MATERIAL_LEN - 16..],
            hex!("54c2159a18fcc0f058ef5638f5857d20")
        );
    }

    #[test]
    fn views_tile_buffer_without_gaps() {
        let km = KeyMaterial::derive(b"tiling").unwrap();
        let mut rebuilt = Vec::with_capacity(KEY_MATERIAL_LEN);
        rebuilt.extend_from_slice(km.prekey());
        for round in 0..ROUND_COUNT {
            rebuilt.extend_from_slice(km.round_key(round));
        }
        rebuilt.extend_from_slice(km.postkey());
        assert_eq!(rebuilt.as_slice(), km.as_bytes());
    }

    #[test]
    fn round_key_windows_are_distinct() {
        let km = KeyMaterial::derive(b"windows").unwrap();
        for a in 0..ROUND_COUNT {
            for b in (a + 1)..ROUND_COUNT {
                assert_ne!(km.round_key(a), km.round_key(b), "rounds {a} and {b}");
            }
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = KeyMaterial::derive(b"same secret").unwrap();
        let b = KeyMaterial::derive(b"same secret").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        let c = KeyMaterial::derive(b"other secret").unwrap();
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn empty_secret_is_accepted() {
        let km = KeyMaterial::derive(b"").unwrap();
        assert!(km.as_bytes().iter().any(|&b| b != 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn round_key_past_last_round_panics() {
        let km = KeyMaterial::derive(b"test-key").unwrap();
        let _ = km.round_key(ROUND_COUNT);
    }

    #[test]
    fn debug_redacts_bytes() {
        let km = KeyMaterial::derive(b"test-key").unwrap();
        let rendered = format!("{km:?}");
        assert!(!rendered.contains("efb29c"));
        assert!(rendered.starts_with("KeyMaterial"));
    }
}
