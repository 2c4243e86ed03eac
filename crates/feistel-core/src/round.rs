//! Feistel round transformation.

use sha2::{Digest, Sha256};

use crate::block::{join, split, xor_in_place, Block, HalfBlock};

/// Applies one Feistel round to `L || R`, returning `R || (L ^ SHA256(R ^ k))`.
///
/// The previous right half passes through unchanged as the new left half, so
/// replaying rounds with the keys in reverse order undoes them.
#[inline]
pub fn feistel_round(block: &Block, round_key: &HalfBlock) -> Block {
    let (left, right) = split(block);

    let mut mixed = right;
    xor_in_place(&mut mixed, round_key);
    let digest: HalfBlock = Sha256::digest(mixed).into();

    let mut new_right = left;
    xor_in_place(&mut new_right, &digest);
    join(&right, &new_right)
}
