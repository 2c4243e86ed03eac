//! Block representation helpers.

/// Block size in bytes (512 bits).
pub const BLOCK_SIZE: usize = 64;

/// Half-block size in bytes; equal to a SHA-256 digest.
pub const HALF_BLOCK_SIZE: usize = BLOCK_SIZE / 2;

/// Cipher block of 64 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// One Feistel half of a block.
pub type HalfBlock = [u8; HALF_BLOCK_SIZE];

/// XORs `rhs` into `dst` byte for byte.
#[inline]
pub fn xor_in_place<const N: usize>(dst: &mut [u8; N], rhs: &[u8; N]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Splits a block into its left and right halves.
#[inline]
pub fn split(block: &Block) -> (HalfBlock, HalfBlock) {
    let mut left = [0u8; HALF_BLOCK_SIZE];
    let mut right = [0u8; HALF_BLOCK_SIZE];
    left.copy_from_slice(&block[..HALF_BLOCK_SIZE]);
    right.copy_from_slice(&block[HALF_BLOCK_SIZE..]);
    (left, right)
}

/// Concatenates two halves into `left || right`.
#[inline]
pub fn join(left: &HalfBlock, right: &HalfBlock) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[..HALF_BLOCK_SIZE].copy_from_slice(left);
    block[HALF_BLOCK_SIZE..].copy_from_slice(right);
    block
}

/// Returns `R || L` for a block `L || R`.
#[inline]
pub fn swap_halves(block: &Block) -> Block {
    let (left, right) = split(block);
    join(&right, &left)
}
