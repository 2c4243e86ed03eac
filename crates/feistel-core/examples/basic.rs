//! Encrypts and decrypts one block with a password-derived key.

use feistel_core::{FeistelCipher, BLOCK_SIZE};

fn main() {
    let cipher = FeistelCipher::new(b"correct horse battery staple").unwrap();

    let mut block = [0u8; BLOCK_SIZE];
    block[..32].copy_from_slice(b"thirty-two bytes of left half!!!");
    block[32..].copy_from_slice(b"and thirty-two more on the right");

    let sealed = cipher.encrypt_block(&block);
    assert_ne!(sealed, block);
    assert_eq!(cipher.decrypt_block(&sealed), block);

    // Anything but a whole block is refused.
    assert!(cipher.encrypt(&block[..40]).is_err());

    println!("example succeeded; decryption restored the plaintext");
}
