use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{CryptoError, Result};

pub const AES_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// `len` bytes from the operating system's secure random source.
pub fn random_key(len: usize) -> Result<Vec<u8>> {
    let mut key = vec![0u8; len];
    OsRng.try_fill_bytes(&mut key)?;
    Ok(key)
}

/// Like [`random_key`], but only for lengths AES accepts.
pub fn random_aes_key(len: usize) -> Result<Vec<u8>> {
    if !is_valid_aes_key_len(len) {
        return Err(CryptoError::InvalidKeyLength(len));
    }
    random_key(len)
}

pub fn is_valid_aes_key_len(len: usize) -> bool {
    AES_KEY_LENGTHS.contains(&len)
}
