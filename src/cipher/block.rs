use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use std::sync::Arc;

use crate::error::{CryptoError, CryptoResult};

/// Size of a cipher block in bytes
pub const BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes
pub const AES_128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES_192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES_256_KEY_SIZE: usize = 32;

/// A 128-bit block cipher usable in the forward direction only.
///
/// GCM never decrypts with the underlying cipher: both directions of the mode
/// are built from `encrypt_block`. Implementations must be usable through a
/// shared reference, which lets one expanded key schedule serve several
/// contexts at once.
pub trait BlockCipher {
    /// Encrypt one block in place
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]);
}

/// A block cipher that can be constructed from raw key bytes
pub trait BindKey: BlockCipher + Sized {
    /// Expand `key` into a ready-to-use cipher
    fn bind_key(key: &[u8]) -> CryptoResult<Self>;
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        (**self).encrypt_block(block)
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for Arc<C> {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        (**self).encrypt_block(block)
    }
}

impl<C: BindKey> BindKey for Arc<C> {
    fn bind_key(key: &[u8]) -> CryptoResult<Self> {
        C::bind_key(key).map(Arc::new)
    }
}

/// AES key schedule for any of the three standard key sizes
#[derive(Clone)]
pub enum AesKey {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesKey")
            .field("key_bits", &self.key_bits())
            .field("schedule", &"[REDACTED]")
            .finish()
    }
}

impl AesKey {
    /// Expand a 16, 24 or 32-byte AES key
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` for any other key size
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let schedule = match key.len() {
            AES_128_KEY_SIZE => Aes128::new_from_slice(key).map(AesKey::Aes128),
            AES_192_KEY_SIZE => Aes192::new_from_slice(key).map(AesKey::Aes192),
            AES_256_KEY_SIZE => Aes256::new_from_slice(key).map(AesKey::Aes256),
            other => return Err(CryptoError::invalid_key_length(other)),
        };

        schedule.map_err(|_| CryptoError::invalid_key_length(key.len()))
    }

    /// Size of the bound key in bits
    pub fn key_bits(&self) -> usize {
        match self {
            AesKey::Aes128(_) => 128,
            AesKey::Aes192(_) => 192,
            AesKey::Aes256(_) => 256,
        }
    }
}

impl BlockCipher for AesKey {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        let mut buf = Block::from(*block);
        match self {
            AesKey::Aes128(cipher) => BlockEncrypt::encrypt_block(cipher, &mut buf),
            AesKey::Aes192(cipher) => BlockEncrypt::encrypt_block(cipher, &mut buf),
            AesKey::Aes256(cipher) => BlockEncrypt::encrypt_block(cipher, &mut buf),
        }
        block.copy_from_slice(&buf);
    }
}

impl BindKey for AesKey {
    fn bind_key(key: &[u8]) -> CryptoResult<Self> {
        AesKey::new(key)
    }
}
