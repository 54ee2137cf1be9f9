use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use zeroize::Zeroize;

use super::context::{Direction, GcmContext};
use super::ctr::STANDARD_IV_SIZE;
use super::gf128::block_to_element;
use super::tag::{check_tag_len, DEFAULT_TAG_SIZE};
use crate::cipher::{AesKey, BlockCipher, BLOCK_SIZE};
use crate::error::CryptoResult;

/// AES-GCM cipher with a key bound once and shared between operations
///
/// Each call runs on a fresh [`GcmContext`] that borrows the expanded key
/// schedule and the precomputed hash subkey, so an `AesGcm` can be cloned
/// cheaply and used from several threads at once.
///
/// # Examples
///
/// ```
/// use qasa_gcm::gcm::AesGcm;
///
/// let key = [0x42; 32];
/// let cipher = AesGcm::new(&key).unwrap();
/// let iv = AesGcm::generate_iv();
///
/// let (ciphertext, tag) = cipher.encrypt(b"Secret message", &iv, Some(&b"header"[..])).unwrap();
/// let plaintext = cipher.decrypt(&ciphertext, &iv, Some(&b"header"[..]), &tag).unwrap();
/// assert_eq!(plaintext, b"Secret message");
/// ```
#[derive(Clone)]
pub struct AesGcm {
    cipher: Arc<AesKey>,
    h: u128,
}

impl std::fmt::Debug for AesGcm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcm")
            .field("cipher", &format!("[AES-{}-GCM Cipher]", self.cipher.key_bits()))
            .finish()
    }
}

impl Drop for AesGcm {
    fn drop(&mut self) {
        self.h.zeroize();
    }
}

impl AesGcm {
    /// Create a new AES-GCM cipher from a 16, 24 or 32-byte key
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let cipher = Arc::new(AesKey::new(key)?);

        let mut zero = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&mut zero);
        let h = block_to_element(&zero);
        zero.zeroize();

        log::debug!("AES-{}-GCM key bound", cipher.key_bits());
        Ok(Self { cipher, h })
    }

    /// Generate a random 96-bit IV.
    ///
    /// A given IV must never be used twice with the same key.
    pub fn generate_iv() -> Vec<u8> {
        let mut iv = vec![0u8; STANDARD_IV_SIZE];
        OsRng.fill_bytes(&mut iv);
        iv
    }

    /// Size of the bound key in bits
    pub fn key_bits(&self) -> usize {
        self.cipher.key_bits()
    }

    /// A fresh streaming context sharing this key
    pub fn context(&self) -> GcmContext<Arc<AesKey>> {
        GcmContext::from_parts(Arc::clone(&self.cipher), self.h)
    }

    /// Encrypt `plaintext` and return the ciphertext and a full 16-byte tag
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        iv: &[u8],
        associated_data: Option<&[u8]>,
    ) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
        self.encrypt_with_tag_len(plaintext, iv, associated_data, DEFAULT_TAG_SIZE)
    }

    /// Encrypt `plaintext` and return the ciphertext and a `tag_len`-byte tag
    pub fn encrypt_with_tag_len(
        &self,
        plaintext: &[u8],
        iv: &[u8],
        associated_data: Option<&[u8]>,
        tag_len: usize,
    ) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
        seal(&mut self.context(), plaintext, iv, associated_data, tag_len)
    }

    /// Decrypt `ciphertext` and check `tag`.
    ///
    /// No plaintext is returned unless the tag verifies.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        iv: &[u8],
        associated_data: Option<&[u8]>,
        tag: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        open(&mut self.context(), ciphertext, iv, associated_data, tag)
    }
}

fn seal<C: BlockCipher>(
    ctx: &mut GcmContext<C>,
    plaintext: &[u8],
    iv: &[u8],
    associated_data: Option<&[u8]>,
    tag_len: usize,
) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    check_tag_len(tag_len)?;
    ctx.start(Direction::Encrypt, iv, associated_data.unwrap_or(&[]))?;
    let ciphertext = ctx.update(plaintext)?;
    let tag = ctx.finish(tag_len)?;
    Ok((ciphertext, tag))
}

fn open<C: BlockCipher>(
    ctx: &mut GcmContext<C>,
    ciphertext: &[u8],
    iv: &[u8],
    associated_data: Option<&[u8]>,
    tag: &[u8],
) -> CryptoResult<Vec<u8>> {
    check_tag_len(tag.len())?;
    ctx.start(Direction::Decrypt, iv, associated_data.unwrap_or(&[]))?;
    let mut plaintext = ctx.update(ciphertext)?;

    if let Err(err) = ctx.finish_verify(tag) {
        plaintext.zeroize();
        return Err(err);
    }

    Ok(plaintext)
}

/// Encrypt and authenticate data with AES-GCM in one call
///
/// # Arguments
///
/// * `plaintext` - Data to encrypt
/// * `key` - 16, 24 or 32-byte AES key
/// * `iv` - Initialization vector of any non-zero length (12 bytes recommended)
/// * `associated_data` - Additional authenticated data (optional)
/// * `tag_len` - Tag length in bytes, 4 to 16
///
/// # Returns
///
/// The ciphertext and the tag
pub fn encrypt(
    plaintext: &[u8],
    key: &[u8],
    iv: &[u8],
    associated_data: Option<&[u8]>,
    tag_len: usize,
) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    let mut ctx = GcmContext::<AesKey>::with_key(key)?;
    seal(&mut ctx, plaintext, iv, associated_data, tag_len)
}

/// Decrypt and verify data with AES-GCM in one call
///
/// # Arguments
///
/// * `ciphertext` - Data to decrypt
/// * `key` - 16, 24 or 32-byte AES key
/// * `iv` - The IV used for encryption
/// * `associated_data` - The associated data used for encryption (optional)
/// * `tag` - The tag produced by encryption, possibly truncated
///
/// # Returns
///
/// Decrypted plaintext if authentication succeeds
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
    associated_data: Option<&[u8]>,
    tag: &[u8],
) -> CryptoResult<Vec<u8>> {
    let mut ctx = GcmContext::<AesKey>::with_key(key)?;
    open(&mut ctx, ciphertext, iv, associated_data, tag)
}
