//! Streaming GCM context
//!
//! A [`GcmContext`] owns a bound block cipher and its hash subkey and runs one
//! operation at a time through `start`, any number of `update` calls and a
//! final `finish` (encrypt) or `finish_verify` (decrypt).

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::ctr::{derive_j0, CounterKeystream, STANDARD_IV_SIZE};
use super::gf128::block_to_element;
use super::ghash::GHash;
use super::tag::{check_tag_len, compute_tag, verify_tag};
use crate::cipher::{BindKey, BlockCipher, BLOCK_SIZE};
use crate::error::{error_codes, CryptoError, CryptoResult};

/// Largest associated data accepted per operation, in bytes (2^64 - 1 bits)
pub const MAX_AAD_SIZE: u64 = (1 << 61) - 1;

/// Largest message accepted per operation, in bytes (2^39 - 256 bits)
pub const MAX_MESSAGE_SIZE: u64 = (1 << 36) - 32;

/// Direction of a GCM operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => write!(f, "encrypt"),
            Direction::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Lifecycle state of a [`GcmContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GcmState {
    /// No key bound yet
    Uninitialized,
    /// Key bound, ready to start an operation
    KeyBound,
    /// An operation is in progress
    Active,
    /// The last operation has produced or checked its tag
    Finalized,
}

impl fmt::Display for GcmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcmState::Uninitialized => write!(f, "no key is bound"),
            GcmState::KeyBound => write!(f, "no operation has been started"),
            GcmState::Active => write!(f, "an operation is active"),
            GcmState::Finalized => write!(f, "the operation is finalized"),
        }
    }
}

struct BoundKey<C> {
    cipher: C,
    h: u128,
}

impl<C> Drop for BoundKey<C> {
    fn drop(&mut self) {
        self.h.zeroize();
    }
}

struct Operation {
    direction: Direction,
    j0: Zeroizing<[u8; BLOCK_SIZE]>,
    keystream: CounterKeystream,
    ghash: GHash,
    message_len: u64,
}

/// Streaming GCM engine over a block cipher `C`.
///
/// # Examples
///
/// ```
/// use qasa_gcm::cipher::AesKey;
/// use qasa_gcm::gcm::{Direction, GcmContext};
///
/// let key = [0x42; 16];
/// let iv = [0x24; 12];
///
/// let mut ctx = GcmContext::<AesKey>::with_key(&key).unwrap();
/// ctx.start(Direction::Encrypt, &iv, b"header").unwrap();
/// let mut ciphertext = ctx.update(b"hello ").unwrap();
/// ciphertext.extend(ctx.update(b"world").unwrap());
/// let tag = ctx.finish(16).unwrap();
///
/// ctx.reset();
/// ctx.start(Direction::Decrypt, &iv, b"header").unwrap();
/// let plaintext = ctx.update(&ciphertext).unwrap();
/// ctx.finish_verify(&tag).unwrap();
/// assert_eq!(plaintext, b"hello world");
/// ```
pub struct GcmContext<C> {
    key: Option<BoundKey<C>>,
    operation: Option<Operation>,
    state: GcmState,
}

impl<C> fmt::Debug for GcmContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcmContext")
            .field("state", &self.state)
            .field("direction", &self.operation.as_ref().map(|op| op.direction))
            .finish_non_exhaustive()
    }
}

impl<C: BlockCipher> Default for GcmContext<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BlockCipher> GcmContext<C> {
    /// Create a context with no key bound
    pub fn new() -> Self {
        Self {
            key: None,
            operation: None,
            state: GcmState::Uninitialized,
        }
    }

    /// Create a context bound to an already expanded cipher
    pub fn with_cipher(cipher: C) -> Self {
        let mut ctx = Self::new();
        ctx.install(cipher);
        ctx
    }

    /// Create a context from a cipher and its precomputed hash subkey
    pub(crate) fn from_parts(cipher: C, h: u128) -> Self {
        Self {
            key: Some(BoundKey { cipher, h }),
            operation: None,
            state: GcmState::KeyBound,
        }
    }

    /// Bind a new cipher, replacing any previous key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` while an operation is active
    pub fn bind_cipher(&mut self, cipher: C) -> CryptoResult<()> {
        if self.state == GcmState::Active {
            return Err(self.misuse("bind_cipher"));
        }
        self.install(cipher);
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> GcmState {
        self.state
    }

    /// Direction of the active operation, if any
    pub fn direction(&self) -> Option<Direction> {
        self.operation.as_ref().map(|op| op.direction)
    }

    /// The bound cipher, if any
    pub fn cipher(&self) -> Option<&C> {
        self.key.as_ref().map(|key| &key.cipher)
    }

    /// Start an operation.
    ///
    /// Derives J0 from `iv` and absorbs all of `aad`. Only legal when a key is
    /// bound and no operation is active or awaiting `reset`.
    pub fn start(&mut self, direction: Direction, iv: &[u8], aad: &[u8]) -> CryptoResult<()> {
        let h = match (self.state, self.key.as_ref()) {
            (GcmState::KeyBound, Some(key)) => key.h,
            _ => return Err(self.misuse("start")),
        };

        if aad.len() as u64 > MAX_AAD_SIZE {
            return Err(CryptoError::resource_exhaustion(
                "associated data",
                "at most 2^61 - 1 bytes",
                error_codes::GCM_AAD_TOO_LONG,
            ));
        }

        let j0 = Zeroizing::new(derive_j0(h, iv)?);
        let mut ghash = GHash::new(h);
        ghash.absorb_aad(aad)?;
        let keystream = CounterKeystream::new(&j0);

        log::debug!(
            "GCM {} started: iv_len={} ({} J0), aad_len={}",
            direction,
            iv.len(),
            if iv.len() == STANDARD_IV_SIZE { "direct" } else { "hashed" },
            aad.len()
        );

        self.operation = Some(Operation {
            direction,
            j0,
            keystream,
            ghash,
            message_len: 0,
        });
        self.state = GcmState::Active;
        Ok(())
    }

    /// Transform `data` in place: plaintext to ciphertext when encrypting,
    /// ciphertext to plaintext when decrypting.
    ///
    /// Plaintext produced while decrypting is unauthenticated until
    /// [`finish_verify`](Self::finish_verify) succeeds.
    pub fn update_in_place(&mut self, data: &mut [u8]) -> CryptoResult<()> {
        if self.state != GcmState::Active {
            return Err(self.misuse("update"));
        }
        let (Some(key), Some(op)) = (self.key.as_ref(), self.operation.as_mut()) else {
            return Err(CryptoError::invalid_state("update", "no operation is active"));
        };

        let message_len = op
            .message_len
            .checked_add(data.len() as u64)
            .filter(|&len| len <= MAX_MESSAGE_SIZE)
            .ok_or_else(|| {
                CryptoError::resource_exhaustion(
                    "message",
                    "at most 2^36 - 32 bytes per IV",
                    error_codes::GCM_MESSAGE_TOO_LONG,
                )
            })?;

        // GHASH always covers the ciphertext side
        match op.direction {
            Direction::Encrypt => {
                op.keystream.apply(&key.cipher, data);
                op.ghash.absorb_ciphertext(data)?;
            }
            Direction::Decrypt => {
                op.ghash.absorb_ciphertext(data)?;
                op.keystream.apply(&key.cipher, data);
            }
        }

        op.message_len = message_len;
        Ok(())
    }

    /// Transform a chunk and return the result
    pub fn update(&mut self, input: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut output = input.to_vec();
        self.update_in_place(&mut output)?;
        Ok(output)
    }

    /// Transform `input` into `output`, which must have the same length
    pub fn update_into(&mut self, input: &[u8], output: &mut [u8]) -> CryptoResult<()> {
        if input.len() != output.len() {
            return Err(CryptoError::InvalidParameter {
                parameter: "output".to_string(),
                expected: format!("{} bytes", input.len()),
                actual: format!("{} bytes", output.len()),
                error_code: error_codes::GCM_BUFFER_MISMATCH,
            });
        }
        output.copy_from_slice(input);
        self.update_in_place(output)
    }

    /// Finish an encrypt operation and return the leading `tag_len` bytes of
    /// the tag.
    pub fn finish(&mut self, tag_len: usize) -> CryptoResult<Vec<u8>> {
        self.expect_active("finish", Direction::Encrypt)?;
        check_tag_len(tag_len)?;

        let full = self.take_full_tag()?;
        log::trace!("GCM encrypt finished with a {}-byte tag", tag_len);
        Ok(full[..tag_len].to_vec())
    }

    /// Finish a decrypt operation by checking `tag` in constant time.
    ///
    /// The tag length is taken from `tag`. On `AuthenticationFailure` every
    /// byte returned by earlier `update` calls must be discarded.
    pub fn finish_verify(&mut self, tag: &[u8]) -> CryptoResult<()> {
        self.expect_active("finish_verify", Direction::Decrypt)?;
        check_tag_len(tag.len())?;

        let full = self.take_full_tag()?;
        verify_tag(&full, tag).map_err(|err| {
            log::warn!("GCM tag mismatch; decrypted data must be discarded");
            err
        })
    }

    /// Abandon any operation and return to `KeyBound`
    pub fn reset(&mut self) {
        if matches!(self.state, GcmState::Active | GcmState::Finalized) {
            self.operation = None;
            self.state = GcmState::KeyBound;
        }
    }

    fn install(&mut self, cipher: C) {
        let mut zero = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&mut zero);
        let h = block_to_element(&zero);
        zero.zeroize();

        self.key = Some(BoundKey { cipher, h });
        self.operation = None;
        self.state = GcmState::KeyBound;
    }

    fn expect_active(&self, operation: &str, direction: Direction) -> CryptoResult<()> {
        match self.operation.as_ref() {
            Some(op) if self.state == GcmState::Active && op.direction == direction => Ok(()),
            Some(op) if self.state == GcmState::Active => Err(CryptoError::invalid_state(
                operation,
                &format!("a {} operation is active", op.direction),
            )),
            _ => Err(self.misuse(operation)),
        }
    }

    /// Consume the active operation and compute E(K, J0) ^ GHASH
    fn take_full_tag(&mut self) -> CryptoResult<[u8; BLOCK_SIZE]> {
        let (Some(key), Some(op)) = (self.key.as_ref(), self.operation.take()) else {
            return Err(CryptoError::invalid_state("finish", "no operation is active"));
        };
        self.state = GcmState::Finalized;

        let s = op.ghash.finalize();
        let mut ek_j0 = *op.j0;
        key.cipher.encrypt_block(&mut ek_j0);
        let tag = compute_tag(&ek_j0, s);
        ek_j0.zeroize();

        Ok(tag)
    }

    fn misuse(&self, operation: &str) -> CryptoError {
        CryptoError::invalid_state(operation, &self.state.to_string())
    }
}

impl<C: BindKey> GcmContext<C> {
    /// Create a context bound to raw key bytes
    pub fn with_key(key: &[u8]) -> CryptoResult<Self> {
        let mut ctx = Self::new();
        ctx.bind_key(key)?;
        Ok(ctx)
    }

    /// Expand `key` and bind it, replacing any previous key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` while an operation is active and
    /// `InvalidKeyLength` for keys the cipher does not accept. The context is
    /// unchanged on error.
    pub fn bind_key(&mut self, key: &[u8]) -> CryptoResult<()> {
        if self.state == GcmState::Active {
            return Err(self.misuse("bind_key"));
        }
        let cipher = C::bind_key(key)?;
        log::debug!("GCM context bound to a {}-bit key", key.len() * 8);
        self.install(cipher);
        Ok(())
    }
}
