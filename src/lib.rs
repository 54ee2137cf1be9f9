/*!
 * QaSa GCM Engine
 *
 * A streaming Galois/Counter Mode implementation (NIST SP 800-38D) over a
 * pluggable 128-bit block cipher, with AES-128/192/256 bindings.
 *
 * The crate provides:
 *
 * - [`GcmContext`], a reusable streaming context that binds a key once and
 *   runs any number of encrypt or decrypt operations in arbitrary chunks
 * - [`AesGcm`], a shareable key handle with one-shot helpers
 * - [`self_test`], the known-answer self-test over published GCM vectors
 *
 * IVs of any non-zero length are accepted and tags may be truncated to
 * between 4 and 16 bytes.
 */

/// Block cipher abstraction and AES bindings
pub mod cipher;

/// Common error types for the engine
pub mod error;

/// GCM mode: GHASH, counter keystream, tags and the streaming context
pub mod gcm;

/// Security framework including constant-time verification
pub mod security;

/// Known-answer self-test
pub mod selftest;

pub use cipher::{AesKey, BindKey, BlockCipher, BLOCK_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use gcm::{AesGcm, Direction, GcmContext, GcmState};
pub use selftest::self_test;

/// Initialize the engine.
///
/// Runs the known-answer self-test once. Callers that need assurance the
/// block cipher backend is sound should call this before first use.
///
/// # Example
///
/// ```
/// use qasa_gcm::prelude::*;
///
/// fn main() -> Result<(), CryptoError> {
///     init()?;
///
///     let mut ctx = GcmContext::<AesKey>::with_key(&[0u8; 16])?;
///     ctx.start(Direction::Encrypt, &[0u8; 12], b"")?;
///     let tag = ctx.finish(16)?;
///     assert_eq!(tag.len(), 16);
///     Ok(())
/// }
/// ```
pub fn init() -> CryptoResult<()> {
    self_test()
}

/// The most commonly used types in one import
pub mod prelude {
    pub use crate::cipher::{AesKey, BindKey, BlockCipher};
    pub use crate::error::{CryptoError, CryptoResult};
    pub use crate::gcm::{
        decrypt, encrypt, AesGcm, Direction, GcmContext, GcmState, DEFAULT_TAG_SIZE,
        STANDARD_IV_SIZE,
    };
    pub use crate::init;
    pub use crate::self_test;
}
