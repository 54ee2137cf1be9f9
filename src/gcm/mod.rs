//! Galois/Counter Mode Implementation
//!
//! This module implements GCM as specified in NIST SP 800-38D: counter-mode
//! encryption combined with the GHASH universal hash over GF(2^128), giving
//! confidentiality for the message and integrity for both the message and
//! its associated data.
//!
//! The engine is generic over any [`BlockCipher`](crate::cipher::BlockCipher)
//! and supports streaming in arbitrary chunk sizes, IVs of any non-zero
//! length and tags truncated to 4..=16 bytes.

mod aead;
mod context;
pub mod ctr;
pub mod gf128;
pub mod ghash;
pub mod tag;

pub use aead::{decrypt, encrypt, AesGcm};
pub use context::{Direction, GcmContext, GcmState, MAX_AAD_SIZE, MAX_MESSAGE_SIZE};
pub use ctr::{derive_j0, xor_into, CounterKeystream, IvLayout, STANDARD_IV_SIZE};
pub use gf128::gf128_mul;
pub use ghash::GHash;
pub use tag::{DEFAULT_TAG_SIZE, MIN_TAG_SIZE};
