//! Authentication tag computation, truncation and verification

use subtle::ConstantTimeEq;

use super::gf128::element_to_block;
use crate::cipher::BLOCK_SIZE;
use crate::error::{CryptoError, CryptoResult};

/// Full (untruncated) tag size in bytes
pub const DEFAULT_TAG_SIZE: usize = BLOCK_SIZE;

/// Shortest tag accepted, in bytes
pub const MIN_TAG_SIZE: usize = 4;

/// Reject tag lengths outside 4..=16 bytes
pub fn check_tag_len(tag_len: usize) -> CryptoResult<()> {
    if (MIN_TAG_SIZE..=DEFAULT_TAG_SIZE).contains(&tag_len) {
        Ok(())
    } else {
        Err(CryptoError::invalid_tag_length(tag_len))
    }
}

/// Full tag: E(K, J0) ^ S
pub fn compute_tag(ek_j0: &[u8; BLOCK_SIZE], s: u128) -> [u8; BLOCK_SIZE] {
    let mut tag = element_to_block(s);
    for (t, e) in tag.iter_mut().zip(ek_j0) {
        *t ^= e;
    }
    tag
}

/// Leading `tag_len` bytes of the full tag
pub fn truncate(full: &[u8; BLOCK_SIZE], tag_len: usize) -> CryptoResult<Vec<u8>> {
    check_tag_len(tag_len)?;
    Ok(full[..tag_len].to_vec())
}

/// Compare `supplied` against the matching prefix of `full` in constant time.
///
/// The length of `supplied` selects the truncation and must itself be a valid
/// tag length.
pub fn verify_tag(full: &[u8; BLOCK_SIZE], supplied: &[u8]) -> CryptoResult<()> {
    check_tag_len(supplied.len())?;

    if bool::from(full[..supplied.len()].ct_eq(supplied)) {
        Ok(())
    } else {
        Err(CryptoError::authentication_failure("GCM tag verification"))
    }
}
