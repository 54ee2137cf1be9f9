//! GHASH Universal Hash Implementation
//!
//! Incremental GHASH over associated data followed by ciphertext and a final
//! length block, as specified in NIST SP 800-38D.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::gf128::{block_to_element, gf128_mul};
use crate::cipher::BLOCK_SIZE;
use crate::error::{error_codes, CryptoError, CryptoResult};

/// GHASH state for incremental hashing
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GHash {
    /// Hash subkey H
    h: u128,
    /// Running accumulator Y
    y: u128,
    /// Buffer for a partial block
    buffer: [u8; BLOCK_SIZE],
    /// Number of bytes in the buffer
    buffer_len: usize,
    /// Associated data processed, in bits
    aad_bits: u64,
    /// Ciphertext processed, in bits
    ct_bits: u64,
    /// Set once ciphertext has been absorbed
    aad_closed: bool,
}

impl std::fmt::Debug for GHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GHash")
            .field("aad_bits", &self.aad_bits)
            .field("ct_bits", &self.ct_bits)
            .field("aad_closed", &self.aad_closed)
            .finish_non_exhaustive()
    }
}

impl GHash {
    /// Create a new GHASH state keyed with the subkey `h`
    pub fn new(h: u128) -> Self {
        Self {
            h,
            y: 0,
            buffer: [0; BLOCK_SIZE],
            buffer_len: 0,
            aad_bits: 0,
            ct_bits: 0,
            aad_closed: false,
        }
    }

    /// Associated data absorbed so far, in bits
    pub fn aad_bits(&self) -> u64 {
        self.aad_bits
    }

    /// Ciphertext absorbed so far, in bits
    pub fn ct_bits(&self) -> u64 {
        self.ct_bits
    }

    /// Absorb a chunk of associated data.
    ///
    /// Consecutive calls concatenate. Fails with `InvalidState` once
    /// ciphertext has been absorbed.
    pub fn absorb_aad(&mut self, chunk: &[u8]) -> CryptoResult<()> {
        if self.aad_closed {
            return Err(CryptoError::invalid_state(
                "absorb_aad",
                "ciphertext has already been absorbed",
            ));
        }

        self.aad_bits = add_bits(self.aad_bits, chunk.len(), "associated data")?;
        self.absorb(chunk);
        Ok(())
    }

    /// Absorb a chunk of ciphertext, closing the associated data section
    pub fn absorb_ciphertext(&mut self, chunk: &[u8]) -> CryptoResult<()> {
        let ct_bits = add_bits(self.ct_bits, chunk.len(), "ciphertext")?;

        if !self.aad_closed {
            self.flush_partial();
            self.aad_closed = true;
        }

        self.ct_bits = ct_bits;
        self.absorb(chunk);
        Ok(())
    }

    /// Absorb the length block and return the hash value
    pub fn finalize(mut self) -> u128 {
        self.flush_partial();

        let mut length_block = [0u8; BLOCK_SIZE];
        length_block[..8].copy_from_slice(&self.aad_bits.to_be_bytes());
        length_block[8..].copy_from_slice(&self.ct_bits.to_be_bytes());
        self.process_block(&length_block);

        self.y
    }

    /// Y = (Y ^ block) * H
    fn process_block(&mut self, block: &[u8; BLOCK_SIZE]) {
        self.y = gf128_mul(self.y ^ block_to_element(block), self.h);
    }

    fn absorb(&mut self, data: &[u8]) {
        let mut offset = 0;

        // Complete any buffered partial block first
        if self.buffer_len > 0 {
            let take = std::cmp::min(BLOCK_SIZE - self.buffer_len, data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            offset += take;

            if self.buffer_len == BLOCK_SIZE {
                let block = self.buffer;
                self.process_block(&block);
                self.buffer_len = 0;
            }
        }

        let mut blocks = data[offset..].chunks_exact(BLOCK_SIZE);
        for chunk in &mut blocks {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.process_block(&block);
        }

        let rest = blocks.remainder();
        if !rest.is_empty() {
            self.buffer[..rest.len()].copy_from_slice(rest);
            self.buffer_len = rest.len();
        }
    }

    /// Zero-pad and absorb a pending partial block
    fn flush_partial(&mut self) {
        if self.buffer_len > 0 {
            self.buffer[self.buffer_len..].fill(0);
            let block = self.buffer;
            self.process_block(&block);
            self.buffer.zeroize();
            self.buffer_len = 0;
        }
    }
}

fn add_bits(current: u64, len: usize, what: &str) -> CryptoResult<u64> {
    (len as u64)
        .checked_mul(8)
        .and_then(|bits| current.checked_add(bits))
        .ok_or_else(|| {
            CryptoError::resource_exhaustion(
                what,
                "bit length exceeds 2^64 - 1",
                error_codes::GCM_LENGTH_OVERFLOW,
            )
        })
}

/// One-shot GHASH of `aad` and `ciphertext` under `h`
pub fn ghash(h: u128, aad: &[u8], ciphertext: &[u8]) -> CryptoResult<u128> {
    let mut state = GHash::new(h);
    state.absorb_aad(aad)?;
    state.absorb_ciphertext(ciphertext)?;
    Ok(state.finalize())
}
