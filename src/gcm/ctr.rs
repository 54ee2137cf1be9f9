//! Counter-mode keystream and initial counter block derivation

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::gf128::element_to_block;
use super::ghash::GHash;
use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::{error_codes, CryptoError, CryptoResult};

/// IV size for which J0 is formed by direct concatenation
pub const STANDARD_IV_SIZE: usize = 12;

/// How an IV is turned into the initial counter block
#[derive(Debug, Clone, Copy)]
pub enum IvLayout<'a> {
    /// 96-bit IV: J0 = IV || 0^31 || 1
    Direct(&'a [u8; STANDARD_IV_SIZE]),
    /// Any other length: J0 = GHASH_H(IV || pad || 0^64 || [len(IV)]_64)
    Hashed(&'a [u8]),
}

impl<'a> IvLayout<'a> {
    /// Classify `iv`. An empty IV is rejected.
    pub fn classify(iv: &'a [u8]) -> CryptoResult<Self> {
        if iv.is_empty() {
            return Err(CryptoError::InvalidParameter {
                parameter: "iv".to_string(),
                expected: "at least 1 byte".to_string(),
                actual: "0 bytes".to_string(),
                error_code: error_codes::GCM_INVALID_IV_SIZE,
            });
        }

        Ok(match <&[u8; STANDARD_IV_SIZE]>::try_from(iv) {
            Ok(direct) => IvLayout::Direct(direct),
            Err(_) => IvLayout::Hashed(iv),
        })
    }
}

/// Derive the initial counter block J0 from `iv` under the hash subkey `h`
pub fn derive_j0(h: u128, iv: &[u8]) -> CryptoResult<[u8; BLOCK_SIZE]> {
    match IvLayout::classify(iv)? {
        IvLayout::Direct(iv) => {
            let mut j0 = [0u8; BLOCK_SIZE];
            j0[..STANDARD_IV_SIZE].copy_from_slice(iv);
            j0[BLOCK_SIZE - 1] = 1;
            Ok(j0)
        }
        IvLayout::Hashed(iv) => {
            let mut state = GHash::new(h);
            state.absorb_ciphertext(iv)?;
            Ok(element_to_block(state.finalize()))
        }
    }
}

/// Increment the low 32 bits of a counter block, modulo 2^32
#[inline]
pub fn inc32(counter: &mut [u8; BLOCK_SIZE]) {
    let mut low = [0u8; 4];
    low.copy_from_slice(&counter[12..]);
    let next = u32::from_be_bytes(low).wrapping_add(1);
    counter[12..].copy_from_slice(&next.to_be_bytes());
}

/// XOR `keystream` into `data`. Both slices must have the same length.
#[inline]
pub fn xor_into(data: &mut [u8], keystream: &[u8]) {
    debug_assert_eq!(data.len(), keystream.len());
    for (d, k) in data.iter_mut().zip(keystream) {
        *d ^= k;
    }
}

/// Counter-mode keystream that may be consumed in arbitrary slices
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CounterKeystream {
    /// Next counter block to encrypt
    counter: [u8; BLOCK_SIZE],
    /// Current keystream block
    block: [u8; BLOCK_SIZE],
    /// Bytes of `block` already used
    used: usize,
}

impl std::fmt::Debug for CounterKeystream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterKeystream")
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

impl CounterKeystream {
    /// Start the keystream at the counter block following `j0`
    pub fn new(j0: &[u8; BLOCK_SIZE]) -> Self {
        let mut counter = *j0;
        inc32(&mut counter);
        Self {
            counter,
            block: [0; BLOCK_SIZE],
            used: BLOCK_SIZE,
        }
    }

    /// XOR the next `data.len()` keystream bytes into `data`
    pub fn apply<C: BlockCipher + ?Sized>(&mut self, cipher: &C, data: &mut [u8]) {
        let mut rest = data;
        while !rest.is_empty() {
            if self.used == BLOCK_SIZE {
                self.refill(cipher);
            }

            let take = std::cmp::min(BLOCK_SIZE - self.used, rest.len());
            let (head, tail) = rest.split_at_mut(take);
            xor_into(head, &self.block[self.used..self.used + take]);
            self.used += take;
            rest = tail;
        }
    }

    /// Produce exactly `len` keystream bytes
    pub fn keystream<C: BlockCipher + ?Sized>(&mut self, cipher: &C, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.apply(cipher, &mut out);
        out
    }

    fn refill<C: BlockCipher + ?Sized>(&mut self, cipher: &C) {
        self.block = self.counter;
        cipher.encrypt_block(&mut self.block);
        inc32(&mut self.counter);
        self.used = 0;
    }
}
