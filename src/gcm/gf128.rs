//! Arithmetic in GF(2^128) as used by GHASH
//!
//! Field elements use the GCM bit order: bit 0 is the most significant bit of
//! the first byte, so a 16-byte block maps onto a `u128` with
//! `u128::from_be_bytes` and the coefficient of x^i sits at bit `127 - i`.

/// Reduction constant for x^128 + x^7 + x^2 + x + 1 in reflected bit order
const R: u128 = 0xe1 << 120;

/// Convert a 16-byte block into a field element
#[inline]
pub fn block_to_element(block: &[u8; 16]) -> u128 {
    u128::from_be_bytes(*block)
}

/// Convert a field element back into a 16-byte block
#[inline]
pub fn element_to_block(x: u128) -> [u8; 16] {
    x.to_be_bytes()
}

/// Multiply two field elements.
///
/// Shift-and-add over all 128 bits of `x` with mask selection in place of
/// branches, so the sequence of operations is the same for every pair of
/// operands.
pub fn gf128_mul(x: u128, y: u128) -> u128 {
    let mut z = 0u128;
    let mut v = y;

    for i in (0..128).rev() {
        let bit = (x >> i) & 1;
        z ^= v & 0u128.wrapping_sub(bit);

        let carry = v & 1;
        v = (v >> 1) ^ (R & 0u128.wrapping_sub(carry));
    }

    z
}
