/*!
 * Block cipher collaborator for the GCM engine
 *
 * GCM only needs a keyed forward permutation on 128-bit blocks. This module
 * defines that contract and implements it with the RustCrypto AES key
 * schedules for 128, 192 and 256-bit keys.
 */

mod block;

pub use block::*;
