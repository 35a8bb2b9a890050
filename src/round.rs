//! The per-round pseudo-random function at the heart of the Feistel network.
//!
//! Each round turns the current right half of the numeral sequence into a
//! fresh-looking left-half-sized numeral sequence, keyed by AES and
//! domain-separated by the round number and the caller's tweak.  The Feistel
//! structure around it is what makes this non-invertible function add up to
//! an invertible permutation.
//!

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use num::bigint::BigUint;
use num::Integer;
use zeroize::Zeroize;

use crate::numeral;
use crate::Error;

/// AES block size in bytes
pub(crate) const BLOCK_SIZE: usize = 16;

/// An AES key schedule of whichever width the caller's key selected.
///
/// Computed once at construction so that no call ever redoes the key
/// schedule, and so that an invalid key length is rejected before the
/// primitive exists at all.
///
pub(crate) enum Aes {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl Aes {
    /// Build the key schedule for a 16, 24, or 32 byte key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyLength`] for any other key length.  No padding, no
    /// truncation.
    ///
    pub(crate) fn new(key: &[u8]) -> Result<Aes, Error> {
        match key.len() {
            16 => Ok(Aes::Aes128(Aes128::new(GenericArray::from_slice(key)))),
            24 => Ok(Aes::Aes192(Aes192::new(GenericArray::from_slice(key)))),
            32 => Ok(Aes::Aes256(Aes256::new(GenericArray::from_slice(key)))),
            other => Err(Error::KeyLength(other)),
        }
    }

    /// Encrypt one 16-byte block in place.
    fn encrypt_block(&self, block: &mut [u8]) {
        let block = GenericArray::from_mut_slice(block);

        match self {
            Aes::Aes128(cipher) => cipher.encrypt_block(block),
            Aes::Aes192(cipher) => cipher.encrypt_block(block),
            Aes::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }
}

/// Compute the round function `F` for round `round` over the numerals
/// `input`, producing exactly `m` numerals in `[0, radix)`.
///
/// The construction:
///
/// 1. `Q` = four copies of the round number, then the tweak, then `input`
///    encoded as big-endian bytes, zero-padded up to a block boundary.
/// 2. `R` = AES-ECB of `Q` under the caller's key.
/// 3. `S` = the first `d` bytes of `R`, where `d` covers the `m` output
///    numerals and is widened to a minimum of 8 bytes whenever `R` has
///    that many.
/// 4. The output is `BE(S) mod radix^m`, decoded to `m` numerals.
///
pub(crate) fn round_output(
    aes: &Aes,
    tweak: &[u8],
    input: &[u16],
    round: u8,
    m: usize,
    radix: u16,
) -> Vec<u16> {
    let encoded = numeral::bytes_from_num(input, radix);

    let mut q = Vec::with_capacity(4 + tweak.len() + encoded.len() + BLOCK_SIZE);
    q.extend_from_slice(&[round; 4]);
    q.extend_from_slice(tweak);
    q.extend_from_slice(&encoded);
    q.resize(Integer::div_ceil(&q.len(), &BLOCK_SIZE) * BLOCK_SIZE, 0);

    for block in q.chunks_exact_mut(BLOCK_SIZE) {
        aes.encrypt_block(block);
    }

    let mut d = Integer::div_ceil(&(m * numeral::bit_length(radix)), &8).clamp(1, q.len());
    if d < 8 && q.len() >= 8 {
        d = 8;
    }

    let y = BigUint::from_bytes_be(&q[..d]);
    #[allow(clippy::cast_possible_truncation)] // m is capped at 100,000 well before here
    let c = y % BigUint::from(radix).pow(m as u32);
    let output = numeral::str_radix(&c, radix, m);

    // q held material derived from the caller's plaintext
    q.zeroize();

    output
}
