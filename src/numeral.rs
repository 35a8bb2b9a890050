//! Conversions between the three faces of a value: a character string over
//! some alphabet, a sequence of base-`radix` numerals, and a non-negative
//! big integer.
//!
//! Everything positional goes through [`BigUint`]: the alphanumeric alphabet
//! (radix 62) overflows a `u64` from eleven numerals, and inputs run far
//! longer than that.
//!

use num::bigint::BigUint;
use num::{Integer, ToPrimitive, Zero};

use crate::alphabet::Alphabet;

/// Map each character of `data` to its position in `alphabet`.
///
/// Characters outside the alphabet become numeral 0, keeping the conversion
/// total; callers that care about corruption detection must normalize or
/// authenticate their input before it gets here.
pub(crate) fn str_to_num(data: &[u8], alphabet: &Alphabet) -> Vec<u16> {
    data.iter()
        .map(|&byte| alphabet.numeral(byte).unwrap_or(0))
        .collect()
}

/// Render the first `length` numerals as their alphabet symbols.
///
/// An out-of-range numeral (or a missing one, if `numerals` runs short)
/// renders as the alphabet's first symbol.
pub(crate) fn num_to_str(numerals: &[u16], alphabet: &Alphabet, length: usize) -> Vec<u8> {
    let first = alphabet.symbol(0).unwrap_or(b'0');

    (0..length)
        .map(|i| {
            numerals
                .get(i)
                .and_then(|&numeral| alphabet.symbol(numeral))
                .unwrap_or(first)
        })
        .collect()
}

/// The big-endian positional value of a numeral sequence:
/// `Σ numerals[i] · radix^(n-1-i)`.  The empty sequence is 0.
pub(crate) fn num_radix(numerals: &[u16], radix: u16) -> BigUint {
    let radix = BigUint::from(radix);

    numerals.iter().fold(BigUint::zero(), |acc, &numeral| {
        acc * &radix + BigUint::from(numeral)
    })
}

/// The inverse of [`num_radix`]: exactly `m` numerals, most-significant
/// positions zero-filled.
pub(crate) fn str_radix(value: &BigUint, radix: u16, m: usize) -> Vec<u16> {
    let divisor = BigUint::from(radix);
    let mut rest = value.clone();
    let mut numerals = vec![0u16; m];

    for slot in numerals.iter_mut().rev() {
        let (quotient, remainder) = rest.div_rem(&divisor);
        // the remainder is < radix, so it always fits
        *slot = remainder.to_u16().unwrap_or(0);
        rest = quotient;
    }

    numerals
}

/// The [`num_radix`] value of `numerals` in big-endian byte form, left-padded
/// with zeroes to at least `⌈n · bit_length(radix) / 8⌉` bytes.  The empty
/// sequence encodes to empty bytes.
pub(crate) fn bytes_from_num(numerals: &[u16], radix: u16) -> Vec<u8> {
    if numerals.is_empty() {
        return Vec::new();
    }

    let bytes = num_radix(numerals, radix).to_bytes_be();
    let min_len = Integer::div_ceil(&(numerals.len() * bit_length(radix)), &8);

    if bytes.len() >= min_len {
        return bytes;
    }

    let mut padded = vec![0u8; min_len];
    padded[min_len - bytes.len()..].copy_from_slice(&bytes);
    padded
}

/// The number of bits needed to represent `radix - 1`; defined as 1 for the
/// degenerate radixes 0 and 1.
pub(crate) fn bit_length(radix: u16) -> usize {
    if radix <= 1 {
        return 1;
    }

    (radix - 1).ilog2() as usize + 1
}
