//! The FF1 Feistel network over numeral sequences.
//!

use std::fmt;

use num::bigint::BigUint;

use crate::round::{self, Aes};
use crate::Error;

/// FF1 runs ten Feistel rounds, per NIST SP 800-38G
const ROUNDS: u8 = 10;

/// Inputs above this many numerals are rejected outright
pub(crate) const MAX_INPUT_LEN: usize = 100_000;

/// The smallest domain (`radix^n`) we are willing to permute
pub(crate) const MIN_DOMAIN: u32 = 1000;

/// The FF1 format-preserving encryption primitive over numeral sequences.
///
/// An `FF1` binds a key and a tweak together for its whole lifetime.  The
/// same key with a different tweak is a completely independent permutation,
/// which is how one key can safely cover many contexts (per-tenant,
/// per-column, and so on).
///
/// This is the low-level interface: inputs and outputs are sequences of
/// numerals in `[0, radix)`.  Callers working with formatted strings almost
/// always want [`Cipher`](crate::Cipher) instead, which handles the
/// string ⇄ numeral plumbing.
///
/// `FF1` is immutable after construction; sharing one instance across
/// threads needs no locking.
///
/// # Examples
///
/// ```rust
/// use formcrypt::FF1;
///
/// # fn main() -> Result<(), formcrypt::Error> {
/// let ff1 = FF1::new(&[0u8; 16], b"examples")?;
///
/// let numerals = vec![0u16, 1, 2, 3, 4, 5, 6, 7, 8, 9];
/// let encrypted = ff1.encrypt(&numerals, 10)?;
///
/// assert_eq!(numerals.len(), encrypted.len());
/// assert_eq!(numerals, ff1.decrypt(&encrypted, 10)?);
/// # Ok(())
/// # }
/// ```
///
pub struct FF1 {
    aes: Aes,
    tweak: Vec<u8>,
}

impl FF1 {
    /// Create a new FF1 primitive from a raw key and a tweak.
    ///
    /// The key must be exactly 16, 24, or 32 bytes, selecting AES-128,
    /// AES-192, or AES-256 respectively; the key schedule is computed once,
    /// here.  The tweak is a public value of any length (empty is fine) and
    /// is copied into the primitive.
    ///
    /// # Errors
    ///
    /// [`Error::KeyLength`] for a key of any other length.
    ///
    pub fn new(key: &[u8], tweak: &[u8]) -> Result<FF1, Error> {
        Ok(FF1 {
            aes: Aes::new(key)?,
            tweak: tweak.to_vec(),
        })
    }

    /// Encrypt a numeral sequence, producing one of the same length.
    ///
    /// For a fixed `(key, tweak, radix, n)` this is a permutation of the
    /// whole domain `{0, ..., radix^n - 1}`; [`decrypt`](FF1::decrypt) is its
    /// exact inverse.  An empty input comes back verbatim.
    ///
    /// # Errors
    ///
    /// [`Error::InputTooLong`] above 100,000 numerals, and
    /// [`Error::DomainTooSmall`] when `radix^n < 1000`, both raised before
    /// any cryptographic work.
    ///
    pub fn encrypt(&self, plaintext: &[u16], radix: u16) -> Result<Vec<u16>, Error> {
        let n = plaintext.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        check_domain(radix, n)?;

        let u = n / 2;
        let mut a = plaintext[..u].to_vec();
        let mut b = plaintext[u..].to_vec();

        for i in 0..ROUNDS {
            let c = round::round_output(&self.aes, &self.tweak, &b, i, a.len(), radix);

            let next_b = a
                .iter()
                .zip(&c)
                .map(|(&x, &y)| add_mod(x, y, radix))
                .collect();
            a = std::mem::replace(&mut b, next_b);
        }

        a.extend_from_slice(&b);
        Ok(a)
    }

    /// Decrypt a numeral sequence encrypted by [`encrypt`](FF1::encrypt)
    /// under the same key, tweak, and radix.
    ///
    /// # Errors
    ///
    /// Same guards as [`encrypt`](FF1::encrypt).
    ///
    pub fn decrypt(&self, ciphertext: &[u16], radix: u16) -> Result<Vec<u16>, Error> {
        let n = ciphertext.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        check_domain(radix, n)?;

        let u = n / 2;
        let mut a = ciphertext[..u].to_vec();
        let mut b = ciphertext[u..].to_vec();

        for i in (0..ROUNDS).rev() {
            // the current A was the previous round's B, so F runs over it
            let c = round::round_output(&self.aes, &self.tweak, &a, i, b.len(), radix);

            let prev_a = b
                .iter()
                .zip(&c)
                .map(|(&x, &y)| sub_mod(x, y, radix))
                .collect();
            b = std::mem::replace(&mut a, prev_a);
        }

        a.extend_from_slice(&b);
        Ok(a)
    }

    /// The tweak this primitive was constructed with.
    #[must_use]
    pub fn tweak(&self) -> &[u8] {
        &self.tweak
    }
}

impl fmt::Debug for FF1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FF1")
            .field("key", &"**REDACTED**")
            .field("tweak", &self.tweak)
            .finish()
    }
}

fn check_domain(radix: u16, n: usize) -> Result<(), Error> {
    if n > MAX_INPUT_LEN {
        return Err(Error::InputTooLong(n));
    }

    #[allow(clippy::cast_possible_truncation)] // n <= MAX_INPUT_LEN here
    let domain = BigUint::from(radix).pow(n as u32);
    if domain < BigUint::from(MIN_DOMAIN) {
        return Err(Error::DomainTooSmall { radix, len: n });
    }

    Ok(())
}

#[allow(clippy::cast_possible_truncation)] // the result of % radix fits u16
fn add_mod(x: u16, y: u16, radix: u16) -> u16 {
    ((u32::from(x) + u32::from(y)) % u32::from(radix)) as u16
}

#[allow(clippy::cast_possible_truncation)] // the result of % radix fits u16
fn sub_mod(x: u16, y: u16, radix: u16) -> u16 {
    ((u32::from(radix) + u32::from(x) - u32::from(y)) % u32::from(radix)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn ff1() -> FF1 {
        FF1::new(&hex!["2B7E151628AED2A6ABF7158809CF4F3C"], b"").unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn accepts_standard_key_lengths() {
            for len in [16usize, 24, 32] {
                assert!(FF1::new(&vec![0u8; len], b"tweak").is_ok());
            }
        }

        #[test]
        fn rejects_a_15_byte_key() {
            assert!(matches!(
                FF1::new(&[0u8; 15], b""),
                Err(Error::KeyLength(15))
            ));
        }

        #[test]
        fn rejects_a_17_byte_key() {
            assert!(matches!(
                FF1::new(&[0u8; 17], b""),
                Err(Error::KeyLength(17))
            ));
        }
    }

    mod guards {
        use super::*;

        #[test]
        fn empty_input_comes_back_verbatim() {
            assert_eq!(Vec::<u16>::new(), ff1().encrypt(&[], 10).unwrap());
            assert_eq!(Vec::<u16>::new(), ff1().decrypt(&[], 10).unwrap());
        }

        #[test]
        fn two_decimal_numerals_are_too_small() {
            assert!(matches!(
                ff1().encrypt(&[1, 2], 10),
                Err(Error::DomainTooSmall { radix: 10, len: 2 })
            ));
        }

        #[test]
        fn a_thousand_value_domain_is_accepted() {
            // 10^3 = 1000 sits exactly on the boundary, and the boundary
            // is inclusive
            assert!(ff1().encrypt(&[1, 2, 3], 10).is_ok());
        }

        #[test]
        fn single_numeral_is_always_too_small() {
            assert!(matches!(
                ff1().encrypt(&[5], 62),
                Err(Error::DomainTooSmall { radix: 62, len: 1 })
            ));
        }

        #[test]
        fn two_letters_clear_the_boundary() {
            // 52^2 = 2704
            assert!(ff1().encrypt(&[5, 6], 52).is_ok());
        }

        #[test]
        fn overlong_input_is_rejected() {
            let long = vec![0u16; MAX_INPUT_LEN + 1];

            assert!(matches!(
                ff1().encrypt(&long, 10),
                Err(Error::InputTooLong(len)) if len == MAX_INPUT_LEN + 1
            ));
        }

        #[test]
        fn decrypt_applies_the_same_guards() {
            assert!(matches!(
                ff1().decrypt(&[1, 2], 10),
                Err(Error::DomainTooSmall { .. })
            ));
        }
    }

    mod permutation {
        use super::*;

        #[test]
        fn encrypt_changes_the_input() {
            let plaintext = vec![0u16, 1, 2, 3, 4, 5, 6, 7, 8, 9];

            assert_ne!(plaintext, ff1().encrypt(&plaintext, 10).unwrap());
        }

        #[test]
        fn decrypt_inverts_encrypt() {
            let plaintext = vec![0u16, 1, 2, 3, 4, 5, 6, 7, 8, 9];
            let ff1 = ff1();

            let ciphertext = ff1.encrypt(&plaintext, 10).unwrap();

            assert_eq!(plaintext, ff1.decrypt(&ciphertext, 10).unwrap());
        }

        #[test]
        fn odd_lengths_round_trip() {
            let ff1 = ff1();

            for n in [3usize, 5, 7, 9, 11, 13] {
                let plaintext: Vec<u16> =
                    (0..n).map(|i| u16::try_from(i % 10).unwrap()).collect();
                let ciphertext = ff1.encrypt(&plaintext, 10).unwrap();

                assert_eq!(n, ciphertext.len());
                assert_eq!(plaintext, ff1.decrypt(&ciphertext, 10).unwrap());
            }
        }

        #[test]
        fn high_radix_round_trips() {
            let ff1 = ff1();
            let plaintext = vec![61u16, 0, 35, 10, 42, 9, 61, 17];

            let ciphertext = ff1.encrypt(&plaintext, 62).unwrap();

            assert!(ciphertext.iter().all(|&numeral| numeral < 62));
            assert_eq!(plaintext, ff1.decrypt(&ciphertext, 62).unwrap());
        }

        #[test]
        fn hex_three_numeral_domain_is_an_exact_permutation() {
            let ff1 = ff1();
            let mut seen = std::collections::HashSet::with_capacity(4096);

            for value in 0..4096u16 {
                let plaintext = [value >> 8 & 0xf, value >> 4 & 0xf, value & 0xf];
                let ciphertext = ff1.encrypt(&plaintext, 16).unwrap();

                assert!(seen.insert(ciphertext.clone()));
                assert_eq!(plaintext.to_vec(), ff1.decrypt(&ciphertext, 16).unwrap());
            }

            assert_eq!(4096, seen.len());
        }

        #[test]
        fn different_tweaks_are_independent_permutations() {
            let key = hex!["2B7E151628AED2A6ABF7158809CF4F3C"];
            let plaintext = vec![0u16, 1, 2, 3, 4, 5, 6, 7, 8, 9];

            let with_tweak = FF1::new(&key, b"test-tweak").unwrap();
            let without = FF1::new(&key, b"").unwrap();

            assert_ne!(
                with_tweak.encrypt(&plaintext, 10).unwrap(),
                without.encrypt(&plaintext, 10).unwrap()
            );
        }
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let rendered = format!("{:?}", ff1());

        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("2b7e"));
    }
}
