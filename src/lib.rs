#![doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

mod alphabet;
mod cipher;
mod error;
mod ff1;
mod format;
mod numeral;
mod round;

#[doc(inline)]
pub use {alphabet::Alphabet, cipher::Cipher, error::Error, ff1::FF1};

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

// Tells unused_crate_dependencies to STFU about the dev dependencies that
// only the tests/ and benches/ targets exercise
#[cfg(test)]
use {criterion as _, hex as _, rand as _, serde as _, serde_json as _};
