use thiserror::Error;

/// Everything that can go wrong when tokenizing, detokenizing, or setting up
/// the primitives that do so.
///
/// Errors are data: every fallible operation in this crate returns the first
/// failure it encounters, untouched, and produces no partial output.
///
#[derive(Debug, Error)]
pub enum Error {
    /// The key handed to a constructor was not 16, 24, or 32 bytes long.
    ///
    /// There is no recovery for the primitive being constructed; the caller
    /// must supply a key of a valid AES length.  Keys of other lengths are
    /// never padded or truncated, because doing so silently divorces the
    /// encryptor's and decryptor's effective keys.
    #[error("invalid key length {0} (must be 16, 24, or 32 bytes)")]
    KeyLength(usize),

    /// The domain `radix^len` is below the minimum of 1000 values.
    ///
    /// Encrypting over a tiny domain is trivially brute-forceable, so the
    /// call is rejected before any cryptographic work happens.
    #[error("domain too small: radix {radix} over {len} numerals gives fewer than 1000 values")]
    DomainTooSmall {
        /// The radix of the rejected input.
        radix: u16,
        /// The numeral count of the rejected input.
        len: usize,
    },

    /// The input held more than 100,000 numerals.
    #[error("input too long: {0} numerals (maximum 100000)")]
    InputTooLong(usize),

    /// An alphabet with no symbols was supplied.
    #[error("alphabet has no symbols")]
    AlphabetEmpty,

    /// An alphabet failed validation for a reason other than being empty.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// A failure that the crate's own invariants say cannot happen.
    #[error("internal error: {0}")]
    Internal(String),
}
