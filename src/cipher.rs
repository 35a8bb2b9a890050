//! Where the `Cipher` lives.
//!

use crate::alphabet::Alphabet;
use crate::ff1::FF1;
use crate::numeral;
use crate::{format, Error};

/// Format-preserving tokenization of human-format strings.
///
/// A `Cipher` wraps an [`FF1`] primitive with the string handling that
/// real-world identifiers need: punctuation survives in place, the
/// alphanumeric characters are encrypted within whatever alphabet they
/// already use, and the output has exactly the shape of the input.  An SSN
/// tokenizes to something SSN-shaped, an email address to something
/// email-address-shaped.
///
/// Tokenization is deterministic by design: the same `(key, tweak,
/// plaintext)` always produces the same token, which is what lets a token
/// serve as a stable join key.  The flip side is that it is not semantically
/// secure -- equal plaintexts are visible as equal tokens -- and there is no
/// authentication.  Anyone who needs tamper detection must layer a MAC over
/// the token.
///
/// A `Cipher` is immutable after construction and safe to share across
/// threads without locking.
///
/// # Examples
///
/// ```rust
/// use formcrypt::Cipher;
///
/// # fn main() -> Result<(), formcrypt::Error> {
/// let key = [0u8; 32];
/// let cipher = Cipher::new(&key, b"tenant-1234|customer.ssn")?;
///
/// let token = cipher.tokenize("123-45-6789")?;
/// assert_eq!(11, token.len());
/// assert_eq!(Some('-'), token.chars().nth(3));
/// assert_eq!(Some('-'), token.chars().nth(6));
///
/// let recovered = cipher.detokenize(&token, Some("123-45-6789"))?;
/// assert_eq!("123-45-6789", recovered);
/// # Ok(())
/// # }
/// ```
///
#[derive(Debug)]
pub struct Cipher {
    ff1: FF1,
}

impl Cipher {
    /// Create a new `Cipher` from a raw key and a tweak.
    ///
    /// The key must be 16, 24, or 32 bytes (AES-128/192/256).  The tweak is
    /// public and binds tokens to a context: the same key with different
    /// tweaks produces unrelated tokens, so give each tenant, column, or
    /// data domain its own.
    ///
    /// # Errors
    ///
    /// [`Error::KeyLength`] if the key is of any other length.
    ///
    pub fn new(key: &[u8], tweak: &[u8]) -> Result<Cipher, Error> {
        Ok(Cipher {
            ff1: FF1::new(key, tweak)?,
        })
    }

    /// Encrypt `plaintext` while preserving its format.
    ///
    /// Non-alphanumeric bytes stay exactly where they are; the alphanumeric
    /// ones are encrypted within the alphabet they collectively span
    /// (decimal, letters, or full alphanumeric).  The token has the same
    /// byte length as the input.
    ///
    /// # Errors
    ///
    /// [`Error::DomainTooSmall`] when the data characters are too few for
    /// their alphabet (fewer than 1000 possible values), and
    /// [`Error::InputTooLong`] past 100,000 data characters.  No token is
    /// produced on error.
    ///
    pub fn tokenize(&self, plaintext: &str) -> Result<String, Error> {
        let (mask, data) = format::separate(plaintext.as_bytes());
        let alphabet = Alphabet::for_data(&data);

        let numerals = numeral::str_to_num(&data, &alphabet);
        let encrypted = self.ff1.encrypt(&numerals, alphabet.radix())?;
        let token_data = numeral::num_to_str(&encrypted, &alphabet, data.len());

        into_string(format::reconstruct(&token_data, &mask, plaintext.as_bytes()))
    }

    /// Recover the plaintext behind `token`.
    ///
    /// The alphabet must match the one `tokenize` picked, and the token
    /// alone may not pin it down (a token of `77239` could have come from a
    /// decimal *or* an alphanumeric plaintext).  Pass the original plaintext
    /// -- or any string with the same character mix -- as `original_hint`
    /// and the alphabet is re-derived from it; with `None`, the alphabet is
    /// derived from the token itself.
    ///
    /// Use [`detokenize_with_alphabet`](Cipher::detokenize_with_alphabet) to
    /// name the alphabet outright.
    ///
    /// # Errors
    ///
    /// As for [`tokenize`](Cipher::tokenize).
    ///
    pub fn detokenize(&self, token: &str, original_hint: Option<&str>) -> Result<String, Error> {
        let alphabet = match original_hint {
            Some(hint) if !hint.is_empty() => {
                let (_, hint_data) = format::separate(hint.as_bytes());
                Alphabet::for_data(&hint_data)
            }
            _ => {
                let (_, token_data) = format::separate(token.as_bytes());
                Alphabet::for_data(&token_data)
            }
        };

        self.detokenize_with_alphabet(token, &alphabet)
    }

    /// Recover the plaintext behind `token`, decrypting within an explicit
    /// alphabet.
    ///
    /// # Errors
    ///
    /// As for [`tokenize`](Cipher::tokenize).
    ///
    pub fn detokenize_with_alphabet(
        &self,
        token: &str,
        alphabet: &Alphabet,
    ) -> Result<String, Error> {
        let (mask, data) = format::separate(token.as_bytes());

        let numerals = numeral::str_to_num(&data, alphabet);
        let decrypted = self.ff1.decrypt(&numerals, alphabet.radix())?;
        let plain_data = numeral::num_to_str(&decrypted, alphabet, data.len());

        into_string(format::reconstruct(&plain_data, &mask, token.as_bytes()))
    }

    /// The underlying [`FF1`] primitive, for callers that have already done
    /// their own format handling and want to work on numeral sequences
    /// directly.
    #[must_use]
    pub fn ff1(&self) -> &FF1 {
        &self.ff1
    }
}

/// Reassembled output is original bytes at format positions plus ASCII
/// alphabet symbols at data positions, so UTF-8 validity is inherited from
/// the input; a failure here is a bug, not a caller error.
fn into_string(bytes: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(bytes)
        .map_err(|e| Error::Internal(format!("reconstructed token is not UTF-8 ({e})")))
}
