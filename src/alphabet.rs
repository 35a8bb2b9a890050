//! Ordered symbol sets that define the numeral ⇄ character mapping.
//!
//! An alphabet is the bridge between the string world and the numeral world:
//! its size is the radix, and the position of each symbol is the numeral that
//! symbol stands for.  Tokenizing picks one of three standard alphabets based
//! on what the data characters look like, so that a decimal input stays
//! decimal and a mixed input stays alphanumeric.
//!

use std::borrow::Cow;
use std::fmt;

use crate::Error;

const DIGITS: &str = "0123456789";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Sentinel in the reverse-lookup table for "byte is not in this alphabet"
const NOT_A_SYMBOL: u8 = 0xff;

/// An ordered set of distinct ASCII alphanumeric symbols.
///
/// The ordering matters: symbol number `i` *is* the numeral `i`, so two
/// alphabets with the same symbols in a different order produce different
/// (and incompatible) tokens.
///
/// Most callers never construct one of these directly -- [`Cipher`](crate::Cipher)
/// selects the right standard alphabet from the input's data characters.  An
/// explicit alphabet is only needed when detokenizing a token whose original
/// plaintext is unavailable and whose character variety doesn't pin down the
/// alphabet on its own.
///
#[derive(Clone)]
pub struct Alphabet {
    symbols: Cow<'static, str>,

    /// Reverse lookup: byte value -> symbol position, `NOT_A_SYMBOL` if absent
    index: [u8; 128],
}

impl Alphabet {
    /// Create an alphabet from an explicit, ordered symbol string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlphabetEmpty`] for an empty string, and
    /// [`Error::InvalidAlphabet`] if the string holds fewer than two symbols,
    /// a non-alphanumeric symbol, or the same symbol twice.
    ///
    pub fn new(symbols: &str) -> Result<Alphabet, Error> {
        if symbols.is_empty() {
            return Err(Error::AlphabetEmpty);
        }
        if symbols.len() < 2 {
            return Err(Error::InvalidAlphabet(format!(
                "need at least 2 symbols, got {}",
                symbols.len()
            )));
        }

        let mut index = [NOT_A_SYMBOL; 128];
        for (i, byte) in symbols.bytes().enumerate() {
            if !byte.is_ascii_alphanumeric() {
                return Err(Error::InvalidAlphabet(format!(
                    "symbol {:?} is not ASCII alphanumeric",
                    char::from(byte)
                )));
            }
            if index[usize::from(byte)] != NOT_A_SYMBOL {
                return Err(Error::InvalidAlphabet(format!(
                    "symbol {:?} appears more than once",
                    char::from(byte)
                )));
            }
            #[allow(clippy::cast_possible_truncation)] // at most 62 alphanumeric bytes exist
            {
                index[usize::from(byte)] = i as u8;
            }
        }

        Ok(Alphabet {
            symbols: Cow::Owned(symbols.to_string()),
            index,
        })
    }

    /// The decimal alphabet `0-9` (radix 10).
    #[must_use]
    pub fn digits() -> Alphabet {
        Alphabet::from_static(DIGITS)
    }

    /// The letter alphabet `A-Z` then `a-z` (radix 52).
    #[must_use]
    pub fn letters() -> Alphabet {
        Alphabet::from_static(LETTERS)
    }

    /// The full alphanumeric alphabet, digits then letters (radix 62).
    #[must_use]
    pub fn alphanumeric() -> Alphabet {
        Alphabet::from_static(ALPHANUMERIC)
    }

    /// Select the standard alphabet that covers the given data characters.
    ///
    /// Digits-only data gets the decimal alphabet, letters-only data the
    /// letter alphabet, and mixed data the full alphanumeric alphabet.  Empty
    /// data defaults to decimal; nothing will be encrypted in that case, so
    /// the choice is harmless.
    ///
    #[must_use]
    pub fn for_data(data: &[u8]) -> Alphabet {
        let has_digits = data.iter().any(u8::is_ascii_digit);
        let has_letters = data.iter().any(u8::is_ascii_alphabetic);

        match (has_digits, has_letters) {
            (true, true) => Alphabet::alphanumeric(),
            (false, true) => Alphabet::letters(),
            _ => Alphabet::digits(),
        }
    }

    /// The number of symbols in this alphabet.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // construction caps symbols at 62
    pub fn radix(&self) -> u16 {
        self.symbols.len() as u16
    }

    /// The symbols, in numeral order.
    #[must_use]
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// The numeral that `byte` stands for, if it is one of our symbols.
    pub(crate) fn numeral(&self, byte: u8) -> Option<u16> {
        let i = *self.index.get(usize::from(byte))?;
        (i != NOT_A_SYMBOL).then(|| u16::from(i))
    }

    /// The symbol for `numeral`, if the numeral is in range.
    pub(crate) fn symbol(&self, numeral: u16) -> Option<u8> {
        self.symbols.as_bytes().get(usize::from(numeral)).copied()
    }

    fn from_static(symbols: &'static str) -> Alphabet {
        let mut index = [NOT_A_SYMBOL; 128];
        for (i, byte) in symbols.bytes().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // at most 62 alphanumeric bytes exist
            {
                index[usize::from(byte)] = i as u8;
            }
        }

        Alphabet {
            symbols: Cow::Borrowed(symbols),
            index,
        }
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Alphabet) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.symbols).finish()
    }
}
