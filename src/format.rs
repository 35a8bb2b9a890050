//! Splitting human-format strings into format and data streams.
//!
//! Real-world identifiers carry punctuation that must survive encryption
//! byte-for-byte: the hyphens in an SSN, the `@` and dots in an email
//! address.  This module separates a string into a boolean format mask plus
//! the run of data characters, and reassembles a string from an encrypted
//! data run and the mask.  Both directions are total functions; nothing in
//! here can fail.
//!

/// Split `s` into a format mask and its data characters.
///
/// A byte is data iff it is ASCII alphanumeric; every other byte (including
/// anything non-ASCII) is format, and `mask[i]` is `true` for it.  The data
/// bytes come back concatenated in input order.
pub(crate) fn separate(s: &[u8]) -> (Vec<bool>, Vec<u8>) {
    let mut mask = vec![false; s.len()];
    let mut data = Vec::with_capacity(s.len());

    for (i, &byte) in s.iter().enumerate() {
        if byte.is_ascii_alphanumeric() {
            data.push(byte);
        } else {
            mask[i] = true;
        }
    }

    (mask, data)
}

/// Reassemble a string from encrypted data characters and a format mask.
///
/// Format positions take the byte `original` had there; data positions take
/// the next byte of `data`.  Should `data` run short, the remaining data
/// positions are filled with `'0'` -- the encrypt and decrypt paths share
/// this fallback so a short run still round-trips consistently.
pub(crate) fn reconstruct(data: &[u8], mask: &[bool], original: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(mask.len());
    let mut next_data = data.iter();

    for (i, &is_format) in mask.iter().enumerate() {
        if is_format {
            result.push(original[i]);
        } else {
            result.push(next_data.next().copied().unwrap_or(b'0'));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssn_splits_into_mask_and_digits() {
        let (mask, data) = separate(b"123-45-6789");

        assert_eq!(b"123456789".to_vec(), data);
        assert_eq!(
            vec![false, false, false, true, false, false, true, false, false, false, false],
            mask
        );
    }

    #[test]
    fn email_keeps_at_and_dot_as_format() {
        let (mask, data) = separate(b"user@domain.com");

        assert_eq!(b"userdomaincom".to_vec(), data);
        assert!(mask[4]);
        assert!(mask[11]);
        assert_eq!(2, mask.iter().filter(|m| **m).count());
    }

    #[test]
    fn all_format_input_has_no_data() {
        let (mask, data) = separate(b"---");

        assert!(data.is_empty());
        assert_eq!(vec![true, true, true], mask);
    }

    #[test]
    fn non_ascii_bytes_are_format() {
        let (mask, data) = separate("naïve1".as_bytes());

        // 'ï' is two bytes in UTF-8, both format
        assert_eq!(b"nave1".to_vec(), data);
        assert_eq!(2, mask.iter().filter(|m| **m).count());
    }

    #[test]
    fn reconstruct_inverts_separate() {
        let original = b"123-45-6789";
        let (mask, data) = separate(original);

        assert_eq!(original.to_vec(), reconstruct(&data, &mask, original));
    }

    #[test]
    fn reconstruct_places_new_data_around_format() {
        let (mask, _) = separate(b"123-45-6789");

        assert_eq!(
            b"987-65-4321".to_vec(),
            reconstruct(b"987654321", &mask, b"123-45-6789")
        );
    }

    #[test]
    fn short_data_falls_back_to_zero() {
        let (mask, _) = separate(b"12-34");

        assert_eq!(b"98-00".to_vec(), reconstruct(b"98", &mask, b"12-34"));
    }

    #[test]
    fn empty_input_round_trips() {
        let (mask, data) = separate(b"");

        assert!(mask.is_empty());
        assert!(data.is_empty());
        assert!(reconstruct(&data, &mask, b"").is_empty());
    }

    quickcheck! {
        fn every_byte_is_format_or_data(bytes: Vec<u8>) -> bool {
            let (mask, data) = separate(&bytes);

            mask.len() == bytes.len()
                && data.len() + mask.iter().filter(|m| **m).count() == bytes.len()
        }

        fn reconstructing_own_data_is_identity(bytes: Vec<u8>) -> bool {
            let (mask, data) = separate(&bytes);

            reconstruct(&data, &mask, &bytes) == bytes
        }
    }
}
