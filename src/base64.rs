//! The base64 codec used for every token segment.
//!
//! Standard base64 ([RFC 4648 section 4]) is padded with `=`. The URL safe
//! flavour used by compact tokens substitutes `+` with `-` and `/` with `_`
//! and drops the padding.
//!
//! [RFC 4648 section 4]: <https://datatracker.ietf.org/doc/html/rfc4648#section-4>

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use thiserror::Error;

/// Returned when a string is not valid base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the string is not a valid base64 representation")]
pub struct InvalidBase64;

impl From<base64ct::Error> for InvalidBase64 {
    fn from(_: base64ct::Error) -> Self {
        Self
    }
}

/// Encodes `bytes` using the standard, padded alphabet.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    Base64::encode_string(bytes.as_ref())
}

/// Decodes padded, standard base64.
///
/// # Errors
///
/// Returns [`InvalidBase64`] on characters outside the alphabet, on wrong
/// padding and on non canonical trailing bits.
pub fn decode(encoded: impl AsRef<str>) -> Result<Vec<u8>, InvalidBase64> {
    Ok(Base64::decode_vec(encoded.as_ref())?)
}

/// Turns standard base64 text into its URL safe form.
///
/// `+` becomes `-`, `/` becomes `_` and trailing `=` padding is removed.
pub fn uri_encode(encoded: &str) -> String {
    encoded
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Turns URL safe base64 text back into standard, padded base64.
///
/// This is the exact inverse of [`uri_encode`].
pub fn uri_decode(encoded: &str) -> String {
    let mut out: String = encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    while out.len() % 4 != 0 {
        out.push('=');
    }

    out
}

/// Encodes `bytes` straight into the unpadded URL safe alphabet.
pub fn encode_url(bytes: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(bytes.as_ref())
}

/// Decodes unpadded URL safe base64.
///
/// # Errors
///
/// Returns [`InvalidBase64`] if `encoded` is not valid URL safe base64.
pub fn decode_url(encoded: impl AsRef<str>) -> Result<Vec<u8>, InvalidBase64> {
    Ok(Base64UrlUnpadded::decode_vec(encoded.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_vectors() {
        let cases = [
            ("", ""),
            ("f", "Zg=="),
            ("fo", "Zm8="),
            ("foo", "Zm9v"),
            ("foob", "Zm9vYg=="),
            ("fooba", "Zm9vYmE="),
            ("foobar", "Zm9vYmFy"),
        ];

        for (raw, encoded) in cases {
            assert_eq!(encode(raw), encoded);
            assert_eq!(decode(encoded).unwrap(), raw.as_bytes());
        }
    }

    #[test]
    fn uri_substitution() {
        let bytes = [0xfb, 0xff, 0xbf, 0x01];
        let std = encode(bytes);
        assert_eq!(std, "+/+/AQ==");

        let url = uri_encode(&std);
        assert_eq!(url, "-_-_AQ");
        assert_eq!(url, encode_url(bytes));

        assert_eq!(uri_decode(&url), std);
        assert_eq!(decode_url(&url).unwrap(), bytes);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(decode("Zm9v!"), Err(InvalidBase64));
        assert_eq!(decode("Zm9"), Err(InvalidBase64));
        assert_eq!(decode_url("Zm9v+"), Err(InvalidBase64));
        assert_eq!(decode_url("ehbGci$"), Err(InvalidBase64));
    }
}
