//! Conversion between the DER `ECDSA-Sig-Value` produced by the signer and
//! the fixed width `R || S` form that JWS uses ([RFC 7518 section 3.4]).
//!
//! [RFC 7518 section 3.4]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.4>

use der::{asn1::UintRef, Decode as _, Encode as _, Sequence};

use crate::crypto::{Error, Result};

/// `ECDSA-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }`
#[derive(Debug, Clone, Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

/// Re-encodes a DER signature as `R || S`, each left padded with zeros to
/// `width` bytes.
pub(crate) fn der_to_raw(der: &[u8], width: usize) -> Result<Vec<u8>> {
    let sig = EcdsaSigValue::from_der(der)?;
    let mut raw = vec![0u8; 2 * width];

    for (component, out) in [sig.r, sig.s].iter().zip(raw.chunks_exact_mut(width)) {
        let bytes = component.as_bytes();
        if bytes.len() > width {
            return Err(Error::ComponentTooLong {
                width,
                actual: bytes.len(),
            });
        }
        out[width - bytes.len()..].copy_from_slice(bytes);
    }

    Ok(raw)
}

/// Splits `R || S` into its halves and encodes them as DER.
///
/// Returns `None` if `raw` is not exactly twice `width` bytes long.
pub(crate) fn raw_to_der(raw: &[u8], width: usize) -> Option<Vec<u8>> {
    if width == 0 || raw.len() != 2 * width {
        return None;
    }

    let (r, s) = raw.split_at(width);
    let sig = EcdsaSigValue {
        r: UintRef::new(r).ok()?,
        s: UintRef::new(s).ok()?,
    };

    sig.to_der().ok()
}
