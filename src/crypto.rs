//! Cryptographic primitives.
//!
//! This module wraps the [RustCrypto] crates behind the small set of
//! operations the signing strategies need: HMAC, RSASSA-PKCS1-v1_5, ECDSA
//! and the loading of PEM encoded keys. Keys are parsed, used and dropped
//! within a single sign or verify call.
//!
//! [RustCrypto]: https://github.com/RustCrypto

pub(crate) mod ec;
pub(crate) mod hmac;
pub(crate) mod key;
pub(crate) mod rsa;

use thiserror::Error;

/// The result type used for cryptographic operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The errors that can be produced by the cryptographic backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The error returned if the key is invalid.
    #[error("invalid key length")]
    InvalidLength,

    /// RSA operation failed.
    #[error("an RSA operation failed: {0}")]
    Rsa(::rsa::Error),

    /// ECDSA signing failed.
    #[error("an ECDSA operation failed: {0}")]
    Ecdsa(signature::Error),

    /// The key material is not a valid elliptic curve key.
    #[error("invalid elliptic curve key: {0}")]
    EllipticCurve(elliptic_curve::Error),

    /// The key is not a PEM document.
    #[error("invalid PEM document: {0}")]
    Pem(der::pem::Error),

    /// A DER structure could not be parsed or encoded.
    #[error("invalid DER structure: {0}")]
    Der(der::Error),

    /// A PKCS#1 RSA key could not be parsed.
    #[error("invalid PKCS#1 key: {0}")]
    Pkcs1(::rsa::pkcs1::Error),

    /// A PKCS#8 private key could not be parsed.
    #[error("invalid PKCS#8 key: {0}")]
    Pkcs8(pkcs8::Error),

    /// A SubjectPublicKeyInfo public key could not be parsed.
    #[error("invalid public key: {0}")]
    Spki(pkcs8::spki::Error),

    /// A SEC1 EC private key could not be parsed.
    #[error("invalid SEC1 key: {0}")]
    Sec1(sec1::Error),

    /// The PEM label or the key algorithm is not one this crate handles.
    #[error("unsupported key type `{0}`")]
    UnsupportedKey(String),

    /// The key belongs to a different algorithm family.
    #[error("expected {expected} key")]
    KeyTypeMismatch {
        /// The family the algorithm needs.
        expected: &'static str,
    },

    /// A DER encoded ECDSA signature had an `r` or `s` wider than the curve.
    #[error("signature component is {actual} bytes wide, the curve allows {width}")]
    ComponentTooLong {
        /// The byte width of the curve.
        width: usize,
        /// The width of the component.
        actual: usize,
    },
}

impl From<digest::InvalidLength> for Error {
    fn from(_: digest::InvalidLength) -> Self {
        Self::InvalidLength
    }
}

impl From<::rsa::Error> for Error {
    fn from(x: ::rsa::Error) -> Self {
        Self::Rsa(x)
    }
}

impl From<signature::Error> for Error {
    fn from(x: signature::Error) -> Self {
        Self::Ecdsa(x)
    }
}

impl From<elliptic_curve::Error> for Error {
    fn from(x: elliptic_curve::Error) -> Self {
        Self::EllipticCurve(x)
    }
}

impl From<der::pem::Error> for Error {
    fn from(x: der::pem::Error) -> Self {
        Self::Pem(x)
    }
}

impl From<der::Error> for Error {
    fn from(x: der::Error) -> Self {
        Self::Der(x)
    }
}

impl From<::rsa::pkcs1::Error> for Error {
    fn from(x: ::rsa::pkcs1::Error) -> Self {
        Self::Pkcs1(x)
    }
}

impl From<pkcs8::Error> for Error {
    fn from(x: pkcs8::Error) -> Self {
        Self::Pkcs8(x)
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(x: pkcs8::spki::Error) -> Self {
        Self::Spki(x)
    }
}

impl From<sec1::Error> for Error {
    fn from(x: sec1::Error) -> Self {
        Self::Sec1(x)
    }
}
