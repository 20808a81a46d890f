//! The JSON Web Algorithms (JWA) a token can be signed with, as defined in
//! [RFC 7518 section 3]
//!
//! [RFC 7518 section 3]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3>

mod ecdsa;
mod hmac;
mod rsa;

use core::str::FromStr;

#[doc(inline)]
pub use self::{ecdsa::EcDsa, hmac::Hmac, rsa::Rsa};
use crate::{Error, ErrorKind};

/// A signing algorithm for the `alg` header.
///
/// The algorithms are grouped into the families that share a signing
/// strategy. Names are matched without regard to ASCII case, and the
/// canonical spelling is used when serializing. The unsecured algorithm is
/// written as `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// HMAC with SHA-2 Functions
    Hmac(Hmac),
    /// RSASSA-PKCS1-v1_5 using SHA-2 Functions
    Rsa(Rsa),
    /// Digital Signature with ECDSA
    EcDsa(EcDsa),
    /// The unsecured algorithm as defined in [section 3.6 of RFC 7518].
    ///
    /// A token using it carries an empty signature.
    ///
    /// [section 3.6 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-3.6>
    #[default]
    None,
}

impl Algorithm {
    /// HMAC using SHA-256
    pub const HS256: Self = Self::Hmac(Hmac::Hs256);
    /// HMAC using SHA-384
    pub const HS384: Self = Self::Hmac(Hmac::Hs384);
    /// HMAC using SHA-512
    pub const HS512: Self = Self::Hmac(Hmac::Hs512);
    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RS256: Self = Self::Rsa(Rsa::Rs256);
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RS384: Self = Self::Rsa(Rsa::Rs384);
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RS512: Self = Self::Rsa(Rsa::Rs512);
    /// ECDSA using SHA-256
    pub const ES256: Self = Self::EcDsa(EcDsa::Es256);
    /// ECDSA using SHA-384
    pub const ES384: Self = Self::EcDsa(EcDsa::Es384);
    /// ECDSA using SHA-512
    pub const ES512: Self = Self::EcDsa(EcDsa::Es512);
    /// No signature
    pub const NONE: Self = Self::None;

    /// Every supported algorithm.
    pub const ALL: [Self; 10] = [
        Self::NONE,
        Self::HS256,
        Self::HS384,
        Self::HS512,
        Self::RS256,
        Self::RS384,
        Self::RS512,
        Self::ES256,
        Self::ES384,
        Self::ES512,
    ];

    /// Returns `true` for [`Algorithm::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// the same table as the `alg` registry, with `NONE` upper-cased
impl_serde_jwa!(
    Algorithm,
    [
        "HS256" => Self::Hmac(Hmac::Hs256); Self::Hmac(Hmac::Hs256),
        "HS384" => Self::Hmac(Hmac::Hs384); Self::Hmac(Hmac::Hs384),
        "HS512" => Self::Hmac(Hmac::Hs512); Self::Hmac(Hmac::Hs512),

        "RS256" => Self::Rsa(Rsa::Rs256); Self::Rsa(Rsa::Rs256),
        "RS384" => Self::Rsa(Rsa::Rs384); Self::Rsa(Rsa::Rs384),
        "RS512" => Self::Rsa(Rsa::Rs512); Self::Rsa(Rsa::Rs512),

        "ES256" => Self::EcDsa(EcDsa::Es256); Self::EcDsa(EcDsa::Es256),
        "ES384" => Self::EcDsa(EcDsa::Es384); Self::EcDsa(EcDsa::Es384),
        "ES512" => Self::EcDsa(EcDsa::Es512); Self::EcDsa(EcDsa::Es512),

        "NONE" => Self::None; Self::None,
    ]
);

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parses an algorithm name, ignoring ASCII case.
    ///
    /// Unknown names fail with [`ErrorKind::InvalidAlgorithm`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(Error::new(ErrorKind::InvalidAlgorithm))
    }
}

impl From<Hmac> for Algorithm {
    fn from(x: Hmac) -> Self {
        Self::Hmac(x)
    }
}

impl From<Rsa> for Algorithm {
    fn from(x: Rsa) -> Self {
        Self::Rsa(x)
    }
}

impl From<EcDsa> for Algorithm {
    fn from(x: EcDsa) -> Self {
        Self::EcDsa(x)
    }
}
