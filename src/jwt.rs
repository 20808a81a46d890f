//! The [`JsonWebToken`] object: a header, a claim set and the key used to
//! sign it.

mod builder;
pub mod params;

use core::fmt;

use secrecy::{ExposeSecret as _, SecretSlice};
use tracing::debug;

pub use self::builder::JsonWebTokenBuilder;
use self::params::Parameter;
use crate::{
    claims::ClaimValue, format::Compact, jwa::Algorithm, registry, Error, ErrorKind, JoseHeader,
    Payload, Result,
};

/// A JSON Web Token (JWT) as defined in [RFC 7519]
///
/// The token exclusively owns its header, its payload and its key. Cloning
/// deep copies all three. [`core::mem::take`] moves them out and leaves an
/// empty token behind.
///
/// ```
/// use jose_jwt::{params, Algorithm, JsonWebToken};
///
/// let mut token = JsonWebToken::from_params([
///     params::algorithm(Algorithm::HS256),
///     params::secret("secret"),
///     params::payload([("iss", "arun.muralidharan"), ("sub", "admin")]),
/// ]);
/// token.add_claim("id", "a-b-c-d-e-f-1-2-3").add_claim("iat", 1513862371);
///
/// assert_eq!(
///     token.signature().unwrap(),
///     "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
///      eyJpYXQiOjE1MTM4NjIzNzEsImlkIjoiYS1iLWMtZC1lLWYtMS0yLTMiLCJpc3MiOiJhcnVuLm11cmFsaWRoYXJhbiIsInN1YiI6ImFkbWluIn0.\
///      jk7bRQKTLvs1RcuvMc2B_rt6WBYPoVPirYi_QRBPiuk"
/// );
/// ```
///
/// [RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519>
#[derive(Debug, Clone, Default)]
pub struct JsonWebToken {
    header: JoseHeader,
    payload: Payload,
    secret: Option<SecretSlice<u8>>,
}

impl JsonWebToken {
    /// Creates an empty token using the `NONE` algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a token from a list of [`Parameter`]s, in any order.
    ///
    /// If the same kind of parameter appears more than once, the last one
    /// wins. A [`Parameter::Payload`] or [`Parameter::Headers`] replaces
    /// everything an earlier one of the same kind set.
    pub fn from_params(params: impl IntoIterator<Item = Parameter>) -> Self {
        let mut token = Self::new();

        for param in params {
            match param {
                Parameter::Algorithm(alg) => token.header.set_algorithm(alg),
                Parameter::Secret(secret) => token.secret = Some(secret),
                Parameter::Payload(claims) => {
                    let mut payload = Payload::new();
                    for (name, value) in claims {
                        payload.add_claim_with(name, value, true);
                    }
                    token.payload = payload;
                }
                Parameter::Headers(fields) => {
                    let mut header = JoseHeader::new(token.header.algorithm());
                    for (name, value) in fields {
                        header.add_header_with(name, value, true);
                    }
                    token.header = header;
                }
            }
        }

        token
    }

    /// Returns a [`JsonWebTokenBuilder`].
    pub fn builder() -> JsonWebTokenBuilder {
        JsonWebTokenBuilder::new()
    }

    /// The header of this token.
    pub const fn header(&self) -> &JoseHeader {
        &self.header
    }

    /// Mutable access to the header of this token.
    pub fn header_mut(&mut self) -> &mut JoseHeader {
        &mut self.header
    }

    /// The claims of this token.
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Mutable access to the claims of this token.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// The signing algorithm from the header.
    pub const fn algorithm(&self) -> Algorithm {
        self.header.algorithm()
    }

    /// Changes the signing algorithm.
    pub fn set_algorithm(&mut self, alg: Algorithm) -> &mut Self {
        self.header.set_algorithm(alg);
        self
    }

    /// The key this token is signed with, or was verified with.
    pub const fn secret(&self) -> Option<&SecretSlice<u8>> {
        self.secret.as_ref()
    }

    /// Sets the key. For HMAC this is the raw secret, for RSA and ECDSA a PEM
    /// encoded private key.
    pub fn set_secret(&mut self, key: impl AsRef<[u8]>) -> &mut Self {
        self.secret = Some(SecretSlice::from(key.as_ref().to_vec()));
        self
    }

    pub(crate) fn set_secret_slice(&mut self, key: SecretSlice<u8>) {
        self.secret = Some(key);
    }

    /// Adds a claim. An existing claim with that name is kept.
    ///
    /// Use [`Payload::add_claim`] through [`payload_mut`](Self::payload_mut)
    /// to learn whether the claim was added.
    pub fn add_claim(&mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> &mut Self {
        self.payload.add_claim(name, value);
        self
    }

    /// Adds a claim, replacing an existing one if `overwrite` is set.
    pub fn add_claim_with(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<ClaimValue>,
        overwrite: bool,
    ) -> &mut Self {
        self.payload.add_claim_with(name, value, overwrite);
        self
    }

    /// Removes a claim if it is present.
    pub fn remove_claim(&mut self, name: impl AsRef<str>) -> &mut Self {
        self.payload.remove_claim(name);
        self
    }

    /// Returns `true` if the payload has a claim with this exact name.
    pub fn has_claim(&self, name: impl AsRef<str>) -> bool {
        self.payload.has_claim(name)
    }

    /// Adds an extra header field. An existing field is kept.
    pub fn add_header(&mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> &mut Self {
        self.header.add_header(name, value);
        self
    }

    /// Removes an extra header field if it is present.
    pub fn remove_header(&mut self, name: impl AsRef<str>) -> &mut Self {
        self.header.remove_header(name);
        self
    }

    /// Signs this token and returns its compact form.
    ///
    /// For the `NONE` algorithm the signature part is empty and the token
    /// ends with a `.`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::KeyNotFound`] if the algorithm needs a key and none,
    ///   or an empty one, was set.
    /// - [`ErrorKind::SigningFailed`] if the key could not be used or the
    ///   signing primitive failed. The cause is kept as the error source.
    pub fn signature(&self) -> Result<String> {
        let alg = self.algorithm();
        debug!(%alg, claims = self.payload.len(), "signing token");

        let key: &[u8] = match &self.secret {
            Some(secret) => secret.expose_secret(),
            None => &[],
        };
        if !alg.is_none() && key.is_empty() {
            return Err(Error::new(ErrorKind::KeyNotFound));
        }

        let mut compact = Compact::with_capacity(3);
        compact.push_encoded(self.header.base64());
        compact.push_encoded(self.payload.base64());

        let signature = registry::lookup(alg)
            .sign(key, compact.signing_input().as_bytes())
            .map_err(|e| Error::with_source(ErrorKind::SigningFailed, e))?;
        compact.push(signature);

        Ok(compact.to_string())
    }
}

impl fmt::Display for JsonWebToken {
    /// Writes the header and payload JSON separated by a `.`. The alternate
    /// flag (`{:#}`) indents both.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write!(
            f,
            "{}.{}",
            self.header.to_json_string(pretty),
            self.payload.to_json_string(pretty)
        )
    }
}
