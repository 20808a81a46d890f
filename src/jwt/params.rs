//! Typed construction parameters for [`JsonWebToken::from_params`].
//!
//! [`JsonWebToken::from_params`]: crate::JsonWebToken::from_params

use secrecy::SecretSlice;

use crate::{claims::ClaimValue, jwa::Algorithm};

/// One construction parameter of a token.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Parameter {
    /// The signing algorithm.
    Algorithm(Algorithm),
    /// The signing key.
    Secret(SecretSlice<u8>),
    /// The initial claims.
    Payload(Vec<(String, ClaimValue)>),
    /// Extra header fields. `alg` and `typ` are ignored here.
    Headers(Vec<(String, ClaimValue)>),
}

/// The signing algorithm.
pub const fn algorithm(alg: Algorithm) -> Parameter {
    Parameter::Algorithm(alg)
}

/// The signing key, a raw secret for HMAC or PEM text otherwise.
pub fn secret(key: impl AsRef<[u8]>) -> Parameter {
    Parameter::Secret(SecretSlice::from(key.as_ref().to_vec()))
}

/// The initial claims.
pub fn payload<I, K, V>(claims: I) -> Parameter
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ClaimValue>,
{
    Parameter::Payload(collect(claims))
}

/// Extra header fields.
pub fn headers<I, K, V>(fields: I) -> Parameter
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ClaimValue>,
{
    Parameter::Headers(collect(fields))
}

fn collect<I, K, V>(pairs: I) -> Vec<(String, ClaimValue)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ClaimValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
