use crate::{claims::ClaimValue, jwa::Algorithm, JsonWebToken};

/// Builds a [`JsonWebToken`] step by step.
///
/// ```
/// # use jose_jwt::{Algorithm, JsonWebToken};
/// let token = JsonWebToken::builder()
///     .algorithm(Algorithm::HS256)
///     .secret("secret")
///     .header("kid", "key-1")
///     .claim("sub", "admin")
///     .build();
///
/// assert_eq!(token.payload().subject(), Some("admin"));
/// ```
#[derive(Debug, Default)]
pub struct JsonWebTokenBuilder {
    token: JsonWebToken,
}

impl JsonWebTokenBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Sets the signing algorithm.
    pub fn algorithm(mut self, alg: Algorithm) -> Self {
        self.token.set_algorithm(alg);
        self
    }

    /// Sets the signing key.
    pub fn secret(mut self, key: impl AsRef<[u8]>) -> Self {
        self.token.set_secret(key);
        self
    }

    /// Adds a claim, replacing a previous one with the same name.
    pub fn claim(mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> Self {
        self.token.add_claim_with(name, value, true);
        self
    }

    /// Adds an extra header field, replacing a previous one with the same
    /// name.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> Self {
        self.token.header_mut().add_header_with(name, value, true);
        self
    }

    /// Finishes the token.
    pub fn build(self) -> JsonWebToken {
        self.token
    }
}
