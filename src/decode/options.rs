use core::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret as _, SecretSlice};

use crate::{policy::StandardPolicy, Payload};

/// A function that picks the verification key after the payload was
/// decoded, for example based on the `iss` claim.
pub type SecretResolver = dyn Fn(&Payload) -> Option<Vec<u8>> + Send + Sync;

#[derive(Clone)]
pub(crate) enum KeySource {
    Absent,
    Static(SecretSlice<u8>),
    Resolver(Arc<SecretResolver>),
}

impl KeySource {
    /// The key for `payload`. An empty key counts as no key.
    pub(crate) fn resolve(&self, payload: &Payload) -> Option<SecretSlice<u8>> {
        let key = match self {
            Self::Absent => None,
            Self::Static(key) => Some(key.clone()),
            Self::Resolver(resolve) => (resolve.as_ref())(payload).map(SecretSlice::from),
        }?;

        (!key.expose_secret().is_empty()).then_some(key)
    }
}

/// The options of [`decode`](crate::decode()) and
/// [`decode_with_status`](crate::decode_with_status).
///
/// By default signatures and claims are verified, the leeway is zero, no
/// `iss`, `aud` or `sub` is expected and no algorithm is accepted. The
/// accepted algorithms must always be set.
///
/// ```
/// # use jose_jwt::{Algorithm, DecodeOptions};
/// let options = DecodeOptions::new()
///     .algorithms([Algorithm::HS256, Algorithm::HS384])
///     .secret("secret")
///     .issuer("arun.muralidharan")
///     .leeway(30);
/// # let _ = options;
/// ```
#[derive(Clone)]
pub struct DecodeOptions {
    pub(crate) algorithms: Vec<String>,
    pub(crate) key: KeySource,
    pub(crate) verify: bool,
    pub(crate) policy: StandardPolicy,
    pub(crate) now: Option<i64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            algorithms: Vec::new(),
            key: KeySource::Absent,
            verify: true,
            policy: StandardPolicy::new(),
            now: None,
        }
    }
}

impl fmt::Debug for DecodeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            KeySource::Absent => "none",
            KeySource::Static(_) => "[REDACTED]",
            KeySource::Resolver(_) => "resolver",
        };

        f.debug_struct("DecodeOptions")
            .field("algorithms", &self.algorithms)
            .field("key", &key)
            .field("verify", &self.verify)
            .field("policy", &self.policy)
            .field("now", &self.now)
            .finish()
    }
}

impl DecodeOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// The algorithms a token may use. Names are compared ignoring ASCII
    /// case, so both [`Algorithm`](crate::Algorithm) values and strings
    /// like `"hs256"` work.
    ///
    /// Replaces the list set before.
    pub fn algorithms<I, S>(mut self, algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.algorithms = algorithms
            .into_iter()
            .map(|alg| alg.as_ref().to_owned())
            .collect();
        self
    }

    /// The verification key: the raw secret for HMAC, a PEM encoded public
    /// (or private) key for RSA and ECDSA.
    ///
    /// Replaces a [resolver](Self::secret_resolver) set before.
    pub fn secret(mut self, key: impl AsRef<[u8]>) -> Self {
        self.key = KeySource::Static(SecretSlice::from(key.as_ref().to_vec()));
        self
    }

    /// Derives the verification key from the decoded payload. Returning
    /// `None` is the same as not supplying a key.
    ///
    /// Replaces a [secret](Self::secret) set before.
    pub fn secret_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Payload) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        self.key = KeySource::Resolver(Arc::new(resolver));
        self
    }

    /// Whether the signature and the claims are checked. Defaults to
    /// `true`.
    pub fn verify(mut self, yes: bool) -> Self {
        self.verify = yes;
        self
    }

    /// Tolerance in seconds for `exp` and `nbf`.
    pub fn leeway(mut self, secs: u64) -> Self {
        self.policy = self.policy.leeway(secs);
        self
    }

    /// The expected `iss`.
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.policy = self.policy.issuer(iss);
        self
    }

    /// The expected `aud`.
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.policy = self.policy.audience(aud);
        self
    }

    /// The expected `sub`.
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.policy = self.policy.subject(sub);
        self
    }

    /// Require `iat`, if present, to be an integer.
    pub fn validate_iat(mut self, yes: bool) -> Self {
        self.policy = self.policy.validate_iat(yes);
        self
    }

    /// Use `secs` since the Unix epoch as the current time instead of the
    /// system clock.
    pub fn now(mut self, secs: i64) -> Self {
        self.now = Some(secs);
        self
    }
}
