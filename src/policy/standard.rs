use serde_json::Value;

use super::Policy;
use crate::{Error, ErrorKind, Payload, RegisteredClaim, Result};

/// A [`Policy`] for the registered claims.
///
/// # Included checks
///
/// In this order, each only if the claim is present:
///
/// - `exp` must not have passed. With a leeway of zero a token is already
///   expired at its `exp` second, otherwise it stays valid until `exp +
///   leeway`.
/// - `nbf` must not lie more than the leeway in the future.
/// - `iss`, `aud` and `sub` must match the expected value, if one was
///   configured. `aud` may be an array that contains the expected value.
/// - `iat` must be an integer, if [`validate_iat`](Self::validate_iat) is
///   set.
///
/// `exp` and `nbf` may be integers or floats, anything else fails with
/// [`ErrorKind::TypeConversion`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StandardPolicy {
    leeway: u64,
    issuer: Option<String>,
    audience: Option<String>,
    subject: Option<String>,
    validate_iat: bool,
}

impl StandardPolicy {
    /// Create a [`StandardPolicy`] without a leeway and without expected
    /// values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerance in seconds for `exp` and `nbf`.
    pub fn leeway(mut self, secs: u64) -> Self {
        self.leeway = secs;
        self
    }

    /// The expected `iss`.
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    /// The expected `aud`.
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.audience = Some(aud.into());
        self
    }

    /// The expected `sub`.
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.subject = Some(sub.into());
        self
    }

    /// Require `iat` to be an integer when it is present.
    pub fn validate_iat(mut self, yes: bool) -> Self {
        self.validate_iat = yes;
        self
    }

    fn check_exp(&self, payload: &Payload, now: i64) -> Result<()> {
        let Some(exp) = timestamp(payload, RegisteredClaim::Expiration)? else {
            return Ok(());
        };

        let (exp, now, leeway) = (i128::from(exp), i128::from(now), i128::from(self.leeway));
        let expired = if leeway == 0 {
            exp <= now
        } else {
            exp + leeway < now
        };

        if expired {
            Err(Error::new(ErrorKind::TokenExpired))
        } else {
            Ok(())
        }
    }

    fn check_nbf(&self, payload: &Payload, now: i64) -> Result<()> {
        let Some(nbf) = timestamp(payload, RegisteredClaim::NotBefore)? else {
            return Ok(());
        };

        if i128::from(now) + i128::from(self.leeway) < i128::from(nbf) {
            Err(Error::new(ErrorKind::ImmatureSignature))
        } else {
            Ok(())
        }
    }

    fn check_audience(&self, payload: &Payload) -> Result<()> {
        let Some(expected) = &self.audience else {
            return Ok(());
        };

        let matches = match payload.claim(RegisteredClaim::Audience) {
            None => true,
            Some(Value::String(aud)) => aud == expected,
            Some(Value::Array(auds)) => auds.iter().any(|aud| aud.as_str() == Some(expected.as_str())),
            Some(_) => false,
        };

        if matches {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::InvalidAudience))
        }
    }

    fn check_iat(&self, payload: &Payload) -> Result<()> {
        if !self.validate_iat {
            return Ok(());
        }

        match payload.claim(RegisteredClaim::IssuedAt) {
            None => Ok(()),
            Some(iat) if iat.is_i64() || iat.is_u64() => Ok(()),
            Some(_) => Err(Error::new(ErrorKind::TypeConversion)),
        }
    }
}

impl Policy for StandardPolicy {
    fn check(&self, payload: &Payload, now: i64) -> Result<()> {
        self.check_exp(payload, now)?;
        self.check_nbf(payload, now)?;
        check_string(payload, RegisteredClaim::Issuer, self.issuer.as_deref(), ErrorKind::InvalidIssuer)?;
        self.check_audience(payload)?;
        check_string(payload, RegisteredClaim::Subject, self.subject.as_deref(), ErrorKind::InvalidSubject)?;
        self.check_iat(payload)
    }
}

/// Reads a time claim as whole seconds. Fractions are cut off.
fn timestamp(payload: &Payload, claim: RegisteredClaim) -> Result<Option<i64>> {
    let Some(value) = payload.claim(claim) else {
        return Ok(None);
    };

    if let Some(secs) = value.as_i64() {
        return Ok(Some(secs));
    }

    match value.as_f64() {
        Some(secs) if secs.is_finite() => Ok(Some(secs.floor() as i64)),
        _ => Err(Error::new(ErrorKind::TypeConversion)),
    }
}

fn check_string(
    payload: &Payload,
    claim: RegisteredClaim,
    expected: Option<&str>,
    kind: ErrorKind,
) -> Result<()> {
    let (Some(expected), Some(actual)) = (expected, payload.claim(claim)) else {
        return Ok(());
    };

    if actual.as_str() == Some(expected) {
        Ok(())
    } else {
        Err(Error::new(kind))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        let Value::Object(map) = value else {
            panic!("not an object")
        };
        Payload::try_from(map).unwrap()
    }

    fn kind(policy: &StandardPolicy, value: Value, now: i64) -> Option<ErrorKind> {
        policy.check(&payload(value), now).err().map(|e| e.kind())
    }

    #[test]
    fn expiration_boundary() {
        let strict = StandardPolicy::new();
        assert_eq!(kind(&strict, json!({ "exp": 100 }), 100), Some(ErrorKind::TokenExpired));
        assert_eq!(kind(&strict, json!({ "exp": 101 }), 100), None);

        let lenient = StandardPolicy::new().leeway(1);
        assert_eq!(kind(&lenient, json!({ "exp": 99 }), 100), None);
        assert_eq!(kind(&lenient, json!({ "exp": 98 }), 100), Some(ErrorKind::TokenExpired));
    }

    #[test]
    fn not_before() {
        let policy = StandardPolicy::new();
        assert_eq!(kind(&policy, json!({ "nbf": 101 }), 100), Some(ErrorKind::ImmatureSignature));
        assert_eq!(kind(&policy, json!({ "nbf": 100 }), 100), None);
        assert_eq!(kind(&policy.leeway(5), json!({ "nbf": 105 }), 100), None);
    }

    #[test]
    fn float_and_bad_times() {
        let policy = StandardPolicy::new();
        assert_eq!(kind(&policy, json!({ "exp": 100.9 }), 100), Some(ErrorKind::TokenExpired));
        assert_eq!(kind(&policy, json!({ "exp": "soon" }), 100), Some(ErrorKind::TypeConversion));
        assert_eq!(kind(&policy, json!({ "nbf": true }), 100), Some(ErrorKind::TypeConversion));
    }

    #[test]
    fn expected_values_are_opt_in() {
        let claims = json!({ "iss": "a", "aud": ["x", "y"], "sub": "s" });
        assert_eq!(kind(&StandardPolicy::new(), claims.clone(), 0), None);

        let good = StandardPolicy::new().issuer("a").audience("y").subject("s");
        assert_eq!(kind(&good, claims.clone(), 0), None);

        let iss = StandardPolicy::new().issuer("b");
        assert_eq!(kind(&iss, claims.clone(), 0), Some(ErrorKind::InvalidIssuer));
        let aud = StandardPolicy::new().audience("z");
        assert_eq!(kind(&aud, claims.clone(), 0), Some(ErrorKind::InvalidAudience));
        let sub = StandardPolicy::new().subject("t");
        assert_eq!(kind(&sub, claims, 0), Some(ErrorKind::InvalidSubject));

        // absent claims are not checked
        assert_eq!(kind(&iss.issuer("q"), json!({}), 0), None);
    }

    #[test]
    fn check_order() {
        let policy = StandardPolicy::new().issuer("other");
        assert_eq!(
            kind(&policy, json!({ "exp": 1, "iss": "me" }), 10),
            Some(ErrorKind::TokenExpired)
        );
    }

    #[test]
    fn iat_type() {
        let policy = StandardPolicy::new().validate_iat(true);
        assert_eq!(kind(&policy, json!({ "iat": "what?" }), 0), Some(ErrorKind::TypeConversion));
        assert_eq!(kind(&policy, json!({ "iat": 1513862371 }), 0), None);
        assert_eq!(kind(&StandardPolicy::new(), json!({ "iat": "what?" }), 0), None);
    }
}
