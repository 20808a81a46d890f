//! The [`JoseHeader`] of a compact token as defined in [section 5 of RFC
//! 7519].
//!
//! [section 5 of RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519#section-5>

use core::fmt;

use serde_json::{Map, Value};

use crate::{base64, claims::ClaimValue, jwa::Algorithm, Error, ErrorKind, Result};

/// The only `typ` value this crate produces and accepts.
pub const TYP_JWT: &str = "JWT";

const ALG: &str = "alg";
const TYP: &str = "typ";

/// The header of a token: the signing algorithm, the fixed `typ` of `JWT`
/// and any number of extra fields such as `kid`.
///
/// The JSON form always contains `alg` and `typ`. Extra fields can not
/// shadow either of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoseHeader {
    algorithm: Algorithm,
    extra: Map<String, Value>,
}

impl JoseHeader {
    /// Creates a header for the given algorithm without extra fields.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            extra: Map::new(),
        }
    }

    /// The `alg` field.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Replaces the `alg` field.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// The `typ` field.
    pub const fn typ(&self) -> &'static str {
        TYP_JWT
    }

    /// Adds an extra field unless it is already present.
    ///
    /// Returns `false` if the field exists or if `name` is `alg` or `typ`.
    pub fn add_header(&mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> bool {
        self.add_header_with(name, value, false)
    }

    /// Adds an extra field, replacing an existing one if `overwrite` is set.
    ///
    /// `alg` and `typ` are never accepted.
    pub fn add_header_with(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<ClaimValue>,
        overwrite: bool,
    ) -> bool {
        let name = name.as_ref();
        if is_reserved(name) || (!overwrite && self.extra.contains_key(name)) {
            return false;
        }

        self.extra
            .insert(name.to_owned(), value.into().into_value());
        true
    }

    /// Removes an extra field. Returns `false` if it was not present.
    pub fn remove_header(&mut self, name: impl AsRef<str>) -> bool {
        self.extra.remove(name.as_ref()).is_some()
    }

    /// Returns `true` if the header has a field with this name, `alg` and
    /// `typ` included.
    pub fn has_header(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        is_reserved(name) || self.extra.contains_key(name)
    }

    /// The value of an extra field.
    pub fn header_value(&self, name: impl AsRef<str>) -> Option<&Value> {
        self.extra.get(name.as_ref())
    }

    /// The header as a JSON object.
    pub fn to_json(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert(ALG.into(), Value::from(self.algorithm.name()));
        object.insert(TYP.into(), Value::from(TYP_JWT));
        Value::Object(object)
    }

    /// The header as JSON text, indented if `pretty` is set.
    pub fn to_json_string(&self, pretty: bool) -> String {
        let json = self.to_json();
        if pretty {
            format!("{json:#}")
        } else {
            json.to_string()
        }
    }

    /// The compact JSON text, base64url encoded.
    pub fn base64(&self) -> String {
        base64::encode_url(self.to_json_string(false))
    }
}

impl fmt::Display for JoseHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string(f.alternate()))
    }
}

fn is_reserved(name: &str) -> bool {
    name == ALG || name == TYP
}

/// A header as found in an incoming token, before any of its fields were
/// checked.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawHeader {
    alg: Option<Value>,
    typ: Option<Value>,
    extra: Map<String, Value>,
}

impl RawHeader {
    /// Decodes and parses the first segment of a compact token.
    ///
    /// Fails with [`ErrorKind::JsonParse`] unless the segment is base64url
    /// encoded JSON object text, and with [`ErrorKind::AlgHeaderMissing`]
    /// if the object has no `alg`.
    pub(crate) fn from_base64(segment: &str) -> Result<Self> {
        let json = base64::decode_url(segment)
            .map_err(|e| Error::with_source(ErrorKind::JsonParse, e))?;
        let mut object = match serde_json::from_slice::<Value>(&json) {
            Ok(Value::Object(object)) => object,
            Ok(_) => return Err(Error::new(ErrorKind::JsonParse)),
            Err(e) => return Err(Error::with_source(ErrorKind::JsonParse, e)),
        };

        let alg = object.remove(ALG);
        if alg.is_none() {
            return Err(Error::new(ErrorKind::AlgHeaderMissing));
        }

        Ok(Self {
            alg,
            typ: object.remove(TYP),
            extra: object,
        })
    }

    /// The `alg` field if it is a string.
    pub(crate) fn alg_name(&self) -> Option<&str> {
        self.alg.as_ref().and_then(Value::as_str)
    }

    /// Returns `true` if `alg` names the unsecured algorithm.
    pub(crate) fn is_unsecured(&self) -> bool {
        self.alg_name()
            .and_then(Algorithm::from_name)
            .is_some_and(|alg| alg.is_none())
    }

    /// Checks that `typ` is present and equal to `JWT`, ignoring case.
    pub(crate) fn check_typ(&self) -> Result<()> {
        match &self.typ {
            None => Err(Error::new(ErrorKind::TypHeaderMissing)),
            Some(Value::String(typ)) if typ.eq_ignore_ascii_case(TYP_JWT) => Ok(()),
            Some(_) => Err(Error::new(ErrorKind::TypMismatch)),
        }
    }

    /// Builds the checked header once the algorithm is known.
    pub(crate) fn into_header(self, algorithm: Algorithm) -> JoseHeader {
        JoseHeader {
            algorithm,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_alg_and_typ() {
        let header = JoseHeader::new(Algorithm::HS256);
        assert_eq!(header.to_json_string(false), r#"{"alg":"HS256","typ":"JWT"}"#);
        assert_eq!(header.base64(), "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");

        let none = JoseHeader::new(Algorithm::NONE);
        assert_eq!(none.base64(), "eyJhbGciOiJOT05FIiwidHlwIjoiSldUIn0");
    }

    #[test]
    fn extra_fields() {
        let mut header = JoseHeader::new(Algorithm::RS256);
        assert!(header.add_header("kid", "1234"));
        assert!(!header.add_header("kid", "5678"));
        assert!(!header.add_header("alg", "HS256"));
        assert!(!header.add_header_with("typ", "JOSE", true));
        assert!(header.has_header("kid"));
        assert!(header.has_header("alg"));

        assert_eq!(
            header.to_json_string(false),
            r#"{"alg":"RS256","kid":"1234","typ":"JWT"}"#
        );

        assert!(header.remove_header("kid"));
        assert!(!header.remove_header("kid"));
        assert!(!header.remove_header("alg"));
    }

    #[test]
    fn raw_header_checks() {
        let raw = RawHeader::from_base64("eyJhbGciOiJIUzI1NiJ9").unwrap();
        assert_eq!(raw.alg_name(), Some("HS256"));
        assert_eq!(raw.check_typ().unwrap_err().kind(), ErrorKind::TypHeaderMissing);

        let raw = RawHeader::from_base64(&base64::encode_url(r#"{"alg":"none","typ":"jwt"}"#))
            .unwrap();
        assert!(raw.is_unsecured());
        assert!(raw.check_typ().is_ok());

        let raw = RawHeader::from_base64(&base64::encode_url(r#"{"alg":"HS256","typ":"JOSE"}"#))
            .unwrap();
        assert_eq!(raw.check_typ().unwrap_err().kind(), ErrorKind::TypMismatch);

        let err = RawHeader::from_base64(&base64::encode_url(r#"{"typ":"JWT"}"#)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlgHeaderMissing);

        let err = RawHeader::from_base64("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::JsonParse);
    }
}
