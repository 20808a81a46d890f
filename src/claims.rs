//! The claim set carried in the payload of a token.

mod value;

use core::fmt;

use hashbrown::HashMap;
use serde::{
    de::{DeserializeOwned, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use serde_json::{Map, Value};

pub use self::value::ClaimValue;
use crate::{base64, Error, ErrorKind, Result};

/// The claim names registered in [section 4.1 of RFC 7519].
///
/// Anywhere a claim name is expected, a `RegisteredClaim` can be used in
/// place of the string.
///
/// [section 4.1 of RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisteredClaim {
    /// `iss`
    Issuer,
    /// `sub`
    Subject,
    /// `aud`
    Audience,
    /// `exp`
    Expiration,
    /// `nbf`
    NotBefore,
    /// `iat`
    IssuedAt,
    /// `jti`
    JwtId,
}

impl RegisteredClaim {
    /// The claim name as it appears in the payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issuer => "iss",
            Self::Subject => "sub",
            Self::Audience => "aud",
            Self::Expiration => "exp",
            Self::NotBefore => "nbf",
            Self::IssuedAt => "iat",
            Self::JwtId => "jti",
        }
    }
}

impl AsRef<str> for RegisteredClaim {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RegisteredClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The claims of a token.
///
/// Claims are kept in a JSON object which serializes its keys in sorted
/// order. Next to it a name index keyed by the lower-cased claim name makes
/// sure that no two claims differ only in case: [`add_claim`] refuses a name
/// whose lower-cased form is already taken, and decoding a payload that
/// contains such a pair fails with [`ErrorKind::DuplicateClaims`].
///
/// Lookups ([`has_claim`], [`claim`], [`remove_claim`]) compare names
/// exactly.
///
/// [`add_claim`]: Payload::add_claim
/// [`has_claim`]: Payload::has_claim
/// [`claim`]: Payload::claim
/// [`remove_claim`]: Payload::remove_claim
#[derive(Debug, Clone, Default)]
pub struct Payload {
    claims: Map<String, Value>,
    // lower-cased name -> stored name
    names: HashMap<String, String>,
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.claims == other.claims
    }
}

impl Eq for Payload {}

impl Payload {
    /// Creates an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a claim unless a claim with that name already exists.
    ///
    /// Returns `false`, leaving the set unchanged, if the name is taken.
    pub fn add_claim(&mut self, name: impl AsRef<str>, value: impl Into<ClaimValue>) -> bool {
        self.add_claim_with(name, value, false)
    }

    /// Adds a claim, replacing an existing one if `overwrite` is set.
    ///
    /// Returns `false`, leaving the set unchanged, if the name is taken and
    /// `overwrite` is `false`. When a claim is overwritten by a name that
    /// differs only in case, the old spelling is dropped.
    pub fn add_claim_with(
        &mut self,
        name: impl AsRef<str>,
        value: impl Into<ClaimValue>,
        overwrite: bool,
    ) -> bool {
        let name = name.as_ref();
        let folded = name.to_lowercase();

        if let Some(existing) = self.names.get(&folded) {
            if !overwrite {
                return false;
            }
            if existing != name {
                self.claims.remove(existing.as_str());
            }
        }

        self.names.insert(folded, name.to_owned());
        self.claims
            .insert(name.to_owned(), value.into().into_value());
        true
    }

    /// Removes a claim. Returns `false` if there was no claim with that name.
    pub fn remove_claim(&mut self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref();

        if self.claims.remove(name).is_none() {
            return false;
        }

        self.names.remove(&name.to_lowercase());
        true
    }

    /// Returns `true` if a claim with exactly this name exists.
    pub fn has_claim(&self, name: impl AsRef<str>) -> bool {
        self.claims.contains_key(name.as_ref())
    }

    /// Returns `true` if the claim exists and its JSON value equals `value`.
    ///
    /// The comparison is type sensitive: the string `"1"` does not equal the
    /// number `1`.
    pub fn has_claim_with_value(
        &self,
        name: impl AsRef<str>,
        value: impl Into<ClaimValue>,
    ) -> bool {
        self.claims
            .get(name.as_ref())
            .is_some_and(|stored| stored == value.into().as_value())
    }

    /// Returns the raw JSON value of a claim.
    pub fn claim(&self, name: impl AsRef<str>) -> Option<&Value> {
        self.claims.get(name.as_ref())
    }

    /// Converts the value of a claim into `T`.
    ///
    /// A missing claim is treated like a JSON `null`, so asking for an
    /// [`Option`] yields `None` instead of an error.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::TypeConversion`] if the value can not be
    /// converted into `T`.
    pub fn get_claim_value<T: DeserializeOwned>(&self, name: impl AsRef<str>) -> Result<T> {
        let value = self.claim(name).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| Error::with_source(ErrorKind::TypeConversion, e))
    }

    /// Iterates over all claims in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns `true` if there are no claims.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// The `iss` claim, if it is a string.
    pub fn issuer(&self) -> Option<&str> {
        self.str_claim(RegisteredClaim::Issuer)
    }

    /// The `sub` claim, if it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.str_claim(RegisteredClaim::Subject)
    }

    /// The `jti` claim, if it is a string.
    pub fn jwt_id(&self) -> Option<&str> {
        self.str_claim(RegisteredClaim::JwtId)
    }

    /// The audiences named by the `aud` claim.
    ///
    /// `aud` may be a single string or an array of strings. Non string
    /// entries are skipped.
    pub fn audience(&self) -> Vec<&str> {
        match self.claim(RegisteredClaim::Audience) {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(auds)) => auds.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The `exp` claim, if it is an integer.
    pub fn expiration(&self) -> Option<i64> {
        self.int_claim(RegisteredClaim::Expiration)
    }

    /// The `nbf` claim, if it is an integer.
    pub fn not_before(&self) -> Option<i64> {
        self.int_claim(RegisteredClaim::NotBefore)
    }

    /// The `iat` claim, if it is an integer.
    pub fn issued_at(&self) -> Option<i64> {
        self.int_claim(RegisteredClaim::IssuedAt)
    }

    fn str_claim(&self, name: RegisteredClaim) -> Option<&str> {
        self.claim(name).and_then(Value::as_str)
    }

    fn int_claim(&self, name: RegisteredClaim) -> Option<i64> {
        self.claim(name).and_then(Value::as_i64)
    }

    /// The claims as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.claims.clone())
    }

    /// The claims as JSON text, indented if `pretty` is set.
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

    /// Parses a payload from JSON text.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::JsonParse`] if `json` is not a JSON object,
    /// and with [`ErrorKind::DuplicateClaims`] if two claim names are equal
    /// ignoring case.
    pub fn from_json_bytes(json: &[u8]) -> Result<Self> {
        let Entries(entries) = serde_json::from_slice(json)
            .map_err(|e| Error::with_source(ErrorKind::JsonParse, e))?;

        let mut payload = Self::new();
        for (name, value) in entries {
            if !payload.add_claim(&name, value) {
                return Err(Error::new(ErrorKind::DuplicateClaims));
            }
        }

        Ok(payload)
    }

    /// Parses a payload from its base64url encoded JSON text.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::JsonParse`] if `encoded` is not base64url
    /// encoded JSON, and with [`ErrorKind::DuplicateClaims`] on repeated
    /// names.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let json = base64::decode_url(encoded)
            .map_err(|e| Error::with_source(ErrorKind::JsonParse, e))?;
        Self::from_json_bytes(&json)
    }
}

impl TryFrom<Map<String, Value>> for Payload {
    type Error = Error;

    /// Fails with [`ErrorKind::DuplicateClaims`] if two keys differ only in
    /// case.
    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut payload = Self::new();
        for (name, value) in map {
            if !payload.add_claim(&name, value) {
                return Err(Error::new(ErrorKind::DuplicateClaims));
            }
        }
        Ok(payload)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string(f.alternate()))
    }
}

/// The members of a JSON object in document order, repeated keys included.
struct Entries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
