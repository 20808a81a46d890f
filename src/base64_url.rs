//! A string that is known to hold URL safe base64 text.

use core::{fmt, ops::Deref, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::base64::{self, InvalidBase64};

/// A wrapper around a [`String`] that guarantees that the inner string is a
/// valid, unpadded Base64Url string.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Default)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Base64UrlString(String);

impl<'de> Deserialize<'de> for Base64UrlString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Base64UrlString::from_str(&inner).map_err(D::Error::custom)
    }
}

impl fmt::Display for Base64UrlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Base64UrlString {
    type Err = InvalidBase64;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base64::decode_url(s).map(|_| Self(s.to_owned()))
    }
}

impl Base64UrlString {
    /// Creates a new, empty Base64Url string.
    #[inline]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Encode the given bytes using Base64Url format.
    #[inline]
    pub fn encode(x: impl AsRef<[u8]>) -> Self {
        Self(base64::encode_url(x))
    }

    /// Decodes this Base64Url string into its raw byte representation.
    ///
    /// # Errors
    ///
    /// Never fails for a value built through [`encode`](Self::encode) or
    /// [`FromStr`].
    #[inline]
    pub fn decode(&self) -> Result<Vec<u8>, InvalidBase64> {
        base64::decode_url(&self.0)
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Base64UrlString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Base64UrlString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
