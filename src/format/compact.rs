use core::{fmt, str::FromStr};

use crate::{Base64UrlString, Error, ErrorKind};

/// The compact representation is essentially a list of Base64Url
/// strings that are separated by `.`.
///
/// A parsed [`Compact`] always has exactly three parts: header, payload and
/// signature. The parts are not decoded here, that is left to the stage that
/// interprets them.
///
/// ```
/// # use jose_jwt::format::Compact;
/// # use std::str::FromStr;
/// let c = Compact::from_str("abc.def.").unwrap();
///
/// assert_eq!(c.part(0), Some("abc"));
/// assert_eq!(c.part(2), Some(""));
/// assert_eq!(c.signing_input(), "abc.def");
/// assert_eq!(c.to_string(), "abc.def.");
///
/// assert!(Compact::from_str("abc.def").is_err());
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compact {
    parts: Vec<String>,
}

impl Compact {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Compact {
            parts: Vec::with_capacity(cap),
        }
    }

    /// Encodes `part` and appends it.
    pub(crate) fn push(&mut self, part: impl AsRef<[u8]>) {
        self.parts.push(Base64UrlString::encode(part).into_inner());
    }

    /// Appends a part that is already encoded.
    pub(crate) fn push_encoded(&mut self, part: String) {
        self.parts.push(part);
    }

    /// Returns the still encoded part at `idx`.
    pub fn part(&self, idx: usize) -> Option<&str> {
        self.parts.get(idx).map(String::as_str)
    }

    /// The number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The header and payload parts joined by `.`, which is the input to the
    /// signature.
    pub fn signing_input(&self) -> String {
        self.parts
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Compact {
    type Err = Error;

    /// Splits a token into its parts.
    ///
    /// Fails with [`ErrorKind::SignatureFormat`] unless there are exactly
    /// two `.` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('.').map(str::to_owned).collect::<Vec<_>>();
        if parts.len() != 3 {
            return Err(Error::new(ErrorKind::SignatureFormat));
        }
        Ok(Self { parts })
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.parts.len();

        for (idx, part) in self.parts.iter().enumerate() {
            f.write_str(part)?;

            if idx != len - 1 {
                f.write_str(".")?;
            }
        }

        Ok(())
    }
}
