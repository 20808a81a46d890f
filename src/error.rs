//! The error taxonomy shared by token construction, signing and the decode
//! pipeline.
//!
//! Every failure is described by exactly one [`ErrorKind`]. The kinds are
//! grouped into three [categories](ErrorCategory) and each kind maps to a
//! fixed message through [`ErrorKind::message`].

use core::fmt;
use std::error::Error as StdError;

use thiserror::Error;

use crate::decode::Stage;

/// The result type used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The three groups every [`ErrorKind`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Errors raised by a signing or verification strategy.
    Algorithm,
    /// Errors raised while taking a compact token apart.
    Decode,
    /// Errors raised while checking the signature or the claims.
    Verification,
}

/// Every error this crate can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The signing primitive failed, or the key could not be used for signing.
    SigningFailed,
    /// The verification primitive failed, or the key could not be used for
    /// verification.
    VerificationFailed,
    /// A token with an algorithm other than `NONE` was signed without a key.
    KeyNotFound,
    /// The token uses the `NONE` algorithm, so no cryptographic check was
    /// performed.
    ///
    /// This is a status, not a failure. The decoded token is complete.
    NoneAlgorithmUsed,

    /// The list of acceptable algorithms passed to the decoder was empty.
    EmptyAlgorithmList,
    /// The token is not made of exactly three `.` separated segments, or
    /// the signature segment is malformed.
    SignatureFormat,
    /// The header or the payload is not valid base64url encoded JSON.
    JsonParse,
    /// The header has no `alg` field.
    AlgHeaderMissing,
    /// The header has no `typ` field.
    TypHeaderMissing,
    /// The header `typ` field is not `JWT`.
    TypMismatch,
    /// The payload contains the same claim name twice.
    DuplicateClaims,
    /// Signature verification was requested but no key was supplied.
    KeyNotPresent,

    /// The header algorithm is not one of the accepted algorithms.
    InvalidAlgorithm,
    /// The `exp` claim lies in the past.
    TokenExpired,
    /// The `iss` claim does not match the expected issuer.
    InvalidIssuer,
    /// The `aud` claim does not match the expected audience.
    InvalidAudience,
    /// The `nbf` claim lies in the future.
    ImmatureSignature,
    /// The signature does not match the signing input.
    InvalidSignature,
    /// The `sub` claim does not match the expected subject.
    InvalidSubject,
    /// A claim value could not be converted into the requested type.
    TypeConversion,
}

impl ErrorKind {
    /// The category this kind belongs to.
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::SigningFailed
            | Self::VerificationFailed
            | Self::KeyNotFound
            | Self::NoneAlgorithmUsed => ErrorCategory::Algorithm,
            Self::EmptyAlgorithmList
            | Self::SignatureFormat
            | Self::JsonParse
            | Self::AlgHeaderMissing
            | Self::TypHeaderMissing
            | Self::TypMismatch
            | Self::DuplicateClaims
            | Self::KeyNotPresent => ErrorCategory::Decode,
            Self::InvalidAlgorithm
            | Self::TokenExpired
            | Self::InvalidIssuer
            | Self::InvalidAudience
            | Self::ImmatureSignature
            | Self::InvalidSignature
            | Self::InvalidSubject
            | Self::TypeConversion => ErrorCategory::Verification,
        }
    }

    /// The human readable message for this kind.
    pub const fn message(self) -> &'static str {
        match self {
            Self::SigningFailed => "signing failed",
            Self::VerificationFailed => "signature verification failed",
            Self::KeyNotFound => "key not provided",
            Self::NoneAlgorithmUsed => "none algorithm used",
            Self::EmptyAlgorithmList => "empty algorithm list",
            Self::SignatureFormat => "signature format is incorrect",
            Self::JsonParse => "json parse failed",
            Self::AlgHeaderMissing => "algorithm header claim missing",
            Self::TypHeaderMissing => "type header claim missing",
            Self::TypMismatch => "type mismatch",
            Self::DuplicateClaims => "duplicate claims",
            Self::KeyNotPresent => "key not present",
            Self::InvalidAlgorithm => "invalid algorithm",
            Self::TokenExpired => "token expired",
            Self::InvalidIssuer => "invalid issuer",
            Self::InvalidAudience => "invalid audience",
            Self::ImmatureSignature => "immature signature",
            Self::InvalidSignature => "invalid signature",
            Self::InvalidSubject => "invalid subject",
            Self::TypeConversion => "type conversion error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The error type of this crate.
///
/// It carries the [`ErrorKind`], the pipeline [`Stage`] it was raised in
/// (only for errors coming out of the decoder) and, where there is one, the
/// underlying cause.
#[derive(Debug, Error)]
#[error("{}", .kind.message())]
pub struct Error {
    kind: ErrorKind,
    stage: Option<Stage>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates an error of the given kind without a cause.
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            stage: None,
            source: None,
        }
    }

    /// Creates an error of the given kind caused by `source`.
    pub fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            kind,
            stage: None,
            source: Some(source.into()),
        }
    }

    pub(crate) fn at(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// The kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The category of this error.
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The decode pipeline stage that raised this error, if any.
    pub const fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Returns `true` if this is the non fatal [`ErrorKind::NoneAlgorithmUsed`]
    /// status.
    pub const fn is_none_algorithm(&self) -> bool {
        matches!(self.kind, ErrorKind::NoneAlgorithmUsed)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl PartialEq<ErrorKind> for Error {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}
