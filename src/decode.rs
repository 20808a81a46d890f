//! Decoding and verification of compact tokens.
//!
//! A token passes through the [`Stage`]s in order. The first stage that
//! fails ends the run and its error is reported together with whatever was
//! decoded up to that point.
//!
//! There are two front ends over the same pipeline:
//!
//! - [`decode_with_status`] never fails. It returns a [`Decoded`] holding
//!   the token and the first error, if any.
//! - [`decode`] returns a [`Result`], treating the
//!   [`NoneAlgorithmUsed`](ErrorKind::NoneAlgorithmUsed) status as success.

mod options;

use core::{fmt, str::FromStr};

use chrono::Utc;
use secrecy::ExposeSecret as _;
use tracing::{debug, trace, warn};

pub use self::options::{DecodeOptions, SecretResolver};
use crate::{
    base64,
    format::Compact,
    header::RawHeader,
    jwa::Algorithm,
    policy::Policy as _,
    registry, Error, ErrorKind, JsonWebToken, Payload, Result, VerifyError,
};

/// The stages of the decode pipeline, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The token is split into header, payload and signature.
    Split,
    /// The header is decoded and its `alg` and `typ` are checked.
    HeaderDecode,
    /// The payload is decoded into a [`Payload`].
    PayloadDecode,
    /// The header algorithm is matched against the accepted algorithms.
    AlgorithmMatch,
    /// The signature is checked, if verification is enabled.
    SignatureVerify,
    /// The registered claims are checked, if verification is enabled.
    ClaimsValidate,
    /// Decoding finished.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Split => "split",
            Self::HeaderDecode => "header decode",
            Self::PayloadDecode => "payload decode",
            Self::AlgorithmMatch => "algorithm match",
            Self::SignatureVerify => "signature verify",
            Self::ClaimsValidate => "claims validate",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// The outcome of [`decode_with_status`].
#[derive(Debug)]
pub struct Decoded {
    /// The token as far as it was decoded.
    ///
    /// If `error` is `None` or the [`NoneAlgorithmUsed`] status, the token
    /// is complete.
    ///
    /// [`NoneAlgorithmUsed`]: ErrorKind::NoneAlgorithmUsed
    pub token: JsonWebToken,
    /// The first error, or the [`NoneAlgorithmUsed`] status.
    ///
    /// [`NoneAlgorithmUsed`]: ErrorKind::NoneAlgorithmUsed
    pub error: Option<Error>,
}

impl Decoded {
    /// The kind of the reported error, if any.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(Error::kind)
    }

    /// Returns `true` if nothing went wrong. The `NONE` status counts as
    /// success.
    pub fn is_ok(&self) -> bool {
        self.error.as_ref().map_or(true, Error::is_none_algorithm)
    }

    /// Splits this into the token and the error.
    pub fn into_parts(self) -> (JsonWebToken, Option<Error>) {
        (self.token, self.error)
    }

    /// Converts this into a [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the reported error unless it is the
    /// [`NoneAlgorithmUsed`](ErrorKind::NoneAlgorithmUsed) status.
    pub fn into_result(self) -> Result<JsonWebToken> {
        match self.error {
            Some(err) if !err.is_none_algorithm() => Err(err),
            _ => Ok(self.token),
        }
    }
}

/// Decodes `token` and reports the first error next to the decoded token.
///
/// This never panics and never fails for a malformed token.
///
/// ```
/// # use jose_jwt::{decode_with_status, Algorithm, DecodeOptions, ErrorKind};
/// let token = "eyJhbGciOiJOT05FIiwidHlwIjoiSldUIn0.\
///              eyJhdWQiOiJyaWZ0LmlvIiwiZXhwIjo0NTEzODYzMzcxLCJzdWIiOiJub3RoaW5nIG11Y2gifQ.";
/// let options = DecodeOptions::new().algorithms([Algorithm::NONE]);
///
/// let decoded = decode_with_status(token, &options);
/// assert_eq!(decoded.kind(), Some(ErrorKind::NoneAlgorithmUsed));
/// assert_eq!(decoded.token.payload().subject(), Some("nothing much"));
/// ```
pub fn decode_with_status(token: &str, options: &DecodeOptions) -> Decoded {
    let mut pipeline = Pipeline::new(options);
    let mut stage = Stage::Split;

    loop {
        trace!(%stage, "entering stage");

        let next = match stage {
            Stage::Split => pipeline.split(token),
            Stage::HeaderDecode => pipeline.decode_header(),
            Stage::PayloadDecode => pipeline.decode_payload(),
            Stage::AlgorithmMatch => pipeline.match_algorithm(),
            Stage::SignatureVerify => pipeline.verify_signature(),
            Stage::ClaimsValidate => pipeline.validate_claims(),
            Stage::Done => break,
        };

        match next {
            Ok(next) => stage = next,
            Err(err) => {
                debug!(%stage, kind = ?err.kind(), "decoding failed");
                pipeline.status = Some(err.at(stage));
                break;
            }
        }
    }

    Decoded {
        token: pipeline.token,
        error: pipeline.status,
    }
}

/// Decodes `token`, failing on the first error.
///
/// A token using the `NONE` algorithm is returned as `Ok` when `NONE` is
/// an accepted algorithm.
///
/// # Errors
///
/// Returns the first error of the pipeline. Match on [`Error::kind`] to
/// handle specific failures.
///
/// ```
/// # use jose_jwt::{decode, Algorithm, DecodeOptions, ErrorKind};
/// let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
///              eyJpYXQiOjE1MTM4NjIzNzEsImlkIjoiYS1iLWMtZC1lLWYtMS0yLTMiLCJpc3MiOiJhcnVuLm11cmFsaWRoYXJhbiIsInN1YiI6ImFkbWluIn0.\
///              jk7bRQKTLvs1RcuvMc2B_rt6WBYPoVPirYi_QRBPiuk";
///
/// let options = DecodeOptions::new().algorithms(["hs256"]).secret("secret");
/// let jwt = decode(token, &options).unwrap();
/// assert_eq!(jwt.payload().issuer(), Some("arun.muralidharan"));
///
/// let wrong = DecodeOptions::new().algorithms(["HS256"]).secret("terces");
/// assert_eq!(decode(token, &wrong).unwrap_err().kind(), ErrorKind::InvalidSignature);
/// ```
pub fn decode(token: &str, options: &DecodeOptions) -> Result<JsonWebToken> {
    decode_with_status(token, options).into_result()
}

/// The state carried from one stage to the next.
struct Pipeline<'a> {
    options: &'a DecodeOptions,
    compact: Compact,
    header: RawHeader,
    token: JsonWebToken,
    status: Option<Error>,
}

impl<'a> Pipeline<'a> {
    fn new(options: &'a DecodeOptions) -> Self {
        Self {
            options,
            compact: Compact::default(),
            header: RawHeader::default(),
            token: JsonWebToken::default(),
            status: None,
        }
    }

    fn segment(&self, idx: usize) -> &str {
        self.compact.part(idx).unwrap_or_default()
    }

    fn split(&mut self, token: &str) -> Result<Stage> {
        if self.options.algorithms.is_empty() {
            return Err(Error::new(ErrorKind::EmptyAlgorithmList));
        }

        self.compact = Compact::from_str(token)?;
        Ok(Stage::HeaderDecode)
    }

    fn decode_header(&mut self) -> Result<Stage> {
        let header = RawHeader::from_base64(self.segment(0))?;

        if self.options.verify && !header.is_unsecured() {
            header.check_typ()?;
        }

        self.header = header;
        Ok(Stage::PayloadDecode)
    }

    fn decode_payload(&mut self) -> Result<Stage> {
        let payload = Payload::from_base64(self.segment(1))?;
        *self.token.payload_mut() = payload;
        Ok(Stage::AlgorithmMatch)
    }

    fn match_algorithm(&mut self) -> Result<Stage> {
        let name = self
            .header
            .alg_name()
            .ok_or(Error::new(ErrorKind::InvalidAlgorithm))?;

        let accepted = self
            .options
            .algorithms
            .iter()
            .any(|alg| alg.eq_ignore_ascii_case(name));
        let alg = Algorithm::from_name(name)
            .filter(|_| accepted)
            .ok_or(Error::new(ErrorKind::InvalidAlgorithm))?;

        // only the unsecured algorithm may, and must, come without signature
        if alg.is_none() != self.segment(2).is_empty() {
            return Err(Error::new(ErrorKind::SignatureFormat));
        }

        let header = core::mem::take(&mut self.header);
        *self.token.header_mut() = header.into_header(alg);
        Ok(Stage::SignatureVerify)
    }

    fn verify_signature(&mut self) -> Result<Stage> {
        if !self.options.verify {
            return Ok(Stage::Done);
        }

        let alg = self.token.algorithm();
        let key = if alg.is_none() {
            None
        } else {
            let key = self.options.key.resolve(self.token.payload());
            Some(key.ok_or(Error::new(ErrorKind::KeyNotPresent))?)
        };

        let signature = base64::decode_url(self.segment(2))
            .map_err(|e| Error::with_source(ErrorKind::SignatureFormat, e))?;
        let input = self.compact.signing_input();
        let secret = key.as_ref().map_or(&[][..], |key| key.expose_secret());

        match registry::lookup(alg).verify(secret, input.as_bytes(), &signature) {
            Ok(()) => {}
            Err(VerifyError::NoneAlgorithm) => {
                warn!("token uses the none algorithm, signature not checked");
                self.status = Some(Error::new(ErrorKind::NoneAlgorithmUsed).at(Stage::SignatureVerify));
            }
            Err(VerifyError::InvalidSignature) => {
                return Err(Error::new(ErrorKind::InvalidSignature));
            }
            Err(VerifyError::Other(e)) => {
                return Err(Error::with_source(ErrorKind::VerificationFailed, e));
            }
        }

        if let Some(key) = key {
            self.token.set_secret_slice(key);
        }
        Ok(Stage::ClaimsValidate)
    }

    fn validate_claims(&mut self) -> Result<Stage> {
        let now = self.options.now.unwrap_or_else(|| Utc::now().timestamp());
        self.options.policy.check(self.token.payload(), now)?;
        Ok(Stage::Done)
    }
}
