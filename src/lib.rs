//! Construction, signing, decoding and verification of compact JSON Web
//! Tokens ([RFC 7519]).
//!
//! A [`JsonWebToken`] owns a [`JoseHeader`], a [`Payload`] of claims and
//! the signing key. [`JsonWebToken::signature`] produces the compact form,
//! [`decode`] and [`decode_with_status`] take it apart again and verify the
//! signature and the registered claims.
//!
//! ```
//! use jose_jwt::{decode, params, Algorithm, DecodeOptions, JsonWebToken};
//!
//! let token = JsonWebToken::from_params([
//!     params::algorithm(Algorithm::HS256),
//!     params::secret("secret"),
//!     params::payload([("sub", "admin")]),
//! ])
//! .signature()
//! .unwrap();
//!
//! let options = DecodeOptions::new()
//!     .algorithms([Algorithm::HS256])
//!     .secret("secret")
//!     .subject("admin");
//! let jwt = decode(&token, &options).unwrap();
//! assert_eq!(jwt.payload().subject(), Some("admin"));
//! ```
//!
//! [RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519>
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod sign;
pub use sign::*;

mod verify;
pub use verify::*;

pub mod base64;
pub(crate) mod base64_url;
pub mod claims;
pub mod crypto;
mod decode;
mod error;
pub mod format;
pub mod header;
pub mod jwa;
mod jwt;
pub mod policy;
pub mod registry;

#[doc(inline)]
pub use self::{
    base64_url::Base64UrlString,
    claims::{ClaimValue, Payload, RegisteredClaim},
    decode::{decode, decode_with_status, DecodeOptions, Decoded, SecretResolver, Stage},
    error::{Error, ErrorCategory, ErrorKind, Result},
    header::JoseHeader,
    jwa::Algorithm,
    jwt::{params, JsonWebToken, JsonWebTokenBuilder},
};

/// Type alias to make `JsonWebToken` easier to access.
pub type JWT = JsonWebToken;
