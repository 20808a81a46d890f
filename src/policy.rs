//! Validate the claims of a decoded token against some [`Policy`]

mod standard;

pub use standard::StandardPolicy;

use crate::{Payload, Result};

/// A trait to enforce rules on the claims of a token.
///
/// The decode pipeline runs the policy after the signature was checked. A
/// policy only looks at the payload. Header and signature checks are not
/// its business.
pub trait Policy {
    /// Checks the claims in `payload` at the time `now`, in seconds since the
    /// Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns the first rule that was violated. The error kind must be
    /// one of the verification kinds.
    fn check(&self, payload: &Payload, now: i64) -> Result<()>;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn check(&self, payload: &Payload, now: i64) -> Result<()> {
        P::check(self, payload, now)
    }
}
