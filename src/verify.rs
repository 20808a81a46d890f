use thiserror::Error;

use crate::crypto;

/// Error type returned for the `verify` operation.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Indicating that the signature does not correspond to the message.
    #[error("invalid signature")]
    InvalidSignature,
    /// The algorithm is `NONE`, so nothing was checked.
    ///
    /// This is not a failure of the signature. Callers decide what to do
    /// with an unsecured token.
    #[error("none algorithm used")]
    NoneAlgorithm,
    /// Failed to verify the message because of an unexpected reason, like a
    /// key that could not be parsed.
    #[error(transparent)]
    Other(crypto::Error),
}

impl From<crypto::Error> for VerifyError {
    fn from(x: crypto::Error) -> Self {
        Self::Other(x)
    }
}

/// This trait represents anything that can be used to check the signature
/// segment of a token.
pub trait Verifier {
    /// The `verify` operation.
    ///
    /// If the signature is valid for `msg` under `key`, returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidSignature`] if the signature did not
    /// match, [`VerifyError::NoneAlgorithm`] for the unsecured algorithm, or
    /// [`VerifyError::Other`] if the key was unusable.
    fn verify(&self, key: &[u8], msg: &[u8], signature: &[u8]) -> Result<(), VerifyError>;
}
