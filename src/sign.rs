use crate::crypto;

/// This trait represents anything that can produce the signature segment of a
/// token.
///
/// A [`Signer`] is stateless. The key is handed in on every call and only
/// lives for the duration of that call, so one instance can be shared
/// between threads.
pub trait Signer {
    /// Sign the given signing input using `key` and return the raw signature
    /// bytes.
    ///
    /// The interpretation of `key` depends on the algorithm: HMAC uses the
    /// raw bytes, RSA and ECDSA expect a PEM encoded private key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key can not be parsed, belongs to another
    /// algorithm family, or the signing primitive fails.
    fn sign(&self, key: &[u8], msg: &[u8]) -> crypto::Result<Vec<u8>>;
}
