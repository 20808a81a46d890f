//! Maps an [`Algorithm`] to the strategy that signs and verifies with it.
//!
//! The table is a set of `static` strategy values, so a lookup never
//! allocates and the returned reference can be shared freely.
//!
//! ```
//! use jose_jwt::{registry, Algorithm};
//!
//! let hs256 = registry::lookup(Algorithm::HS256);
//! let tag = hs256.sign(b"secret", b"header.payload").unwrap();
//! assert!(hs256.verify(b"secret", b"header.payload", &tag).is_ok());
//! ```

use core::fmt;

use crate::{
    crypto::{
        self,
        hmac,
        key::{PrivateKey, PublicKey},
    },
    jwa::{Algorithm, EcDsa, Hmac, Rsa},
    Signer, Verifier, VerifyError,
};

/// A sign and verify capability for exactly one algorithm.
pub trait Strategy: Signer + Verifier + Send + Sync + fmt::Debug {
    /// The algorithm this strategy implements.
    fn algorithm(&self) -> Algorithm;
}

/// Returns the strategy registered for `alg`.
pub fn lookup(alg: Algorithm) -> &'static dyn Strategy {
    match alg {
        Algorithm::Hmac(Hmac::Hs256) => &HS256,
        Algorithm::Hmac(Hmac::Hs384) => &HS384,
        Algorithm::Hmac(Hmac::Hs512) => &HS512,
        Algorithm::Rsa(Rsa::Rs256) => &RS256,
        Algorithm::Rsa(Rsa::Rs384) => &RS384,
        Algorithm::Rsa(Rsa::Rs512) => &RS512,
        Algorithm::EcDsa(EcDsa::Es256) => &ES256,
        Algorithm::EcDsa(EcDsa::Es384) => &ES384,
        Algorithm::EcDsa(EcDsa::Es512) => &ES512,
        Algorithm::None => &NONE,
    }
}

static NONE: Unsecured = Unsecured;
static HS256: HmacStrategy = HmacStrategy(Hmac::Hs256);
static HS384: HmacStrategy = HmacStrategy(Hmac::Hs384);
static HS512: HmacStrategy = HmacStrategy(Hmac::Hs512);
static RS256: RsaStrategy = RsaStrategy(Rsa::Rs256);
static RS384: RsaStrategy = RsaStrategy(Rsa::Rs384);
static RS512: RsaStrategy = RsaStrategy(Rsa::Rs512);
static ES256: EcStrategy = EcStrategy(EcDsa::Es256);
static ES384: EcStrategy = EcStrategy(EcDsa::Es384);
static ES512: EcStrategy = EcStrategy(EcDsa::Es512);

/// The `NONE` algorithm. Signs with nothing and never checks anything.
#[derive(Debug)]
struct Unsecured;

impl Signer for Unsecured {
    fn sign(&self, _: &[u8], _: &[u8]) -> crypto::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl Verifier for Unsecured {
    fn verify(&self, _: &[u8], _: &[u8], _: &[u8]) -> Result<(), VerifyError> {
        Err(VerifyError::NoneAlgorithm)
    }
}

impl Strategy for Unsecured {
    fn algorithm(&self) -> Algorithm {
        Algorithm::None
    }
}

#[derive(Debug)]
struct HmacStrategy(Hmac);

impl Signer for HmacStrategy {
    fn sign(&self, key: &[u8], msg: &[u8]) -> crypto::Result<Vec<u8>> {
        let mut key = hmac::Key::new(self.0, key)?;
        Ok(key.sign(msg).as_ref().to_vec())
    }
}

impl Verifier for HmacStrategy {
    fn verify(&self, key: &[u8], msg: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
        let mut key = hmac::Key::new(self.0, key)?;
        if key.verify(msg, signature) {
            Ok(())
        } else {
            Err(VerifyError::InvalidSignature)
        }
    }
}

impl Strategy for HmacStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Hmac(self.0)
    }
}

#[derive(Debug)]
struct RsaStrategy(Rsa);

impl Signer for RsaStrategy {
    fn sign(&self, key: &[u8], msg: &[u8]) -> crypto::Result<Vec<u8>> {
        let key = PrivateKey::from_pem(key)?.into_rsa()?;
        crypto::rsa::sign(self.0, &key, msg)
    }
}

impl Verifier for RsaStrategy {
    fn verify(&self, key: &[u8], msg: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
        let key = PublicKey::from_pem(key)?.into_rsa()?;
        if crypto::rsa::verify(self.0, &key, msg, signature) {
            Ok(())
        } else {
            Err(VerifyError::InvalidSignature)
        }
    }
}

impl Strategy for RsaStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rsa(self.0)
    }
}

#[derive(Debug)]
struct EcStrategy(EcDsa);

impl Signer for EcStrategy {
    fn sign(&self, key: &[u8], msg: &[u8]) -> crypto::Result<Vec<u8>> {
        let key = PrivateKey::from_pem(key)?.into_ec()?;
        key.sign(self.0, msg)
    }
}

impl Verifier for EcStrategy {
    fn verify(&self, key: &[u8], msg: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
        let key = PublicKey::from_pem(key)?.into_ec()?;
        if key.verify(self.0, msg, signature) {
            Ok(())
        } else {
            Err(VerifyError::InvalidSignature)
        }
    }
}

impl Strategy for EcStrategy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EcDsa(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total() {
        for alg in Algorithm::ALL {
            assert_eq!(lookup(alg).algorithm(), alg);
        }
    }

    #[test]
    fn none_signs_empty_and_reports_sentinel() {
        let none = lookup(Algorithm::NONE);
        assert!(none.sign(b"", b"msg").unwrap().is_empty());
        assert!(matches!(
            none.verify(b"", b"msg", b""),
            Err(VerifyError::NoneAlgorithm)
        ));
    }

    #[test]
    fn hmac_lengths() {
        for (alg, len) in [
            (Algorithm::HS256, 32),
            (Algorithm::HS384, 48),
            (Algorithm::HS512, 64),
        ] {
            let sig = lookup(alg).sign(b"secret", b"msg").unwrap();
            assert_eq!(sig.len(), len);
            assert!(lookup(alg).verify(b"secret", b"msg", &sig).is_ok());
            assert!(matches!(
                lookup(alg).verify(b"other", b"msg", &sig),
                Err(VerifyError::InvalidSignature)
            ));
        }
    }

    #[test]
    fn asymmetric_rejects_raw_secret() {
        assert!(lookup(Algorithm::RS256).sign(b"secret", b"msg").is_err());
        assert!(matches!(
            lookup(Algorithm::ES256).verify(b"secret", b"msg", b"sig"),
            Err(VerifyError::Other(_))
        ));
    }
}
