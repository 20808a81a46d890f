mod raw;

use ecdsa::der;
use elliptic_curve::{sec1::ToEncodedPoint as _, PublicKey, SecretKey};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand_core::OsRng;
use sha2::Digest as _;
use signature::hazmat::{PrehashSigner as _, PrehashVerifier as _, RandomizedPrehashSigner as _};

use crate::{crypto::Result, jwa::EcDsa};

/// A low level private EC key on one of the supported curves.
#[derive(Clone)]
pub(crate) enum EcPrivateKey {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    P521(SecretKey<NistP521>),
}

/// A low level public EC key on one of the supported curves.
#[derive(Clone)]
pub(crate) enum EcPublicKey {
    P256(PublicKey<NistP256>),
    P384(PublicKey<NistP384>),
    P521(PublicKey<NistP521>),
}

/// The message digest selected by the algorithm. The curve does not take
/// part in this choice.
fn prehash(alg: EcDsa, data: &[u8]) -> Vec<u8> {
    match alg {
        EcDsa::Es256 => sha2::Sha256::digest(data).to_vec(),
        EcDsa::Es384 => sha2::Sha384::digest(data).to_vec(),
        EcDsa::Es512 => sha2::Sha512::digest(data).to_vec(),
    }
}

impl EcPrivateKey {
    /// The byte width of `R` and `S` for this curve.
    pub(crate) const fn field_size(&self) -> usize {
        match self {
            Self::P256(_) => 32,
            Self::P384(_) => 48,
            Self::P521(_) => 66,
        }
    }

    pub(crate) fn public_key(&self) -> EcPublicKey {
        match self {
            Self::P256(key) => EcPublicKey::P256(key.public_key()),
            Self::P384(key) => EcPublicKey::P384(key.public_key()),
            Self::P521(key) => EcPublicKey::P521(key.public_key()),
        }
    }

    /// Signs `data` and returns the signature as fixed width `R || S`.
    pub(crate) fn sign(&self, alg: EcDsa, data: &[u8]) -> Result<Vec<u8>> {
        let prehash = prehash(alg, data);

        match self {
            Self::P256(key) => {
                let key = ecdsa::SigningKey::<NistP256>::from(key);
                let sig: der::Signature<NistP256> = key.sign_prehash_with_rng(&mut OsRng, &prehash)?;
                raw::der_to_raw(sig.as_bytes(), self.field_size())
            }
            Self::P384(key) => {
                let key = ecdsa::SigningKey::<NistP384>::from(key);
                let sig: der::Signature<NistP384> = key.sign_prehash_with_rng(&mut OsRng, &prehash)?;
                raw::der_to_raw(sig.as_bytes(), self.field_size())
            }
            // deterministic (RFC 6979), already fixed width
            Self::P521(key) => {
                let key = p521::ecdsa::SigningKey::from_bytes(&key.to_bytes())?;
                let sig: p521::ecdsa::Signature = key.sign_prehash(&prehash)?;
                Ok(sig.to_bytes().to_vec())
            }
        }
    }
}

impl EcPublicKey {
    /// The byte width of `R` and `S` for this curve.
    pub(crate) const fn field_size(&self) -> usize {
        match self {
            Self::P256(_) => 32,
            Self::P384(_) => 48,
            Self::P521(_) => 66,
        }
    }

    /// Verifies a fixed width `R || S` signature.
    ///
    /// A signature of the wrong length or with out of range components is
    /// reported as `false`.
    pub(crate) fn verify(&self, alg: EcDsa, msg: &[u8], signature: &[u8]) -> bool {
        if signature.len() != 2 * self.field_size() {
            return false;
        }
        let prehash = prehash(alg, msg);

        match self {
            Self::P256(key) => {
                let Some(sig) = raw::raw_to_der(signature, 32)
                    .and_then(|der| der::Signature::<NistP256>::from_bytes(&der).ok())
                else {
                    return false;
                };
                let key = ecdsa::VerifyingKey::<NistP256>::from(key);
                key.verify_prehash(&prehash, &sig).is_ok()
            }
            Self::P384(key) => {
                let Some(sig) = raw::raw_to_der(signature, 48)
                    .and_then(|der| der::Signature::<NistP384>::from_bytes(&der).ok())
                else {
                    return false;
                };
                let key = ecdsa::VerifyingKey::<NistP384>::from(key);
                key.verify_prehash(&prehash, &sig).is_ok()
            }
            Self::P521(key) => {
                let Ok(sig) = p521::ecdsa::Signature::from_slice(signature) else {
                    return false;
                };
                let point = key.to_encoded_point(false);
                let Ok(key) = p521::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes()) else {
                    return false;
                };
                key.verify_prehash(&prehash, &sig).is_ok()
            }
        }
    }
}
