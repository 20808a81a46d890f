//! Loading of PEM encoded asymmetric keys.
//!
//! The PEM label decides the container format:
//!
//! | label             | format                        |
//! |-------------------|-------------------------------|
//! | `RSA PRIVATE KEY` | PKCS#1                        |
//! | `EC PRIVATE KEY`  | SEC1                          |
//! | `PRIVATE KEY`     | PKCS#8, RSA or EC             |
//! | `RSA PUBLIC KEY`  | PKCS#1                        |
//! | `PUBLIC KEY`      | SubjectPublicKeyInfo, RSA or EC |

use ::rsa::{
    pkcs1::{self, DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _},
    RsaPrivateKey, RsaPublicKey,
};
use der::{asn1::ObjectIdentifier, oid::AssociatedOid as _};
use elliptic_curve::{PublicKey as EcPoint, SecretKey};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use pkcs8::{DecodePrivateKey as _, DecodePublicKey as _, PrivateKeyInfo, SubjectPublicKeyInfoRef};
use zeroize::Zeroizing;

use super::{
    ec::{EcPrivateKey, EcPublicKey},
    Error, Result,
};

/// The curves a key may live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    fn from_oid(oid: ObjectIdentifier) -> Result<Self> {
        if oid == NistP256::OID {
            Ok(Self::P256)
        } else if oid == NistP384::OID {
            Ok(Self::P384)
        } else if oid == NistP521::OID {
            Ok(Self::P521)
        } else {
            Err(Error::UnsupportedKey(oid.to_string()))
        }
    }
}

/// A private key for one of the asymmetric algorithm families.
#[derive(Clone)]
pub(crate) enum PrivateKey {
    Rsa(RsaPrivateKey),
    Ec(EcPrivateKey),
}

/// A public key for one of the asymmetric algorithm families.
#[derive(Clone)]
pub(crate) enum PublicKey {
    Rsa(RsaPublicKey),
    Ec(EcPublicKey),
}

impl PrivateKey {
    /// Parses a PEM encoded private key.
    pub(crate) fn from_pem(pem: &[u8]) -> Result<Self> {
        let (label, der) = der::pem::decode_vec(pem)?;
        let der = Zeroizing::new(der);

        match label {
            "RSA PRIVATE KEY" => Ok(Self::Rsa(RsaPrivateKey::from_pkcs1_der(&der)?)),
            "EC PRIVATE KEY" => {
                let info = sec1::EcPrivateKey::try_from(der.as_slice())?;
                let oid = info
                    .parameters
                    .and_then(|params| params.named_curve())
                    .ok_or_else(|| Error::UnsupportedKey("EC key without named curve".into()))?;

                let key = match Curve::from_oid(oid)? {
                    Curve::P256 => EcPrivateKey::P256(SecretKey::<NistP256>::from_sec1_der(&der)?),
                    Curve::P384 => EcPrivateKey::P384(SecretKey::<NistP384>::from_sec1_der(&der)?),
                    Curve::P521 => EcPrivateKey::P521(SecretKey::<NistP521>::from_sec1_der(&der)?),
                };
                Ok(Self::Ec(key))
            }
            "PRIVATE KEY" => {
                let info = PrivateKeyInfo::try_from(der.as_slice())?;
                let oid = info.algorithm.oid;

                if oid == pkcs1::ALGORITHM_OID {
                    Ok(Self::Rsa(RsaPrivateKey::from_pkcs8_der(&der)?))
                } else if oid == elliptic_curve::ALGORITHM_OID {
                    let key = match Curve::from_oid(info.algorithm.parameters_oid()?)? {
                        Curve::P256 => {
                            EcPrivateKey::P256(SecretKey::<NistP256>::from_pkcs8_der(&der)?)
                        }
                        Curve::P384 => {
                            EcPrivateKey::P384(SecretKey::<NistP384>::from_pkcs8_der(&der)?)
                        }
                        Curve::P521 => {
                            EcPrivateKey::P521(SecretKey::<NistP521>::from_pkcs8_der(&der)?)
                        }
                    };
                    Ok(Self::Ec(key))
                } else {
                    Err(Error::UnsupportedKey(oid.to_string()))
                }
            }
            other => Err(Error::UnsupportedKey(other.to_owned())),
        }
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        match self {
            Self::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            Self::Ec(key) => PublicKey::Ec(key.public_key()),
        }
    }

    pub(crate) fn into_rsa(self) -> Result<RsaPrivateKey> {
        match self {
            Self::Rsa(key) => Ok(key),
            Self::Ec(_) => Err(Error::KeyTypeMismatch { expected: "RSA" }),
        }
    }

    pub(crate) fn into_ec(self) -> Result<EcPrivateKey> {
        match self {
            Self::Ec(key) => Ok(key),
            Self::Rsa(_) => Err(Error::KeyTypeMismatch { expected: "EC" }),
        }
    }
}

impl PublicKey {
    /// Parses a PEM encoded public key.
    ///
    /// Private keys are accepted too, the public half is derived from them.
    pub(crate) fn from_pem(pem: &[u8]) -> Result<Self> {
        let (label, der) = der::pem::decode_vec(pem)?;
        let der = Zeroizing::new(der);

        match label {
            "RSA PUBLIC KEY" => Ok(Self::Rsa(RsaPublicKey::from_pkcs1_der(&der)?)),
            "PUBLIC KEY" => {
                let info = SubjectPublicKeyInfoRef::try_from(der.as_slice())?;
                let oid = info.algorithm.oid;

                if oid == pkcs1::ALGORITHM_OID {
                    Ok(Self::Rsa(RsaPublicKey::from_public_key_der(&der)?))
                } else if oid == elliptic_curve::ALGORITHM_OID {
                    let key = match Curve::from_oid(info.algorithm.parameters_oid()?)? {
                        Curve::P256 => {
                            EcPublicKey::P256(EcPoint::<NistP256>::from_public_key_der(&der)?)
                        }
                        Curve::P384 => {
                            EcPublicKey::P384(EcPoint::<NistP384>::from_public_key_der(&der)?)
                        }
                        Curve::P521 => {
                            EcPublicKey::P521(EcPoint::<NistP521>::from_public_key_der(&der)?)
                        }
                    };
                    Ok(Self::Ec(key))
                } else {
                    Err(Error::UnsupportedKey(oid.to_string()))
                }
            }
            "RSA PRIVATE KEY" | "EC PRIVATE KEY" | "PRIVATE KEY" => {
                Ok(PrivateKey::from_pem(pem)?.public_key())
            }
            other => Err(Error::UnsupportedKey(other.to_owned())),
        }
    }

    pub(crate) fn into_rsa(self) -> Result<RsaPublicKey> {
        match self {
            Self::Rsa(key) => Ok(key),
            Self::Ec(_) => Err(Error::KeyTypeMismatch { expected: "RSA" }),
        }
    }

    pub(crate) fn into_ec(self) -> Result<EcPublicKey> {
        match self {
            Self::Ec(key) => Ok(key),
            Self::Rsa(_) => Err(Error::KeyTypeMismatch { expected: "EC" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pem() {
        assert!(matches!(
            PrivateKey::from_pem(b"secret"),
            Err(Error::Pem(_))
        ));
        assert!(matches!(PublicKey::from_pem(b""), Err(Error::Pem(_))));
    }

    #[test]
    fn rejects_unknown_label() {
        let pem = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        assert!(matches!(
            PrivateKey::from_pem(pem),
            Err(Error::UnsupportedKey(label)) if label == "CERTIFICATE"
        ));
    }

    #[test]
    fn curve_oids() {
        assert_eq!(Curve::from_oid(NistP256::OID).unwrap(), Curve::P256);
        assert_eq!(Curve::from_oid(NistP384::OID).unwrap(), Curve::P384);
        assert_eq!(
            Curve::from_oid(ObjectIdentifier::new_unwrap("1.3.132.0.35")).unwrap(),
            Curve::P521
        );
        assert!(matches!(
            Curve::from_oid(ObjectIdentifier::new_unwrap("1.3.132.0.10")),
            Err(Error::UnsupportedKey(oid)) if oid == "1.3.132.0.10"
        ));
    }
}
