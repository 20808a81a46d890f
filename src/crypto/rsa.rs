use ::rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Digest as _;

use crate::{crypto::Result, jwa::Rsa};

/// Signs `data` with RSASSA-PKCS1-v1_5 using the digest of `alg`.
pub(crate) fn sign(alg: Rsa, key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    let mut rng = rand_core::OsRng;

    let res = match alg {
        Rsa::Rs256 => {
            let hashed = sha2::Sha256::digest(data);
            let pad = Pkcs1v15Sign::new::<sha2::Sha256>();
            key.sign_with_rng(&mut rng, pad, &hashed)
        }
        Rsa::Rs384 => {
            let hashed = sha2::Sha384::digest(data);
            let pad = Pkcs1v15Sign::new::<sha2::Sha384>();
            key.sign_with_rng(&mut rng, pad, &hashed)
        }
        Rsa::Rs512 => {
            let hashed = sha2::Sha512::digest(data);
            let pad = Pkcs1v15Sign::new::<sha2::Sha512>();
            key.sign_with_rng(&mut rng, pad, &hashed)
        }
    };

    Ok(res?)
}

/// Verifies an RSASSA-PKCS1-v1_5 signature over `msg`.
pub(crate) fn verify(alg: Rsa, key: &RsaPublicKey, msg: &[u8], signature: &[u8]) -> bool {
    let res = match alg {
        Rsa::Rs256 => {
            let hashed = sha2::Sha256::digest(msg);
            let pad = Pkcs1v15Sign::new::<sha2::Sha256>();
            key.verify(pad, &hashed, signature)
        }
        Rsa::Rs384 => {
            let hashed = sha2::Sha384::digest(msg);
            let pad = Pkcs1v15Sign::new::<sha2::Sha384>();
            key.verify(pad, &hashed, signature)
        }
        Rsa::Rs512 => {
            let hashed = sha2::Sha512::digest(msg);
            let pad = Pkcs1v15Sign::new::<sha2::Sha512>();
            key.verify(pad, &hashed, signature)
        }
    };

    res.is_ok()
}
