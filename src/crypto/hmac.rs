use ::hmac::Hmac;
use digest::{Mac as _, Output};
use subtle::ConstantTimeEq as _;

use crate::{crypto::Result, jwa};

/// The digest is a type parameter of [`Hmac`], erased so a single key type
/// covers all three variants.
enum ErasedKey {
    Hs256(Hmac<sha2::Sha256>),
    Hs384(Hmac<sha2::Sha384>),
    Hs512(Hmac<sha2::Sha512>),
}

pub(crate) enum ErasedSignature {
    Hs256(Output<Hmac<sha2::Sha256>>),
    Hs384(Output<Hmac<sha2::Sha384>>),
    Hs512(Output<Hmac<sha2::Sha512>>),
}

impl AsRef<[u8]> for ErasedSignature {
    fn as_ref(&self) -> &[u8] {
        match self {
            ErasedSignature::Hs256(sig) => sig.as_ref(),
            ErasedSignature::Hs384(sig) => sig.as_ref(),
            ErasedSignature::Hs512(sig) => sig.as_ref(),
        }
    }
}

/// A low level HMAC key.
#[repr(transparent)]
pub(crate) struct Key {
    inner: ErasedKey,
}

impl Key {
    /// Creates a new key from the given data.
    pub(crate) fn new(variant: jwa::Hmac, data: &[u8]) -> Result<Self> {
        let key = match variant {
            jwa::Hmac::Hs256 => ErasedKey::Hs256(Hmac::<sha2::Sha256>::new_from_slice(data)?),
            jwa::Hmac::Hs384 => ErasedKey::Hs384(Hmac::<sha2::Sha384>::new_from_slice(data)?),
            jwa::Hmac::Hs512 => ErasedKey::Hs512(Hmac::<sha2::Sha512>::new_from_slice(data)?),
        };

        Ok(Self { inner: key })
    }

    /// Signs the given data using this key.
    ///
    /// The key is reset afterwards, so it can sign again.
    pub(crate) fn sign(&mut self, data: &[u8]) -> ErasedSignature {
        match &mut self.inner {
            ErasedKey::Hs256(hmac) => {
                hmac.update(data);
                ErasedSignature::Hs256(hmac.finalize_reset().into_bytes())
            }
            ErasedKey::Hs384(hmac) => {
                hmac.update(data);
                ErasedSignature::Hs384(hmac.finalize_reset().into_bytes())
            }
            ErasedKey::Hs512(hmac) => {
                hmac.update(data);
                ErasedSignature::Hs512(hmac.finalize_reset().into_bytes())
            }
        }
    }

    /// Recomputes the tag over `data` and compares it with `expected` in
    /// constant time.
    pub(crate) fn verify(&mut self, data: &[u8], expected: &[u8]) -> bool {
        let signature = self.sign(data);
        bool::from(signature.as_ref().ct_eq(expected))
    }
}
