use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{FromPrimitive, One, Zero};
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::pem::{self, Label};
use crate::{pkcs1, pkcs1v15, pkcs8};

lazy_static! {
    static ref MIN_PUB_EXPONENT: BigUint = BigUint::from_u64(2).unwrap();
    static ref MAX_PUB_EXPONENT: BigUint = BigUint::from_u64(1 << (31 - 1)).unwrap();
}

/// Generic trait for reading the public half of an RSA key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;
    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;
    /// Returns the modulus size in bytes. Raw signatures for or by
    /// this key have the same size.
    fn size(&self) -> usize {
        (self.n().bits() + 7) / 8
    }
}

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

/// A two-prime RSA private key, including its CRT components.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Modulus
    n: BigUint,
    /// Public exponent
    e: BigUint,
    /// Private exponent
    d: BigUint,
    /// First prime factor
    p: BigUint,
    /// Second prime factor
    q: BigUint,
    /// d mod (p-1)
    dp: BigUint,
    /// d mod (q-1)
    dq: BigUint,
    /// (inverse of q) mod p
    qinv: BigUint,
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
            && self.dp == other.dp
            && self.dq == other.dq
            && self.qinv == other.qinv
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        RsaPublicKey {
            n: private_key.n.clone(),
            e: private_key.e.clone(),
        }
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = RsaPublicKey { n, e };
        check_public(&k)?;

        Ok(k)
    }

    /// Verify an RS256 signature over `msg`. Returns `false` on any
    /// mismatch.
    pub fn verify(&self, msg: &[u8], sig: &[u8]) -> bool {
        pkcs1v15::verify(self, msg, sig)
    }
}

impl RsaPrivateKey {
    /// Constructs a key directly from its components, in the order they
    /// appear in a PKCS#1 body after the version. No validation is
    /// performed; see [`RsaPrivateKey::validate`].
    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> RsaPrivateKey {
        RsaPrivateKey {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        }
    }

    /// Decodes a PEM-armoured private key.
    ///
    /// `BEGIN RSA PRIVATE KEY` selects PKCS#1, `BEGIN PRIVATE KEY`
    /// selects unencrypted PKCS#8 wrapping an RSA key. Any other label
    /// is rejected. Decoding succeeds for any modulus length; rejecting
    /// weak keys is left to the caller.
    pub fn from_pem(pem: &str) -> Result<RsaPrivateKey> {
        let block = pem::decode(pem)?;
        match block.label {
            Label::RsaPrivateKey => pkcs1::decode(&block.der),
            Label::PrivateKey => pkcs8::decode(&block.der),
        }
    }

    pub(crate) fn d(&self) -> &BigUint {
        &self.d
    }

    pub(crate) fn p(&self) -> &BigUint {
        &self.p
    }

    pub(crate) fn q(&self) -> &BigUint {
        &self.q
    }

    pub(crate) fn dp(&self) -> &BigUint {
        &self.dp
    }

    pub(crate) fn dq(&self) -> &BigUint {
        &self.dq
    }

    pub(crate) fn qinv(&self) -> &BigUint {
        &self.qinv
    }

    /// Performs basic sanity checks on the key components.
    ///
    /// Decoding never calls this; a caller that wants to reject
    /// inconsistent or weak keys does so explicitly.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        let one = BigUint::one();
        if self.p <= one || self.q <= one {
            return Err(Error::InvalidPrime);
        }

        // The modulus must be the product of the two primes.
        if &self.p * &self.q != self.n {
            return Err(Error::InvalidModulus);
        }

        // de ≡ 1 mod (p-1) and mod (q-1).
        let de = &self.e * &self.d;
        if &de % (&self.p - &one) != one {
            return Err(Error::InvalidExponent);
        }
        if &de % (&self.q - &one) != one {
            return Err(Error::InvalidExponent);
        }

        Ok(())
    }

    /// Sign `msg` with RSASSA-PKCS1-v1_5 and SHA-256. The signature is
    /// exactly [`PublicKeyParts::size`] bytes.
    pub fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        pkcs1v15::sign(self, msg)
    }

    /// Verify an RS256 signature over `msg` with the public components
    /// of this key. Returns `false` on any mismatch.
    pub fn verify(&self, msg: &[u8], sig: &[u8]) -> bool {
        pkcs1v15::verify(self, msg, sig)
    }
}

/// Performs basic sanity checks on the public components of `key`.
pub(crate) fn check_public(key: &impl PublicKeyParts) -> Result<()> {
    if key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }
    if key.e() < &*MIN_PUB_EXPONENT {
        return Err(Error::PublicExponentTooSmall);
    }
    if key.e() > &*MAX_PUB_EXPONENT {
        return Err(Error::PublicExponentTooLarge);
    }

    Ok(())
}
