//! Octet-string/integer conversions and the raw RSA operations
//! (RFC 8017 §4 and §5.2).

use num_bigint::{BigUint, IntoBigInt, IntoBigUint, ToBigInt};
use num_traits::{Signed, Zero};
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::key::{PublicKeyParts, RsaPrivateKey};

/// OS2IP: interprets a big-endian octet string as a non-negative
/// integer.
#[inline]
pub(crate) fn os2ip(input: &[u8]) -> BigUint {
    BigUint::from_bytes_be(input)
}

/// I2OSP: emits `x` as a big-endian octet string of exactly `len`
/// bytes, left-padded with zeros. Fails with `IntegerOutOfRange` when
/// `x >= 256^len`.
#[inline]
pub(crate) fn i2osp(x: &BigUint, len: usize) -> Result<Vec<u8>> {
    left_pad(&x.to_bytes_be(), len)
}

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
pub(crate) fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::IntegerOutOfRange);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// RSAVP1: raw RSA public operation, `s^e mod n`. No padding is
/// performed.
#[inline]
pub(crate) fn rsavp1<K: PublicKeyParts>(key: &K, s: &BigUint) -> Result<BigUint> {
    if s >= key.n() {
        return Err(Error::IntegerOutOfRange);
    }

    Ok(s.modpow(key.e(), key.n()))
}

/// RSASP1: raw RSA private operation, `m^d mod n`.
///
/// Uses the CRT components when both primes are present, falling back
/// to the plain private exponent otherwise. Errors in the CRT
/// computation are caught by applying the public exponent to the
/// result, which must reproduce the representative.
pub(crate) fn rsasp1(key: &RsaPrivateKey, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::IntegerOutOfRange);
    }

    let s = if key.p().is_zero() || key.q().is_zero() {
        m.modpow(key.d(), key.n())
    } else {
        crt(key, m)
    };

    if s.modpow(key.e(), key.n()) != *m {
        return Err(Error::Internal);
    }

    Ok(s)
}

/// Garner recombination over the two primes:
/// `s = s2 + q * (qInv * (s1 - s2) mod p)`.
fn crt(key: &RsaPrivateKey, m: &BigUint) -> BigUint {
    let mut p = key.p().to_bigint().unwrap();
    let mut q = key.q().to_bigint().unwrap();
    let mut qinv = key.qinv().to_bigint().unwrap();

    // s1 = m^dP mod p, s2 = m^dQ mod q
    let mut s1 = m.modpow(key.dp(), key.p()).into_bigint().unwrap();
    let mut s2 = m.modpow(key.dq(), key.q()).into_bigint().unwrap();

    s1 -= &s2;
    while s1.is_negative() {
        s1 += &p;
    }
    s1 *= &qinv;
    s1 %= &p;
    s1 *= &q;
    s1 += &s2;

    let s = s1.into_biguint().expect("CRT recombination is non-negative");

    // clear tmp values
    s2.zeroize();
    p.zeroize();
    q.zeroize();
    qinv.zeroize();

    s
}
