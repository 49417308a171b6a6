//! RSASSA-PKCS1-v1_5 signatures with SHA-256 ("RS256"), as described
//! in [RFC 8017 § 8.2].
//!
//! Signing is deterministic: the same key and message always produce
//! the same signature.
//!
//! [RFC 8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::internals::{i2osp, os2ip, rsasp1, rsavp1};
use crate::key::{PublicKeyParts, RsaPrivateKey};

/// DER prefix of a SHA-256 `DigestInfo`, everything up to the digest
/// octets themselves.
pub(crate) const SHA256_DIGEST_INFO_PREFIX: [u8; 19] = [
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

const DIGEST_INFO_LEN: usize = SHA256_DIGEST_INFO_PREFIX.len() + 32;

/// Builds `T`, the DER-encoded DigestInfo over the SHA-256 hash of
/// `msg`.
fn digest_info(msg: &[u8]) -> [u8; DIGEST_INFO_LEN] {
    let mut t = [0u8; DIGEST_INFO_LEN];
    t[..SHA256_DIGEST_INFO_PREFIX.len()].copy_from_slice(&SHA256_DIGEST_INFO_PREFIX);
    t[SHA256_DIGEST_INFO_PREFIX.len()..].copy_from_slice(&Sha256::digest(msg));
    t
}

/// EMSA-PKCS1-v1_5 encoding of `t` into `k` bytes. The padding string
/// must come out at least eight octets long.
fn sign_pad(t: &[u8], k: usize) -> Result<Vec<u8>> {
    let t_len = t.len();
    if k < t_len + 11 {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || T
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..].copy_from_slice(t);

    Ok(em)
}

/// Calculates the RS256 signature of `msg`. The result is exactly
/// `key.size()` bytes.
pub fn sign(key: &RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>> {
    let k = key.size();
    let em = Zeroizing::new(sign_pad(&digest_info(msg), k)?);

    let m = os2ip(&em);
    let s = rsasp1(key, &m)?;
    i2osp(&s, k)
}

/// Verifies an RS256 signature over `msg`.
///
/// Every failure (wrong length, representative out of range, padding
/// or digest mismatch) yields `false`. The content comparison runs in
/// constant time over the full encoded message.
pub fn verify<K: PublicKeyParts>(key: &K, msg: &[u8], sig: &[u8]) -> bool {
    let k = key.size();
    if sig.len() != k {
        return false;
    }

    let m = match rsavp1(key, &os2ip(sig)) {
        Ok(m) => m,
        Err(_) => return false,
    };
    let em = match i2osp(&m, k) {
        Ok(em) => em,
        Err(_) => return false,
    };
    let expected = match sign_pad(&digest_info(msg), k) {
        Ok(em) => em,
        Err(_) => return false,
    };

    expected.ct_eq(&em).into()
}
