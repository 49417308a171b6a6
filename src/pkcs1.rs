//! PKCS#1 `RSAPrivateKey` decoding.
//!
//! ```text
//! RSAPrivateKey ::= SEQUENCE {
//!     version           Version,
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER,  -- e
//!     privateExponent   INTEGER,  -- d
//!     prime1            INTEGER,  -- p
//!     prime2            INTEGER,  -- q
//!     exponent1         INTEGER,  -- d mod (p-1)
//!     exponent2         INTEGER,  -- d mod (q-1)
//!     coefficient       INTEGER   -- (inverse of q) mod p
//! }
//! ```
//!
//! Multi-prime keys carry version 1 and are rejected by the version
//! check, so `otherPrimeInfos` never appears in an accepted body.

use num_traits::Zero;

use crate::der::Reader;
use crate::errors::{Error, Result};
use crate::key::RsaPrivateKey;

pub(crate) fn decode(der: &[u8]) -> Result<RsaPrivateKey> {
    let mut outer = Reader::new(der);
    let mut body = outer.read_sequence()?;
    if !outer.is_empty() {
        return Err(Error::malformed("data after RSAPrivateKey"));
    }

    let version = body.read_uint()?;
    if !version.is_zero() {
        return Err(Error::malformed("unsupported RSAPrivateKey version"));
    }

    let n = body.read_uint()?;
    let e = body.read_uint()?;
    let d = body.read_uint()?;
    let p = body.read_uint()?;
    let q = body.read_uint()?;
    let dp = body.read_uint()?;
    let dq = body.read_uint()?;
    let qinv = body.read_uint()?;

    if !body.is_empty() {
        return Err(Error::malformed("trailing data in RSAPrivateKey"));
    }

    Ok(RsaPrivateKey::from_components(n, e, d, p, q, dp, dq, qinv))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;
    use crate::key::PublicKeyParts;

    // version 0, n = 0x0f33, e = 3, d = 7, p = 5, q = 3, dP = 1,
    // dQ = 1, qInv = 2
    fn sample_body() -> Vec<u8> {
        vec![
            0x30, 0x1c, //
            0x02, 0x01, 0x00, //
            0x02, 0x02, 0x0f, 0x33, //
            0x02, 0x01, 0x03, //
            0x02, 0x01, 0x07, //
            0x02, 0x01, 0x05, //
            0x02, 0x01, 0x03, //
            0x02, 0x01, 0x01, //
            0x02, 0x01, 0x01, //
            0x02, 0x01, 0x02,
        ]
    }

    #[test]
    fn decodes_all_nine_fields() {
        let key = decode(&sample_body()).unwrap();
        assert_eq!(key.n(), &BigUint::from(0x0f33u32));
        assert_eq!(key.e(), &BigUint::from(3u32));
    }

    #[test]
    fn rejects_nonzero_version() {
        let mut der = sample_body();
        der[4] = 0x01;
        assert!(matches!(decode(&der), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn rejects_truncation() {
        let der = sample_body();
        assert!(matches!(
            decode(&der[..der.len() - 1]),
            Err(Error::MalformedKey { .. })
        ));
    }

    #[test]
    fn rejects_missing_integer() {
        // Drop the final INTEGER and shrink the SEQUENCE length.
        let mut der = sample_body();
        der.truncate(der.len() - 3);
        der[1] -= 3;
        assert!(matches!(decode(&der), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn rejects_trailing_data_inside_sequence() {
        let mut der = sample_body();
        der[1] += 2;
        der.extend_from_slice(&[0x05, 0x00]);
        assert!(matches!(decode(&der), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn rejects_trailing_data_after_sequence() {
        let mut der = sample_body();
        der.push(0x00);
        assert!(matches!(decode(&der), Err(Error::MalformedKey { .. })));
    }

    #[test]
    fn rejects_mistagged_field() {
        let mut der = sample_body();
        // modulus tag INTEGER -> OCTET STRING
        der[5] = 0x04;
        assert!(matches!(decode(&der), Err(Error::MalformedKey { .. })));
    }
}
