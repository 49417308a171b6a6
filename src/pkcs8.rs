//! PKCS#8 `PrivateKeyInfo` decoding.
//!
//! ```text
//! PrivateKeyInfo ::= SEQUENCE {
//!     version             INTEGER,
//!     privateKeyAlgorithm AlgorithmIdentifier,
//!     privateKey          OCTET STRING,
//!     attributes          [0] IMPLICIT Attributes OPTIONAL
//! }
//! ```
//!
//! Only rsaEncryption is accepted; the octet string then contains a
//! PKCS#1 `RSAPrivateKey` body. The wrapper is walked strictly by TLV
//! boundaries, so SEQUENCE tags inside the key bytes cannot mis-anchor
//! the inner parse.

use num_traits::Zero;

use crate::der::Reader;
use crate::errors::{Error, Result};
use crate::key::RsaPrivateKey;
use crate::pkcs1;

/// rsaEncryption, RFC 8017 appendix C.
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

pub(crate) fn decode(der: &[u8]) -> Result<RsaPrivateKey> {
    let mut outer = Reader::new(der);
    let mut info = outer.read_sequence()?;
    if !outer.is_empty() {
        return Err(Error::malformed("data after PrivateKeyInfo"));
    }

    let version = info.read_uint()?;
    if !version.is_zero() {
        return Err(Error::malformed("unsupported PrivateKeyInfo version"));
    }

    let mut algorithm = info.read_sequence()?;
    let oid = algorithm.read_oid()?;
    if oid != RSA_ENCRYPTION_OID {
        return Err(Error::unsupported(format!("key algorithm {}", oid)));
    }
    // rsaEncryption parameters are a NULL; nothing in it is used.
    if !algorithm.is_empty() {
        algorithm.read_null()?;
    }

    let key = info.read_octet_string()?;
    pkcs1::decode(key)
}
