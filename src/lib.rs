//! RSASSA-PKCS1-v1_5 signatures with SHA-256 ("RS256"), together with
//! decoding of unencrypted PKCS#1 (`RSA PRIVATE KEY`) and PKCS#8
//! (`PRIVATE KEY`) RSA private keys from PEM.
//!
//! The crate is aimed at applications that issue bearer assertions
//! (service-account tokens and similar) on platforms without a native
//! RSA implementation. It signs and verifies; key generation and
//! public-key envelopes are out of scope.
//!
//! ```no_run
//! use rs256::RsaPrivateKey;
//!
//! # fn main() -> rs256::Result<()> {
//! let pem = std::fs::read_to_string("service-account.pem").unwrap();
//! let key = RsaPrivateKey::from_pem(&pem)?;
//!
//! let signature = key.sign(b"header.payload")?;
//! assert!(key.verify(b"header.payload", &signature));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod pkcs1v15;

mod der;
mod internals;
mod key;
mod pem;
mod pkcs1;
mod pkcs8;

pub use crate::errors::{Error, Result};
pub use crate::key::{PublicKeyParts, RsaPrivateKey, RsaPublicKey};
