use std::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The PEM label or the PKCS#8 algorithm identifier names a key
    /// type this crate does not handle.
    UnsupportedKeyFormat { reason: String },
    /// The armour, base64 body or DER structure of a key is broken.
    MalformedKey { reason: String },
    /// The modulus is too short to hold the padded DigestInfo.
    MessageTooLong,
    /// A representative fell outside `[0, n)`, or an integer does not
    /// fit the requested octet-string width.
    IntegerOutOfRange,
    InvalidModulus,
    InvalidPrime,
    InvalidExponent,
    PublicExponentTooSmall,
    PublicExponentTooLarge,
    Internal,
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedKey {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Error::UnsupportedKeyFormat {
            reason: reason.into(),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedKeyFormat { reason } => {
                write!(f, "unsupported key format: {}", reason)
            }
            Error::MalformedKey { reason } => write!(f, "malformed key: {}", reason),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::IntegerOutOfRange => write!(f, "integer out of range"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::PublicExponentTooSmall => write!(f, "public exponent too small"),
            Error::PublicExponentTooLarge => write!(f, "public exponent too large"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}
