//! Error types for license issuance and verification.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`LicenseError`].
///
/// Callers that only need to tell "unreadable" from "garbled" from
/// "no entropy" match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A record could not be read or written.
    Io,
    /// An input field or record is malformed.
    Format,
    /// Key material could not be generated.
    Crypto,
}

/// Licensing errors.
///
/// A license that simply does not match a device is not an error; the
/// verifier reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Reading or writing a record failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single field is malformed (bad hex, bad base64, wrong length, ...).
    #[error("invalid {field}: {reason}")]
    Format {
        field: &'static str,
        reason: String,
    },

    /// The structured record itself could not be parsed or produced.
    #[error("malformed record {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The secure random source failed.
    #[error("key generation failed: {0}")]
    Crypto(String),
}

impl LicenseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Format { .. } | Self::Record { .. } => ErrorKind::Format,
            Self::Crypto(_) => ErrorKind::Crypto,
        }
    }

    /// Returns true if the input was corrupted or forged rather than unreadable.
    #[must_use]
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
