//! Identifier types for namespaces and derived device identities.
//!
//! Both wrap a [`Uuid`] and render in canonical hyphenated form.

use crate::error::{LicenseError, LicenseResult};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A 128-bit namespace that scopes identity derivation to one product
/// or deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(Uuid);

impl NamespaceId {
    /// Generates a fresh random namespace from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Crypto`] if the random source is unavailable.
    pub fn random() -> LicenseResult<Self> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| LicenseError::Crypto(format!("namespace: {e}")))?;
        Ok(Self(uuid::Builder::from_random_bytes(bytes).into_uuid()))
    }

    /// Creates a namespace from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a namespace from its textual form.
    ///
    /// # Errors
    ///
    /// Returns a format error on the `namespace_id` field.
    pub fn parse(s: &str) -> LicenseResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| LicenseError::format("namespace_id", format!("expected UUID text ({e})")))
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NamespaceId {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for NamespaceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// The identity derived from a raw hardware identifier under a namespace.
///
/// Its 16 raw bytes are the message a license key signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceUuid(Uuid);

impl DeviceUuid {
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the 16 bytes that get signed.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Parses a derived identity from its textual form.
    ///
    /// # Errors
    ///
    /// Returns a format error on the `device_uuid` field.
    pub fn parse(s: &str) -> LicenseResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| LicenseError::format("device_uuid", format!("expected UUID text ({e})")))
    }
}

impl fmt::Display for DeviceUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceUuid {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
