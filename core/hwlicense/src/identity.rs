//! Device identity derivation.
//!
//! Maps a raw hardware identifier (typically a MAC address) to a stable
//! name-based UUID (version 5) under a namespace. The mapping is pure: the
//! same identifier and namespace always give the same identity, and the
//! identity does not reveal the identifier.

use crate::ids::{DeviceUuid, NamespaceId};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Separator stripped from raw identifiers before hashing.
const SEPARATOR: char = ':';

/// Normalizes a raw identifier so `AA:BB:CC` and `AABBCC` hash the same.
#[must_use]
pub fn normalize_device_id(raw: &str) -> Cow<'_, str> {
    if raw.contains(SEPARATOR) {
        Cow::Owned(raw.replace(SEPARATOR, ""))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Derives the device identity for `raw` under `namespace`.
#[must_use]
pub fn derive(raw: &str, namespace: &NamespaceId) -> DeviceUuid {
    let name = normalize_device_id(raw);
    DeviceUuid::from_uuid(Uuid::new_v5(&namespace.as_uuid(), name.as_bytes()))
}

/// A raw hardware identifier together with the identity derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// The identifier as supplied by the caller.
    pub raw: String,
    /// The namespace the identity was derived under.
    pub namespace: NamespaceId,
    /// The derived identity.
    pub derived: DeviceUuid,
}

impl DeviceIdentity {
    /// Derives the identity of `raw` under `namespace`.
    #[must_use]
    pub fn derive(raw: impl Into<String>, namespace: NamespaceId) -> Self {
        let raw = raw.into();
        let derived = derive(&raw, &namespace);
        Self {
            raw,
            namespace,
            derived,
        }
    }
}
