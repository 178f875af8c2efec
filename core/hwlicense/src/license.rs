//! License records and issuance.
//!
//! A license key is the base64 (standard alphabet, padded) signature over
//! the 16 raw bytes of a device's derived identity. The record carries
//! everything a verifier needs except the device itself:
//!
//! ```json
//! {
//!   "device_id": "AA:BB:CC:DD:EE:FF",
//!   "device_uuid": "53d1d136-d310-56cb-b1a9-221c1759ce6f",
//!   "license_key": "<base64 signature>",
//!   "public_key": "<hex>",
//!   "namespace_id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
//! }
//! ```

use crate::error::LicenseResult;
use crate::identity;
use crate::ids::{DeviceUuid, NamespaceId};
use crate::keypair::KeyPair;
use crate::scheme::SignatureScheme;
use crate::store::{read_record, write_record};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A signed license for one device (`license.json`).
///
/// Fields are kept in their textual wire form; [`verify_record`](crate::verify_record)
/// parses them on use and never trusts `device_uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Raw hardware identifier the license was issued for.
    pub device_id: String,
    /// Identity derived from `device_id` at issuance. Informational.
    pub device_uuid: String,
    /// Base64 signature over the derived identity.
    pub license_key: String,
    /// Hex public key of the issuing licensor.
    pub public_key: String,
    /// Namespace the identity was derived under.
    pub namespace_id: String,
}

impl LicenseRecord {
    /// Loads a license record from `path`.
    ///
    /// Only the record structure is checked here; field contents are
    /// validated by the verifier.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if unreadable, or a format error if the JSON is malformed.
    pub fn load(path: impl AsRef<Path>) -> LicenseResult<Self> {
        read_record(path.as_ref())
    }

    /// Writes the record to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> LicenseResult<()> {
        write_record(path.as_ref(), self)
    }

    /// Parses the stored namespace.
    ///
    /// # Errors
    ///
    /// Returns a `namespace_id` format error if malformed.
    pub fn namespace(&self) -> LicenseResult<NamespaceId> {
        NamespaceId::parse(&self.namespace_id)
    }

    /// Returns true if the stored `device_uuid` equals `derived`.
    ///
    /// Diagnostic only: a matching stored value proves nothing.
    #[must_use]
    pub fn stored_identity_matches(&self, derived: &DeviceUuid) -> bool {
        DeviceUuid::parse(&self.device_uuid).is_ok_and(|stored| stored == *derived)
    }
}

/// Issues a license for `device_id` under the keypair's namespace.
///
/// # Errors
///
/// Only fails if the signing primitive rejects the keypair's own key
/// material, which a successfully constructed [`KeyPair`] rules out.
pub fn issue<S: SignatureScheme>(
    keypair: &KeyPair<S>,
    device_id: &str,
) -> LicenseResult<LicenseRecord> {
    let namespace = keypair.namespace();
    let device_uuid = identity::derive(device_id, &namespace);
    let signature = keypair.sign(device_uuid.as_bytes())?;

    tracing::debug!(%device_uuid, %namespace, "issued license");

    Ok(LicenseRecord {
        device_id: device_id.to_string(),
        device_uuid: device_uuid.to_string(),
        license_key: BASE64.encode(signature),
        public_key: keypair.public_key_hex(),
        namespace_id: namespace.to_string(),
    })
}
