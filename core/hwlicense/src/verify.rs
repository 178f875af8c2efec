//! Offline license verification.
//!
//! The verifier always re-derives the device identity from the raw
//! identifier it is handed. The `device_uuid` stored in a record is never
//! used for the decision; trusting it would let an edited record move a
//! license to other hardware. A foreign license (another device's record)
//! logs at debug level; only a valid signature next to an edited
//! `device_uuid` is worth a warning.

use crate::error::{LicenseError, LicenseResult};
use crate::identity;
use crate::ids::{DeviceUuid, NamespaceId};
use crate::license::LicenseRecord;
use crate::scheme::{Ed25519, SignatureScheme};
use crate::store::decode_hex;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// Verifies an Ed25519 license key for `device_id`.
///
/// Returns `Ok(false)` when the key is well-formed but was not issued for
/// this device under this public key and namespace.
///
/// # Errors
///
/// Returns a format error if the public key is not hex or has the wrong
/// length, or if the license key is not valid base64.
pub fn verify(
    public_key_hex: &str,
    device_id: &str,
    license_key: &str,
    namespace: &NamespaceId,
) -> LicenseResult<bool> {
    verify_with::<Ed25519>(public_key_hex, device_id, license_key, namespace)
}

/// [`verify`] for an arbitrary signature scheme.
///
/// # Errors
///
/// See [`verify`].
pub fn verify_with<S: SignatureScheme>(
    public_key_hex: &str,
    device_id: &str,
    license_key: &str,
    namespace: &NamespaceId,
) -> LicenseResult<bool> {
    let public = decode_public_key::<S>(public_key_hex)?;
    let device_uuid = identity::derive(device_id, namespace);
    check_signature::<S>(&public, &device_uuid, license_key)
}

/// Verifies a stored license record against the device it is presented on.
///
/// # Errors
///
/// Returns a format error if any field the decision depends on
/// (`namespace_id`, `public_key`, `license_key`) is malformed.
pub fn verify_record(record: &LicenseRecord, device_id: &str) -> LicenseResult<bool> {
    verify_record_with::<Ed25519>(record, device_id)
}

/// [`verify_record`] for an arbitrary signature scheme.
///
/// # Errors
///
/// See [`verify_record`].
pub fn verify_record_with<S: SignatureScheme>(
    record: &LicenseRecord,
    device_id: &str,
) -> LicenseResult<bool> {
    let public = decode_public_key::<S>(&record.public_key)?;
    let namespace = record.namespace()?;
    let device_uuid = identity::derive(device_id, &namespace);
    let valid = check_signature::<S>(&public, &device_uuid, &record.license_key)?;

    if !record.stored_identity_matches(&device_uuid) {
        if valid {
            tracing::warn!(
                stored = %record.device_uuid,
                derived = %device_uuid,
                "license verified but stored device_uuid was edited"
            );
        } else {
            tracing::debug!(
                stored = %record.device_uuid,
                derived = %device_uuid,
                "stored device_uuid differs from derived identity"
            );
        }
    }

    Ok(valid)
}

fn decode_public_key<S: SignatureScheme>(public_key_hex: &str) -> LicenseResult<Vec<u8>> {
    let public = decode_hex("public_key", public_key_hex)?;
    if public.len() != S::PUBLIC_KEY_LEN {
        return Err(LicenseError::format(
            "public_key",
            format!("expected {} bytes, got {}", S::PUBLIC_KEY_LEN, public.len()),
        ));
    }
    Ok(public)
}

fn check_signature<S: SignatureScheme>(
    public: &[u8],
    device_uuid: &DeviceUuid,
    license_key: &str,
) -> LicenseResult<bool> {
    let signature = BASE64
        .decode(license_key)
        .map_err(|e| LicenseError::format("license_key", format!("expected base64 ({e})")))?;
    let valid = S::verify(public, device_uuid.as_bytes(), &signature)?;
    tracing::debug!(%device_uuid, valid, "verified license");
    Ok(valid)
}
