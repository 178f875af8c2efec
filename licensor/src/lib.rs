//! Licensor commands shared by the `license-manager` binary and its tests.
//!
//! Each function wraps one core operation with the file-level policy the
//! command line needs (refusing to reinitialize, resolving the local
//! hardware identifier, error context naming the file).

pub mod hwaddr;

use anyhow::{Context, Result, bail};
use hwlicense::{DeviceUuid, Ed25519, KeyPair, LicenseRecord, NamespaceId};
use std::path::Path;

/// Default licensor config path.
pub const DEFAULT_CONFIG: &str = "licensor.json";

/// Default license record path.
pub const DEFAULT_LICENSE: &str = "license.json";

/// Exit status for a command that completed and, for `verify`, found a valid license.
pub const EXIT_OK: u8 = 0;

/// Exit status for a well-formed license that does not match the device.
pub const EXIT_INVALID: u8 = 1;

/// Exit status for a command that failed before reaching a verdict.
pub const EXIT_ERROR: u8 = 2;

/// Outcome of checking a license on a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Identifier the license was checked against.
    pub device_id: String,
    /// Identity re-derived from `device_id`.
    pub device_uuid: DeviceUuid,
    /// Whether the license is valid for this device.
    pub valid: bool,
}

/// Uses `explicit` if given, otherwise detects the local MAC address.
pub fn resolve_device_id(explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(id) => Ok(id),
        None => hwaddr::primary_mac().context("failed to detect a hardware identifier"),
    }
}

/// Generates a new keypair and saves it to `config`.
///
/// Refuses to touch an existing file so issued licenses stay verifiable.
pub fn init_config(config: &Path) -> Result<KeyPair> {
    if config.exists() {
        bail!(
            "configuration file {} already exists. Delete it first if you want to reinitialize.",
            config.display()
        );
    }

    let keypair = KeyPair::<Ed25519>::generate().context("failed to generate keypair")?;
    keypair
        .save(config)
        .with_context(|| format!("failed to save configuration to {}", config.display()))?;

    tracing::info!(
        path = %config.display(),
        namespace = %keypair.namespace(),
        "licensor initialized"
    );
    Ok(keypair)
}

/// Issues a license for `device_id` with the keypair in `config` and writes it to `output`.
pub fn generate_license(config: &Path, device_id: &str, output: &Path) -> Result<LicenseRecord> {
    let keypair = KeyPair::<Ed25519>::load(config)
        .with_context(|| format!("failed to load configuration {}", config.display()))?;

    let record = hwlicense::issue(&keypair, device_id).context("failed to sign license")?;
    record
        .save(output)
        .with_context(|| format!("failed to save license to {}", output.display()))?;

    tracing::info!(
        path = %output.display(),
        device_uuid = %record.device_uuid,
        "license generated"
    );
    Ok(record)
}

/// Checks the license at `license` against `device_id`.
pub fn verify_license(license: &Path, device_id: &str) -> Result<VerifyReport> {
    let record = LicenseRecord::load(license)
        .with_context(|| format!("failed to load license {}", license.display()))?;

    let namespace = record.namespace().context("failed to read license namespace")?;
    let device_uuid = hwlicense::derive(device_id, &namespace);
    let valid = hwlicense::verify_record(&record, device_id).context("failed to verify license")?;

    Ok(VerifyReport {
        device_id: device_id.to_string(),
        device_uuid,
        valid,
    })
}

/// Maps a command outcome to the process exit status.
///
/// `Ok(false)` is an INVALID verdict and stays distinct from a command that
/// could not run at all, so scripts can tell a foreign license from a
/// missing or garbled one.
pub fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_INVALID,
        Err(_) => EXIT_ERROR,
    }
}

/// Generates a standalone namespace.
pub fn new_namespace() -> Result<NamespaceId> {
    hwlicense::generate_namespace().context("failed to generate namespace UUID")
}
