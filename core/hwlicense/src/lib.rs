//! Hardware-bound license issuance and offline verification.
//!
//! This crate handles:
//! - Deriving a stable device identity (UUIDv5) from a raw hardware identifier
//! - Generating, saving and loading the licensor's Ed25519 keypair
//! - Issuing license records that sign a device identity
//! - Verifying a license against the device it is presented on
//!
//! # Design Principles
//!
//! - **Offline**: issuance and verification need nothing but local records
//! - **Recompute, never trust**: verification re-derives the identity from the raw identifier
//! - **Swappable primitive**: signing goes through [`SignatureScheme`]
//! - **Mismatch is not an error**: a non-matching license is `Ok(false)`;
//!   malformed input is a [`LicenseError`] of kind [`ErrorKind::Format`]
//! - **Exact fields**: hex, base64 and UUID fields are decoded as given;
//!   surrounding whitespace is malformed input, not something to trim away
//!
//! How the raw hardware identifier is obtained is up to the caller.

mod error;
mod identity;
mod ids;
mod keypair;
mod license;
mod scheme;
mod store;
mod verify;

pub use error::{ErrorKind, LicenseError, LicenseResult};
pub use identity::{DeviceIdentity, derive, normalize_device_id};
pub use ids::{DeviceUuid, NamespaceId};
pub use keypair::{KeyPair, generate_namespace};
pub use license::{LicenseRecord, issue};
pub use scheme::{Ed25519, SignatureScheme};
pub use verify::{verify, verify_record, verify_record_with, verify_with};
