//! Shared fixtures for license tests.

#![allow(dead_code)]

use hwlicense::{KeyPair, NamespaceId};
use uuid::Uuid;

/// Fixed Ed25519 seed for reproducible signatures.
pub const TEST_SEED: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32,
];

/// Public key for [`TEST_SEED`].
pub const TEST_PUBLIC_KEY_HEX: &str =
    "79b5562e8fe654f94078b112e8a98ba7901f853ae695bed7e0e3910bad049664";

pub const TEST_DEVICE_ID: &str = "AA:BB:CC:DD:EE:FF";

/// UUIDv5 of `AABBCCDDEEFF` under the DNS namespace.
pub const TEST_DEVICE_UUID: &str = "53d1d136-d310-56cb-b1a9-221c1759ce6f";

/// Signature over [`TEST_DEVICE_UUID`] with [`TEST_SEED`].
pub const TEST_LICENSE_KEY: &str =
    "Ot1achCSttuiqMZ0I6QKaCd221iZts0rPQK+8EexrTuviEGgx2zF8U+yXXbZmVEFn95Uy5D32Pnt8+m7KfPmDQ==";

/// The well-known DNS namespace (`6ba7b810-9dad-11d1-80b4-00c04fd430c8`).
pub fn test_namespace() -> NamespaceId {
    NamespaceId::from_uuid(Uuid::NAMESPACE_DNS)
}

/// Deterministic keypair built from [`TEST_SEED`] under [`test_namespace`].
pub fn test_keypair() -> KeyPair {
    KeyPair::from_secret(TEST_SEED.to_vec(), test_namespace()).unwrap()
}

/// Flips one bit of the decoded license key and re-encodes it.
pub fn flip_bit(license_key: &str, bit: usize) -> String {
    use base64::{Engine, engine::general_purpose::STANDARD};
    let mut bytes = STANDARD.decode(license_key).unwrap();
    bytes[bit / 8] ^= 1 << (bit % 8);
    STANDARD.encode(bytes)
}
