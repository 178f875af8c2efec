mod common;

use common::{TEST_DEVICE_ID, TEST_DEVICE_UUID, test_namespace};
use hwlicense::{DeviceIdentity, NamespaceId, derive, normalize_device_id};
use uuid::Uuid;

// ── Normalization ────────────────────────────────────────────────

#[test]
fn mac_colons_are_removed() {
    assert_eq!(normalize_device_id(TEST_DEVICE_ID), "AABBCCDDEEFF");
}

#[test]
fn case_is_preserved() {
    assert_eq!(normalize_device_id("aa:bb"), "aabb");
    assert_ne!(
        derive("aa:bb:cc:dd:ee:ff", &test_namespace()),
        derive(TEST_DEVICE_ID, &test_namespace())
    );
}

#[test]
fn empty_identifier_is_accepted() {
    let a = derive("", &test_namespace());
    let b = derive(":::", &test_namespace());
    assert_eq!(a, b);
}

// ── Derivation ───────────────────────────────────────────────────

#[test]
fn known_vector() {
    let id = derive(TEST_DEVICE_ID, &test_namespace());
    assert_eq!(id.to_string(), TEST_DEVICE_UUID);
}

#[test]
fn known_vector_with_one_digit_changed() {
    let id = derive("AA:BB:CC:DD:EE:FE", &test_namespace());
    assert_eq!(id.to_string(), "c4f56d75-c16d-5487-9bf7-3b210e1cf6d0");
}

#[test]
fn known_vector_other_namespace() {
    let ns = NamespaceId::from_uuid(Uuid::NAMESPACE_URL);
    let id = derive(TEST_DEVICE_ID, &ns);
    assert_eq!(id.to_string(), "ac19f095-8a48-573f-bce5-1fd26ca1c59d");
}

#[test]
fn derivation_is_deterministic() {
    let ns = NamespaceId::random().unwrap();
    assert_eq!(derive(TEST_DEVICE_ID, &ns), derive(TEST_DEVICE_ID, &ns));
}

#[test]
fn namespaces_separate_identities() {
    let a = NamespaceId::random().unwrap();
    let b = NamespaceId::random().unwrap();
    assert_ne!(derive(TEST_DEVICE_ID, &a), derive(TEST_DEVICE_ID, &b));
}

#[test]
fn identity_bundle() {
    let identity = DeviceIdentity::derive(TEST_DEVICE_ID, test_namespace());
    assert_eq!(identity.raw, TEST_DEVICE_ID);
    assert_eq!(identity.namespace, test_namespace());
    assert_eq!(identity.derived.to_string(), TEST_DEVICE_UUID);
    assert_eq!(identity.derived.as_bytes().len(), 16);
}

#[test]
fn identity_bundle_serde() {
    let identity = DeviceIdentity::derive(TEST_DEVICE_ID, test_namespace());
    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json["derived"], TEST_DEVICE_UUID);
    assert_eq!(json["namespace"], "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
}
