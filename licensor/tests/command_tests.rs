use hwlicense_cli::{
    EXIT_ERROR, EXIT_INVALID, EXIT_OK, exit_status, generate_license, init_config, new_namespace,
    resolve_device_id, verify_license,
};
use std::fs;

const MAC: &str = "AA:BB:CC:DD:EE:FF";

#[test]
fn init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    let keypair = init_config(&config).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(json["public_key"], keypair.public_key_hex());
    assert_eq!(json["namespace_id"], keypair.namespace().to_string());
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    init_config(&config).unwrap();
    let before = fs::read_to_string(&config).unwrap();

    let err = init_config(&config).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn generate_then_verify() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    let license = dir.path().join("licenses/device.json");
    init_config(&config).unwrap();

    let record = generate_license(&config, MAC, &license).unwrap();
    assert_eq!(record.device_id, MAC);
    assert!(license.exists());

    let report = verify_license(&license, MAC).unwrap();
    assert!(report.valid);
    assert_eq!(report.device_uuid.to_string(), record.device_uuid);
}

#[test]
fn verify_on_other_device_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    let license = dir.path().join("license.json");
    init_config(&config).unwrap();
    generate_license(&config, MAC, &license).unwrap();

    let report = verify_license(&license, "AA:BB:CC:DD:EE:FE").unwrap();
    assert!(!report.valid);
}

#[test]
fn generate_without_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_license(&dir.path().join("missing.json"), MAC, &dir.path().join("out.json"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("failed to load configuration"));
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn verify_garbled_license_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    let license = dir.path().join("license.json");
    init_config(&config).unwrap();
    let mut record = generate_license(&config, MAC, &license).unwrap();
    record.license_key = "%%%".into();
    record.save(&license).unwrap();

    let err = verify_license(&license, MAC).unwrap_err();
    assert!(format!("{err:#}").contains("license_key"));
}

#[test]
fn exit_status_separates_invalid_from_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("licensor.json");
    let license = dir.path().join("license.json");
    init_config(&config).unwrap();
    let mut record = generate_license(&config, MAC, &license).unwrap();

    let valid = verify_license(&license, MAC).map(|r| r.valid);
    assert_eq!(exit_status(&valid), EXIT_OK);

    let invalid = verify_license(&license, "AA:BB:CC:DD:EE:FE").map(|r| r.valid);
    assert_eq!(exit_status(&invalid), EXIT_INVALID);

    let missing = verify_license(&dir.path().join("missing.json"), MAC).map(|r| r.valid);
    assert_eq!(exit_status(&missing), EXIT_ERROR);

    record.license_key = "%%%".into();
    record.save(&license).unwrap();
    let garbled = verify_license(&license, MAC).map(|r| r.valid);
    assert_eq!(exit_status(&garbled), EXIT_ERROR);
}

#[test]
fn explicit_device_id_wins() {
    assert_eq!(resolve_device_id(Some(MAC.into())).unwrap(), MAC);
}

#[test]
fn namespaces_are_fresh() {
    assert_ne!(new_namespace().unwrap(), new_namespace().unwrap());
}
