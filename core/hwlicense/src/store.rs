//! JSON record persistence shared by config and license records.
//!
//! Records are written as two-space indented JSON objects, readable only by
//! the owning user. Writes overwrite in place: the file is restricted to the
//! owner, then emptied, then rewritten. A crash mid-write can leave a
//! truncated record behind, which the next load reports as a format error.

use crate::error::{LicenseError, LicenseResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
const OWNER_ONLY: u32 = 0o600;

/// Serializes `record` and writes it to `path`, creating parent directories.
pub(crate) fn write_record<T: Serialize>(path: &Path, record: &T) -> LicenseResult<()> {
    let json = serde_json::to_string_pretty(record).map_err(|source| LicenseError::Record {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| LicenseError::io(dir, e))?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OWNER_ONLY);
    }

    let mut file = options.open(path).map_err(|e| LicenseError::io(path, e))?;
    // An existing file keeps its old mode through `open`. Tighten it before
    // truncating so the old contents are never readable under the new data.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(OWNER_ONLY))
            .map_err(|e| LicenseError::io(path, e))?;
    }
    file.set_len(0).map_err(|e| LicenseError::io(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| LicenseError::io(path, e))?;

    tracing::debug!(path = %path.display(), "record written");
    Ok(())
}

/// Reads and parses the record at `path`.
pub(crate) fn read_record<T: DeserializeOwned>(path: &Path) -> LicenseResult<T> {
    let data = fs::read_to_string(path).map_err(|e| LicenseError::io(path, e))?;
    serde_json::from_str(&data).map_err(|source| LicenseError::Record {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes a hex field, naming the field on failure.
pub(crate) fn decode_hex(field: &'static str, value: &str) -> LicenseResult<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| LicenseError::format(field, format!("expected hex string ({e})")))
}
