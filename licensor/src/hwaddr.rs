//! Hardware identifier lookup for the local machine.
//!
//! Prefers the `br-lan` bridge found on OpenWrt routers, then falls back to
//! the first interface (by name) that is up, is not a loopback, and has a
//! non-zero MAC address. Reads Linux sysfs; other platforms must pass the
//! identifier explicitly.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Root of the per-interface sysfs tree.
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// Interface checked before any other.
pub const PREFERRED_INTERFACE: &str = "br-lan";

const IFF_UP: u32 = 0x1;
const IFF_LOOPBACK: u32 = 0x8;

/// Returns the MAC address that identifies this machine.
pub fn primary_mac() -> Result<String> {
    if !cfg!(target_os = "linux") {
        bail!("automatic hardware detection is only supported on Linux; pass --mac");
    }
    primary_mac_in(Path::new(SYS_CLASS_NET))
}

/// [`primary_mac`] against an arbitrary sysfs-style directory.
pub fn primary_mac_in(root: &Path) -> Result<String> {
    if let Some(mac) = read_address(&root.join(PREFERRED_INTERFACE)) {
        tracing::debug!(interface = PREFERRED_INTERFACE, %mac, "using preferred interface");
        return Ok(mac);
    }

    let mut names: Vec<_> = fs::read_dir(root)
        .with_context(|| format!("failed to list network interfaces in {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .collect();
    names.sort();

    for name in names {
        let dir = root.join(&name);
        let Some(flags) = read_flags(&dir) else {
            continue;
        };
        if flags & IFF_UP == 0 || flags & IFF_LOOPBACK != 0 {
            continue;
        }
        if let Some(mac) = read_address(&dir) {
            tracing::debug!(interface = ?name, %mac, "using fallback interface");
            return Ok(mac);
        }
    }

    bail!("could not find {PREFERRED_INTERFACE} or another active interface with a MAC address")
}

fn read_flags(dir: &Path) -> Option<u32> {
    let raw = fs::read_to_string(dir.join("flags")).ok()?;
    let raw = raw.trim();
    u32::from_str_radix(raw.trim_start_matches("0x"), 16).ok()
}

fn read_address(dir: &Path) -> Option<String> {
    let mac = fs::read_to_string(dir.join("address")).ok()?;
    let mac = mac.trim();
    let is_zero = mac.chars().all(|c| c == '0' || c == ':');
    (!is_zero).then(|| mac.to_string())
}
