//! Host system information
//!
//! A passthrough to the OS for the UI's "about this machine" panel.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sysinfo::{Disks, System};
use tracing::debug;

const GIB: u64 = 1024 * 1024 * 1024;

/// Placeholder when no volume could be measured
pub const UNAVAILABLE: &str = "Unavailable";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    /// CPU architecture, e.g. `x86_64`
    pub cpu: String,
    /// Total memory, e.g. `16 GB`
    pub memory: String,
    /// Capacity of the root volume, e.g. `512 GB`
    pub disk: String,
}

/// Collect system information. Never fails.
pub fn collect() -> SystemInfo {
    let mut system = System::new();
    system.refresh_memory();

    let disks = Disks::new_with_refreshed_list();
    let volumes: Vec<(&Path, u64)> = disks
        .list()
        .iter()
        .map(|disk| (disk.mount_point(), disk.total_space()))
        .collect();

    let info = SystemInfo {
        cpu: std::env::consts::ARCH.to_string(),
        memory: format_gb(system.total_memory()),
        disk: root_volume_capacity(&volumes)
            .map(format_gb)
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
    };
    debug!(?info, "Collected system info");
    info
}

/// Round a byte count to whole gigabytes
pub fn format_gb(bytes: u64) -> String {
    let gb = (bytes as f64 / GIB as f64).round() as u64;
    format!("{} GB", gb)
}

/// Total space of the volume mounted at `/`, else the first volume listed
fn root_volume_capacity(volumes: &[(&Path, u64)]) -> Option<u64> {
    volumes
        .iter()
        .find(|(mount, _)| *mount == Path::new("/"))
        .or_else(|| volumes.first())
        .map(|(_, total)| *total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gb_rounds() {
        assert_eq!(format_gb(0), "0 GB");
        assert_eq!(format_gb(16 * GIB), "16 GB");
        assert_eq!(format_gb(GIB + GIB / 2), "2 GB");
        assert_eq!(format_gb(GIB + GIB / 3), "1 GB");
    }

    #[test]
    fn test_root_volume_preferred() {
        let volumes = [
            (Path::new("/boot"), GIB),
            (Path::new("/"), 100 * GIB),
            (Path::new("/home"), 500 * GIB),
        ];
        assert_eq!(root_volume_capacity(&volumes), Some(100 * GIB));
    }

    #[test]
    fn test_falls_back_to_first_volume() {
        let volumes = [(Path::new("C:\\"), 256 * GIB), (Path::new("D:\\"), GIB)];
        assert_eq!(root_volume_capacity(&volumes), Some(256 * GIB));
        assert_eq!(root_volume_capacity(&[]), None);
    }

    #[test]
    fn test_collect_reports_arch() {
        let info = collect();
        assert_eq!(info.cpu, std::env::consts::ARCH);
        assert!(info.memory.ends_with(" GB"));
        assert!(!info.disk.is_empty());
    }
}
