//! Container discovery and resource reporting over the cgroup v1 filesystem.
//!
//! This module reads per-container resource accounting from an "lxc"-style
//! cgroup v1 hierarchy, where each controller exposes one subdirectory per
//! container, and renders a sorted summary table.
//!
//! # Key components
//!
//! - [`ContainerRecord`] — one container's metrics, fetched lazily and
//!   cached for the lifetime of the record (a point-in-time snapshot).
//! - [`Collector`] — discovers the container set, owns the aggregate CPU
//!   total and the sorted report.
//! - [`SortKey`] — the report's ordering column.
//!
//! # Files read
//!
//! Relative to the configured cgroup root (default `/sys/fs/cgroup`):
//!
//! - `devices/lxc/<name>/` — discovery, one directory per container
//! - `memory/lxc/<name>/memory.usage_in_bytes` — bytes
//! - `cpu,cpuacct/lxc/<name>/cpuacct.usage` — nanoseconds
//! - `pids/lxc/<name>/pids.current` — process count
//!
//! # Platform requirements
//!
//! - Linux with the cgroup v1 memory, cpuacct and pids controllers mounted.
//! - Read access to the hierarchy under the configured root.
mod collector;
mod container;
mod error;
mod sort;

pub use collector::Collector;
pub use container::ContainerRecord;
pub use error::Error;
pub use sort::SortKey;

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::Path;

    /// Lays out one container's controller files under a synthetic cgroup
    /// root, with the given raw counter contents.
    pub(crate) fn fake_container(root: &Path, name: &str, memory: &str, cpu: &str, procs: &str) {
        let dirs = [
            (format!("devices/lxc/{name}"), None),
            (
                format!("memory/lxc/{name}"),
                Some(("memory.usage_in_bytes", memory)),
            ),
            (format!("cpu,cpuacct/lxc/{name}"), Some(("cpuacct.usage", cpu))),
            (format!("pids/lxc/{name}"), Some(("pids.current", procs))),
        ];
        for (dir, file) in dirs {
            let dir = root.join(dir);
            std::fs::create_dir_all(&dir).unwrap();
            if let Some((file_name, content)) = file {
                std::fs::write(dir.join(file_name), format!("{content}\n")).unwrap();
            }
        }
    }
}
