use std::path::PathBuf;

/// lxc-stat: reports per-container resource usage (memory, CPU time,
/// process count) from an lxc-style cgroup v1 hierarchy and prints a sorted
/// summary table.
///
/// This library exposes the discovery and reporting machinery; the `lxc-stat`
/// binary is a thin CLI wrapper around [`run`].
pub mod cgroup;
pub mod fsutil;

/// Conventional mount point of the cgroup v1 hierarchy.
pub const DEFAULT_CGROUP_ROOT: &str = "/sys/fs/cgroup";

/// Environment variable overriding the cgroup root, e.g. when the hierarchy
/// is bind-mounted somewhere else inside a monitoring container.
pub const CGROUP_ROOT_ENV: &str = "LXC_STAT_CGROUP_ROOT";

/// Discovers all containers and prints their usage table to stdout.
///
/// The cgroup root is taken from the `LXC_STAT_CGROUP_ROOT` environment
/// variable if set, otherwise `/sys/fs/cgroup`. The container set is the one
/// present at discovery time; every metric is a one-shot snapshot.
///
/// # Errors
///
/// Returns a [`cgroup::Error`] if the discovery path is unreadable, if any
/// container's controller files cannot be read or parsed, or if writing the
/// table fails. The first error aborts the whole report; no partial table is
/// printed.
pub fn run(sort: cgroup::SortKey) -> Result<(), cgroup::Error> {
    let root = std::env::var_os(CGROUP_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CGROUP_ROOT));
    log::debug!("cgroup root: {}", root.display());

    let mut collector = cgroup::Collector::discover(root)?;
    collector.print_report(sort)
}
