use std::path::{Path, PathBuf};

use crate::fsutil;

use super::error::Error;

/// A single discovered container and its point-in-time resource metrics.
///
/// Each metric is read from the matching cgroup v1 controller file on first
/// access and cached for the lifetime of the record. There is no refresh or
/// invalidation: a record is a snapshot of one moment, taken lazily.
#[derive(Debug)]
pub struct ContainerRecord {
    name: String,
    root: PathBuf,
    memory_mb: Option<f64>,
    cpu_seconds: Option<f64>,
    cpu_percent: Option<(f64, f64)>,
    process_count: Option<u64>,
}

impl ContainerRecord {
    /// Constructs a record for the container named `name` under the cgroup
    /// hierarchy rooted at `root`.
    ///
    /// No files are touched here; reads happen on first metric access.
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            memory_mb: None,
            cpu_seconds: None,
            cpu_percent: None,
            process_count: None,
        }
    }

    /// Returns the container name, i.e., its cgroup subdirectory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns memory usage in megabytes, rounded to 2 decimals.
    ///
    /// Reads `memory/lxc/<name>/memory.usage_in_bytes` on first call and
    /// caches the converted value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metric`] if the controller file is missing,
    /// unreadable or not a plain integer.
    pub fn memory_mb(&mut self) -> Result<f64, Error> {
        if let Some(mb) = self.memory_mb {
            return Ok(mb);
        }
        let bytes = self.read_metric("memory/lxc", "memory.usage_in_bytes")?;
        let mb = round2(bytes as f64 / 1024.0 / 1024.0);
        self.memory_mb = Some(mb);
        Ok(mb)
    }

    /// Returns cumulative CPU usage in seconds, rounded to 2 decimals.
    ///
    /// Reads `cpu,cpuacct/lxc/<name>/cpuacct.usage` (nanoseconds) on first
    /// call and caches the converted value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metric`] if the controller file is missing,
    /// unreadable or not a plain integer.
    pub fn cpu_seconds(&mut self) -> Result<f64, Error> {
        if let Some(secs) = self.cpu_seconds {
            return Ok(secs);
        }
        let nanos = self.read_metric("cpu,cpuacct/lxc", "cpuacct.usage")?;
        let secs = round2(nanos as f64 / 1e9);
        self.cpu_seconds = Some(secs);
        Ok(secs)
    }

    /// Returns this container's share of `total` CPU seconds as a
    /// percentage, rounded to 2 decimals.
    ///
    /// The result is cached together with the `total` it was computed
    /// against; calling again with a different total recomputes. A zero
    /// total yields 0.0 rather than a division by zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metric`] if the underlying CPU read fails.
    pub fn cpu_percent(&mut self, total: f64) -> Result<f64, Error> {
        if let Some((cached_total, percent)) = self.cpu_percent
            && cached_total == total
        {
            return Ok(percent);
        }
        let percent = if total == 0.0 {
            0.0
        } else {
            round2(self.cpu_seconds()? * 100.0 / total)
        };
        self.cpu_percent = Some((total, percent));
        Ok(percent)
    }

    /// Returns the number of processes currently in the container.
    ///
    /// Reads `pids/lxc/<name>/pids.current` on first call and caches the
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metric`] if the controller file is missing,
    /// unreadable or not a plain integer.
    pub fn process_count(&mut self) -> Result<u64, Error> {
        if let Some(count) = self.process_count {
            return Ok(count);
        }
        let count = self.read_metric("pids/lxc", "pids.current")?;
        self.process_count = Some(count);
        Ok(count)
    }

    fn read_metric(&self, controller: impl AsRef<Path>, file: &str) -> Result<u64, Error> {
        let path = self.root.join(controller).join(&self.name).join(file);
        fsutil::read_counter(path).map_err(|source| Error::Metric {
            container: self.name.clone(),
            source,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::super::testutil::fake_container;
    use super::*;

    #[test]
    fn test_memory_mb_converts_bytes() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "web", "2097152", "5500000000", "7");
        let mut record = ContainerRecord::new(root.path(), "web");
        assert_eq!(record.memory_mb().unwrap(), 2.00);
    }

    #[test]
    fn test_cpu_seconds_converts_nanoseconds() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "web", "2097152", "5500000000", "7");
        let mut record = ContainerRecord::new(root.path(), "web");
        assert_eq!(record.cpu_seconds().unwrap(), 5.50);
    }

    #[test]
    fn test_process_count_plain_integer() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "web", "2097152", "5500000000", "7");
        let mut record = ContainerRecord::new(root.path(), "web");
        assert_eq!(record.process_count().unwrap(), 7);
    }

    #[test]
    fn test_metrics_are_memoized() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "web", "2097152", "5500000000", "7");
        let mut record = ContainerRecord::new(root.path(), "web");
        assert_eq!(record.cpu_seconds().unwrap(), 5.50);

        // A later write to the counter file must not show up: the record is
        // a snapshot of the first read.
        fake_container(root.path(), "web", "1048576", "9000000000", "3");
        assert_eq!(record.cpu_seconds().unwrap(), 5.50);
        assert_eq!(record.memory_mb().unwrap(), 1.00);
    }

    #[test]
    fn test_cpu_percent_keyed_by_total() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "web", "2097152", "2000000000", "7");
        let mut record = ContainerRecord::new(root.path(), "web");
        assert_eq!(record.cpu_percent(10.0).unwrap(), 20.00);
        assert_eq!(record.cpu_percent(10.0).unwrap(), 20.00);
        // A different total recomputes instead of returning the stale value.
        assert_eq!(record.cpu_percent(4.0).unwrap(), 50.00);
    }

    #[test]
    fn test_cpu_percent_zero_total() {
        let root = tempfile::tempdir().unwrap();
        fake_container(root.path(), "idle", "0", "0", "1");
        let mut record = ContainerRecord::new(root.path(), "idle");
        assert_eq!(record.cpu_percent(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_controller_file_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("devices/lxc/ghost")).unwrap();
        let mut record = ContainerRecord::new(root.path(), "ghost");
        match record.memory_mb().unwrap_err() {
            Error::Metric { container, .. } => assert_eq!(container, "ghost"),
            other => panic!("expected Metric error, got {other:?}"),
        }
    }
}
