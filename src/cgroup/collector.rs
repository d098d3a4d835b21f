use std::io::Write;
use std::path::PathBuf;

use super::container::ContainerRecord;
use super::error::Error;
use super::sort::SortKey;

/// Namespace under the devices controller that holds one subdirectory per
/// container. The devices hierarchy is used for discovery only; metrics come
/// from the memory, cpuacct and pids controllers.
const DISCOVERY_DIR: &str = "devices/lxc";

/// Discovers containers and aggregates their resource usage into a report.
///
/// The set of containers is fixed at construction time: it is exactly the
/// set of subdirectories present under `<root>/devices/lxc` at that moment,
/// in filesystem listing order. Containers created or destroyed afterwards
/// are not reflected.
#[derive(Debug)]
pub struct Collector {
    records: Vec<ContainerRecord>,
}

impl Collector {
    /// Builds a collector over an explicit set of records.
    ///
    /// [`Collector::discover`] is the usual entry point; this constructor
    /// exists for callers that need a deterministic record order.
    pub fn new(records: Vec<ContainerRecord>) -> Self {
        Self { records }
    }

    /// Discovers all containers under the cgroup hierarchy rooted at `root`.
    ///
    /// Lists the immediate subdirectories of `<root>/devices/lxc` and builds
    /// one [`ContainerRecord`] per subdirectory, in listing order. Plain
    /// files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Discovery`] if the discovery path does not exist or
    /// cannot be read.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        let discovery_path = root.join(DISCOVERY_DIR);
        let entries = std::fs::read_dir(&discovery_path).map_err(|source| Error::Discovery {
            path: discovery_path.clone(),
            source,
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Discovery {
                path: discovery_path.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            records.push(ContainerRecord::new(&root, name));
        }
        log::debug!(
            "discovered {} containers under `{}`",
            records.len(),
            discovery_path.display()
        );
        Ok(Self { records })
    }

    /// Returns the number of discovered containers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the summed CPU usage in seconds across all containers.
    ///
    /// Forces a CPU read for every record, populating each record's cache as
    /// a side effect.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Metric`] encountered; one unreadable
    /// container fails the whole aggregate.
    pub fn total_cpu_seconds(&mut self) -> Result<f64, Error> {
        let mut total = 0.0;
        for record in &mut self.records {
            total += record.cpu_seconds()?;
        }
        Ok(total)
    }

    /// Writes the usage table for all containers to `out`, ordered by `sort`.
    ///
    /// All metrics are fetched before the first byte is written, so a failed
    /// read aborts the report without partial output. Sorting is descending
    /// for every key except [`SortKey::Name`], which is ascending; ties keep
    /// discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Metric`] if any container's metrics cannot be read,
    /// or [`Error::Io`] if writing to `out` fails.
    pub fn write_report<W: Write>(&mut self, sort: SortKey, out: &mut W) -> Result<(), Error> {
        let total = self.total_cpu_seconds()?;
        let mut rows = Vec::with_capacity(self.records.len());
        for record in &mut self.records {
            rows.push(ReportRow {
                name: record.name().to_owned(),
                memory_mb: record.memory_mb()?,
                cpu_seconds: record.cpu_seconds()?,
                cpu_percent: record.cpu_percent(total)?,
                process_count: record.process_count()?,
            });
        }
        sort_rows(&mut rows, sort);

        writeln!(
            out,
            "{:26} {:18} {:5} {} {}",
            "name ", "memory", "cpu", "cpu%", "procs"
        )?;
        writeln!(out, "{}", "-".repeat(62))?;
        for row in &rows {
            writeln!(
                out,
                "{:<20} {:10.2} M {:15.2} {:6.2} {}",
                row.name, row.memory_mb, row.cpu_seconds, row.cpu_percent, row.process_count
            )?;
        }
        Ok(())
    }

    /// Prints the usage table to standard output. See [`Collector::write_report`].
    pub fn print_report(&mut self, sort: SortKey) -> Result<(), Error> {
        let stdout = std::io::stdout();
        self.write_report(sort, &mut stdout.lock())
    }
}

/// One fully fetched table row. Detached from the record so sorting does not
/// have to re-enter the lazy accessors.
struct ReportRow {
    name: String,
    memory_mb: f64,
    cpu_seconds: f64,
    cpu_percent: f64,
    process_count: u64,
}

fn sort_rows(rows: &mut [ReportRow], sort: SortKey) {
    // sort_by is stable, so equal keys keep discovery order.
    match sort {
        SortKey::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Cpu => rows.sort_by(|a, b| b.cpu_seconds.total_cmp(&a.cpu_seconds)),
        SortKey::Memory => rows.sort_by(|a, b| b.memory_mb.total_cmp(&a.memory_mb)),
        SortKey::Percent => rows.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent)),
        SortKey::Procs => rows.sort_by(|a, b| b.process_count.cmp(&a.process_count)),
    }
}
