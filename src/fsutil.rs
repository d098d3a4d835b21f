use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Error that occurs when reading a single-value cgroup counter file fails.
#[derive(Debug, thiserror::Error)]
pub enum CounterReadError {
    #[error("failed to read counter file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid counter value in `{path}`: '{value}': {source}")]
    Parse {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Reads a cgroup counter file containing a single unsigned integer.
///
/// Files such as `memory.usage_in_bytes`, `cpuacct.usage` and `pids.current`
/// hold one decimal value followed by a newline. The file is opened, read
/// fully and closed within this call; the handle is never kept around.
///
/// # Errors
///
/// Returns a [`CounterReadError`] if the file cannot be read or its content
/// does not parse as a `u64`.
///
/// # Example
/// ```no_run
/// # use lxc_stat::fsutil;
/// let bytes = fsutil::read_counter("/sys/fs/cgroup/memory/lxc/web/memory.usage_in_bytes")?;
/// # Ok::<(), fsutil::CounterReadError>(())
/// ```
pub fn read_counter(path: impl AsRef<Path>) -> Result<u64, CounterReadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CounterReadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = content.trim();
    value.parse().map_err(|source| CounterReadError::Parse {
        path: path.to_path_buf(),
        value: value.to_string(),
        source,
    })
}
