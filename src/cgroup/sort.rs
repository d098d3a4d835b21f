/// Column a report is ordered by.
///
/// `Name` sorts ascending; every other key sorts descending, so the heaviest
/// consumers come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    Cpu,
    Memory,
    Percent,
    Procs,
}

impl SortKey {
    /// Maps a user-supplied key to a [`SortKey`].
    ///
    /// Unrecognized keys silently fall back to [`SortKey::Cpu`]. This
    /// mirrors the historical CLI behavior, where a typo in `--sort` still
    /// produced a CPU-ordered report instead of an error.
    pub fn parse_lenient(key: &str) -> Self {
        match key {
            "name" => Self::Name,
            "cpu" => Self::Cpu,
            "memory" => Self::Memory,
            "percent" => Self::Percent,
            "procs" => Self::Procs,
            _ => Self::Cpu,
        }
    }
}
