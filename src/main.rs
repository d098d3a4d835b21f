use clap::Parser;

use lxc_stat::cgroup::SortKey;

/// LXC 2.0 statistics utility.
///
/// Reads per-container memory, CPU and process-count accounting from the
/// cgroup v1 hierarchy and prints a summary table sorted by the requested
/// column.
#[derive(Parser)]
#[command(name = "lxc-stat", version, about = "LXC container statistics utility")]
struct Cli {
    /// Sort column (name, cpu, memory, percent or procs).
    ///
    /// Unrecognized values fall back to cpu ordering.
    #[arg(long, default_value = "cpu")]
    sort: String,
}

/// Entry point. Any discovery or metric error propagates out as a non-zero
/// exit with a diagnostic message.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    lxc_stat::run(SortKey::parse_lenient(&cli.sort))?;
    Ok(())
}
