use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the cache sweeper.
///
/// ```rust
/// use clap::Parser;
/// use modsweep::args::Args;
///
/// let args = Args::parse_from(["modsweep", "./some/path"]);
/// assert!(args.root.ends_with("some/path"));
/// assert_eq!(args.marker, "node_modules");
/// ```
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interactive scanner & cleaner for dependency cache directories"
)]
pub struct Args {
    #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    #[arg(
        long,
        default_value = "node_modules",
        help = "Directory name to hunt for"
    )]
    pub marker: String,

    #[arg(
        long,
        default_value_t = 8,
        help = "Concurrent size probes (0 = derive from CPU count)"
    )]
    pub workers: usize,

    #[arg(long, help = "Print the scan result as a table instead of the UI")]
    pub list: bool,
}

impl Args {
    /// Resolves the probe pool size from the `--workers` flag.
    ///
    /// ```rust
    /// use clap::Parser;
    /// use modsweep::args::Args;
    ///
    /// let args = Args::parse_from(["modsweep", "--workers", "4"]);
    /// assert_eq!(args.resolve_workers(), 4);
    ///
    /// let auto = Args::parse_from(["modsweep", "--workers", "0"]);
    /// assert!(auto.resolve_workers() >= 1);
    /// ```
    pub fn resolve_workers(&self) -> usize {
        if self.workers == 0 {
            std::cmp::max(1, (num_cpus::get() * 3) / 4)
        } else {
            self.workers
        }
    }
}
