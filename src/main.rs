use std::fs;
use std::process;

use anyhow::Result;
use clap::Parser;

use modsweep::args::Args;
use modsweep::{report, tui};

fn main() -> Result<()> {
    let args = Args::parse();

    // Root problems are fatal before any terminal setup.
    let root = match fs::canonicalize(&args.root) {
        Ok(root) if root.is_dir() => root,
        _ => {
            eprintln!("Error: '{}' is not a directory.", args.root.display());
            process::exit(1);
        }
    };

    let workers = args.resolve_workers();

    if args.list {
        report::run_list(&root, &args.marker, workers);
        return Ok(());
    }

    tui::run(&root, &args.marker, workers)
}
