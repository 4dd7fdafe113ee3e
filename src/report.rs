use std::path::Path;
use std::sync::mpsc;

use crate::model::{Record, ScanEvent};
use crate::scanner::spawn_scan;
use crate::util::fmt_size;

/// Runs a scan to completion and prints the result table to stdout.
///
/// This is the non-interactive counterpart of the TUI: same scanner, same
/// probe pool, no terminal takeover.
pub fn run_list(root: &Path, marker: &str, workers: usize) {
    let (tx, rx) = mpsc::channel();
    let scan = spawn_scan(root.to_path_buf(), marker.to_string(), workers, tx);

    let mut records = Vec::new();
    while let Ok(event) = rx.recv() {
        match event {
            ScanEvent::Entry(record) => records.push(record),
            ScanEvent::Done => break,
        }
    }
    let _ = scan.join();

    print_table(root, marker, &records);
}

/// Prints discovered targets and totals in the scan's completion order.
pub fn print_table(root: &Path, marker: &str, records: &[Record]) {
    println!("Root: {}", root.display());
    println!("Marker: {}", marker);
    println!("Found: {}", records.len());
    println!("-");
    println!("{:<50} {:>10}", "PATH", "SIZE");
    println!("{:-<50} {:-<10}", "", "");

    let mut total_kib: u64 = 0;
    for record in records {
        total_kib += record.size_kib;
        println!("{:<50} {:>10}", record.display_path, record.size_label);
    }

    println!("{:-<50} {:-<10}", "", "");
    println!("{:<50} {:>10}", "Total", fmt_size(total_kib));
}
