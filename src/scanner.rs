use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use rayon::prelude::*;

use crate::model::{Record, ScanEvent};
use crate::probe::measure_kib;

/// Walks `root` top-down and collects every directory named `marker`.
///
/// A directory containing a marker child records the child's full path and
/// never descends into it, so nothing nested inside one target is ever
/// reported; sibling subtrees are still walked. Directory symlinks are not
/// followed and unreadable directories are skipped without aborting the walk.
pub fn discover_targets(root: &Path, marker: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };
            if !file_type.is_dir() || file_type.is_symlink() {
                continue;
            }

            if entry.file_name() == marker {
                found.push(entry.path());
            } else {
                pending.push(entry.path());
            }
        }
    }

    found
}

/// Spawns the background scan: discovery walk, then size probes across a
/// bounded worker pool.
///
/// Each completed probe is streamed to `tx` as [`ScanEvent::Entry`] in
/// completion order (unordered with respect to discovery), followed by
/// exactly one [`ScanEvent::Done`]. A probe that fails still yields a
/// zero-sized record, so every discovered target appears in the output.
/// Send failures are ignored; they only occur once the UI has gone away.
pub fn spawn_scan(
    root: PathBuf,
    marker: String,
    workers: usize,
    tx: Sender<ScanEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let targets = discover_targets(&root, &marker);

        match rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
        {
            Ok(pool) => pool.install(|| {
                targets.into_par_iter().for_each_with(tx.clone(), |tx, target| {
                    let _ = tx.send(ScanEvent::Entry(build_record(&root, target)));
                });
            }),
            // Pool construction failing leaves the probes sequential, not lost.
            Err(_) => {
                for target in targets {
                    let _ = tx.send(ScanEvent::Entry(build_record(&root, target)));
                }
            }
        }

        let _ = tx.send(ScanEvent::Done);
    })
}

/// Measures one target and shapes it for display.
///
/// The display path is the target's parent relative to the scan root: the
/// project directory is what the operator decides about, not the cache
/// folder inside it. The root itself displays as `"."`.
pub fn build_record(root: &Path, target: PathBuf) -> Record {
    let size_kib = measure_kib(&target);

    let parent = target.parent().unwrap_or(&target);
    let display = match parent.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => String::from("."),
        Ok(rel) => rel.display().to_string(),
        Err(_) => parent.display().to_string(),
    };

    Record::new(target, display, size_kib)
}
