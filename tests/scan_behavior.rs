use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use modsweep::model::{Record, ScanEvent};
use modsweep::probe::measure_kib;
use modsweep::scanner::{discover_targets, spawn_scan};
use tempfile::TempDir;

const MARKER: &str = "node_modules";

fn plant_target(root: &Path, project: &str) -> Result<()> {
    let target = root.join(project).join(MARKER);
    fs::create_dir_all(target.join("dep"))?;
    fs::write(target.join("dep").join("index.js"), vec![b'x'; 4096])?;
    Ok(())
}

fn drain_scan(root: &Path) -> Vec<Record> {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_scan(root.to_path_buf(), MARKER.to_string(), 4, tx);

    let mut records = Vec::new();
    let mut done = false;
    while let Ok(event) = rx.recv_timeout(Duration::from_secs(30)) {
        match event {
            ScanEvent::Entry(record) => {
                assert!(!done, "no entries may follow the completion signal");
                records.push(record);
            }
            ScanEvent::Done => {
                done = true;
                break;
            }
        }
    }

    assert!(done, "scan must end with a completion signal");
    handle.join().expect("scan thread panicked");
    records
}

#[test]
fn records_display_the_parent_project_relative_to_root() -> Result<()> {
    let root = TempDir::new()?;
    for project in ["app-one", "app-two", "app-three"] {
        plant_target(root.path(), project)?;
    }

    let records = drain_scan(root.path());
    assert_eq!(records.len(), 3);

    let displays: HashSet<&str> = records
        .iter()
        .map(|record| record.display_path.as_str())
        .collect();
    assert_eq!(
        displays,
        HashSet::from(["app-one", "app-two", "app-three"]),
        "the project directory is shown, never the cache folder itself",
    );

    let absolutes: HashSet<_> = records
        .iter()
        .map(|record| record.absolute_path.clone())
        .collect();
    assert_eq!(absolutes.len(), 3, "absolute paths are unique per scan");

    for record in &records {
        assert!(record.absolute_path.ends_with(MARKER));
        assert!(record.size_kib > 0, "populated targets measure non-zero");
        assert_eq!(record.status, "Active");
        assert!(!record.deleted && !record.marked);
    }

    Ok(())
}

#[test]
fn markers_nested_inside_a_target_are_not_reported() -> Result<()> {
    let root = TempDir::new()?;
    let outer = root.path().join("app").join(MARKER);
    fs::create_dir_all(outer.join("some-dep").join(MARKER))?;

    let targets = discover_targets(root.path(), MARKER);
    assert_eq!(targets, vec![outer]);

    Ok(())
}

#[test]
fn a_marker_at_the_root_still_leaves_siblings_walked() -> Result<()> {
    let root = TempDir::new()?;
    fs::create_dir_all(root.path().join(MARKER))?;
    plant_target(&root.path().join("sub"), "app")?;

    let records = drain_scan(root.path());
    let displays: HashSet<&str> = records
        .iter()
        .map(|record| record.display_path.as_str())
        .collect();
    assert_eq!(displays, HashSet::from([".", "sub/app"]));

    Ok(())
}

#[test]
fn empty_root_completes_with_zero_records() -> Result<()> {
    let root = TempDir::new()?;
    let records = drain_scan(root.path());
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn directory_symlinks_are_not_followed() -> Result<()> {
    let root = TempDir::new()?;
    plant_target(root.path(), "real")?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(root.path().join("real"), root.path().join("alias"))?;

    let targets = discover_targets(root.path(), MARKER);
    assert_eq!(targets.len(), 1, "the aliased tree is discovered only once");

    Ok(())
}

#[test]
fn probe_reports_zero_for_missing_paths_and_nonzero_for_data() -> Result<()> {
    let root = TempDir::new()?;
    assert_eq!(measure_kib(&root.path().join("missing")), 0);

    fs::create_dir(root.path().join("data"))?;
    fs::write(root.path().join("data").join("blob.bin"), vec![b'z'; 8192])?;
    let kib = measure_kib(&root.path().join("data"));
    assert!(kib >= 4, "an 8 KiB file occupies at least a few blocks");

    Ok(())
}
