use std::fs::Metadata;
use std::path::Path;

use walkdir::WalkDir;

/// Measures the recursive disk usage of `path` in kibibytes.
///
/// Entries that cannot be read are skipped, so a partially unreadable tree
/// yields a partial total; a path that cannot be measured at all yields 0.
/// Callers must treat 0 as "unknown or empty", never as an error.
///
/// ```rust
/// use modsweep::probe::measure_kib;
/// assert_eq!(measure_kib(std::path::Path::new("/no/such/path")), 0);
/// ```
pub fn measure_kib(path: &Path) -> u64 {
    let mut bytes: u64 = 0;
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if let Ok(meta) = entry.metadata() {
            bytes = bytes.saturating_add(occupied_bytes(&meta));
        }
    }
    bytes / 1024
}

// Disk usage, not logical length: on Unix this counts allocated blocks the
// way `du` does, which differs for sparse and tail-packed files.
#[cfg(unix)]
fn occupied_bytes(meta: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.blocks().saturating_mul(512)
}

#[cfg(not(unix))]
fn occupied_bytes(meta: &Metadata) -> u64 {
    meta.len()
}
