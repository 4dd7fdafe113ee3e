/// Converts a size in kibibytes into a human-readable label.
///
/// Zero stays `"0 B"` so unmeasured and reclaimed entries read the same way.
/// Everything else picks the largest of GB/MB/KB whose threshold the byte
/// value meets, with one decimal place.
///
/// ```rust
/// use modsweep::util::fmt_size;
/// assert_eq!(fmt_size(0), "0 B");
/// assert_eq!(fmt_size(100), "100.0 KB");
/// assert_eq!(fmt_size(2048), "2.0 MB");
/// assert_eq!(fmt_size(3145728), "3.0 GB");
/// ```
pub fn fmt_size(size_kib: u64) -> String {
    if size_kib == 0 {
        return String::from("0 B");
    }

    const UNITS: [(&str, u64); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

    let bytes = size_kib.saturating_mul(1024);
    for (unit, threshold) in UNITS {
        if bytes >= threshold {
            return format!("{:.1} {}", bytes as f64 / threshold as f64, unit);
        }
    }
    format!("{} B", bytes)
}

/// Truncates a path to fit `max_width` columns, keeping the tail.
///
/// The cut is marked with a `...` prefix and, when a path separator sits
/// within the first few characters of the kept tail, the tail is re-aligned
/// to it so the result does not start mid-component.
///
/// ```rust
/// use modsweep::util::truncate_path;
/// assert_eq!(truncate_path("short", 20), "short");
/// assert_eq!(truncate_path("alpha/beta/gamma/delta", 12), ".../delta");
/// ```
pub fn truncate_path(path: &str, max_width: usize) -> String {
    const SEP_LOOKAHEAD: usize = 8;

    let len = path.chars().count();
    if len <= max_width {
        return path.to_string();
    }

    let keep = max_width.saturating_sub(3);
    let tail: String = path.chars().skip(len - keep).collect();
    let tail = match tail.find('/') {
        Some(idx) if idx < SEP_LOOKAHEAD => tail[idx..].to_string(),
        _ => tail,
    };
    format!("...{}", tail)
}
