use std::path::PathBuf;

use crate::util::fmt_size;

/// Lifecycle of one scan session.
///
/// Monotonic: the UI flips `Scanning -> Done` exactly once, when the
/// completion event is drained from the scan channel.
///
/// ```rust
/// use modsweep::model::ScanState;
/// assert!(ScanState::Scanning.is_scanning());
/// assert!(!ScanState::Done.is_scanning());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanState {
    Scanning,
    Done,
}

impl ScanState {
    pub fn is_scanning(self) -> bool {
        matches!(self, ScanState::Scanning)
    }
}

/// One discovered cache directory with its size and deletion state.
///
/// `display_path` is the parent of the target relative to the scan root:
/// what the operator weighs for deletion is the project, not the cache
/// folder inside it. The size label is derived at construction; call
/// [`Record::refresh_label`] after changing `size_kib`.
///
/// ```rust
/// use std::path::PathBuf;
/// use modsweep::model::Record;
///
/// let record = Record::new(
///     PathBuf::from("/work/site/node_modules"),
///     String::from("site"),
///     2048,
/// );
/// assert_eq!(record.size_label, "2.0 MB");
/// assert_eq!(record.status, "Active");
/// assert!(!record.deleted && !record.marked);
/// ```
#[derive(Clone, Debug)]
pub struct Record {
    pub absolute_path: PathBuf,
    pub display_path: String,
    pub size_kib: u64,
    pub size_label: String,
    pub status: String,
    pub deleted: bool,
    pub marked: bool,
}

impl Record {
    pub fn new(absolute_path: PathBuf, display_path: String, size_kib: u64) -> Self {
        Self {
            absolute_path,
            display_path,
            size_kib,
            size_label: fmt_size(size_kib),
            status: String::from("Active"),
            deleted: false,
            marked: false,
        }
    }

    /// Recomputes the size label from `size_kib`.
    pub fn refresh_label(&mut self) {
        self.size_label = fmt_size(self.size_kib);
    }
}

/// Streamed output of the background scan.
///
/// `Done` is a distinct completion signal rather than a sentinel payload,
/// so an empty result set is unambiguous.
pub enum ScanEvent {
    Entry(Record),
    Done,
}

/// Ordered, append-only collection of scan results plus derived aggregates.
///
/// Records arrive in probe-completion order and are never reordered or
/// removed; "deleted" is a status, so the session history stays visible.
/// Only the UI thread mutates the store after records leave the channel.
///
/// ```rust
/// use std::path::PathBuf;
/// use modsweep::model::{EntryStore, Record};
///
/// let mut store = EntryStore::default();
/// store.push(Record::new(PathBuf::from("/a/node_modules"), "a".into(), 100));
/// store.push(Record::new(PathBuf::from("/b/node_modules"), "b".into(), 50));
/// assert_eq!(store.total_active_kib(), 150);
/// assert_eq!(store.active_count(), 2);
/// assert_eq!(store.marked_count(), 0);
/// ```
#[derive(Default)]
pub struct EntryStore {
    records: Vec<Record>,
}

impl EntryStore {
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    /// Summed size over records that have not been deleted.
    pub fn total_active_kib(&self) -> u64 {
        self.records
            .iter()
            .filter(|record| !record.deleted)
            .map(|record| record.size_kib)
            .sum()
    }

    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|record| !record.deleted).count()
    }

    pub fn marked_count(&self) -> usize {
        self.marked_indices().len()
    }

    /// Indices of records that are marked and still deletable.
    pub fn marked_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.marked && !record.deleted)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_skip_deleted_records() {
        let mut store = EntryStore::default();
        store.push(Record::new(PathBuf::from("/a/nm"), "a".into(), 100));
        store.push(Record::new(PathBuf::from("/b/nm"), "b".into(), 200));

        {
            let record = store.get_mut(0).unwrap();
            record.marked = true;
        }
        assert_eq!(store.marked_count(), 1);

        {
            let record = store.get_mut(0).unwrap();
            record.deleted = true;
            record.marked = false;
            record.size_kib = 0;
            record.refresh_label();
        }

        assert_eq!(store.total_active_kib(), 200);
        assert_eq!(store.active_count(), 1);
        assert_eq!(store.marked_count(), 0);
        assert_eq!(store.len(), 2, "deleted records stay in the store");
        assert_eq!(store.get(0).unwrap().size_label, "0 B");
    }
}
