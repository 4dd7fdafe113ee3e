use std::path::PathBuf;

use crate::model::{EntryStore, Record, ScanEvent, ScanState};
use crate::tui::nav;

/// UI-side state for one scan session.
///
/// `App` owns the [`EntryStore`] and the cursor; everything here is mutated
/// by the event loop thread only. Records cross the thread boundary solely
/// through the scan channel, drained by [`App::apply_event`].
pub struct App {
    pub root: PathBuf,
    pub marker: String,
    store: EntryStore,
    scan_state: ScanState,
    selected: usize,
    scroll: usize,
    viewport: usize,
    confirm: Option<Vec<usize>>,
}

impl App {
    pub fn new(root: PathBuf, marker: String) -> Self {
        Self {
            root,
            marker,
            store: EntryStore::default(),
            scan_state: ScanState::Scanning,
            selected: 0,
            scroll: 0,
            viewport: 1,
            confirm: None,
        }
    }

    /// Folds one drained scan event into the store.
    pub fn apply_event(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Entry(record) => self.store.push(record),
            ScanEvent::Done => self.scan_state = ScanState::Done,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntryStore {
        &mut self.store
    }

    pub fn scan_state(&self) -> ScanState {
        self.scan_state
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Records the body height the renderer measured this frame; navigation
    /// uses it for paging and scroll-off until the next draw.
    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport.max(1);
    }

    pub fn set_cursor(&mut self, selected: usize, scroll: usize) {
        self.selected = selected;
        self.scroll = scroll;
        self.clamp();
    }

    /// Clamps selection and scroll to the current record count and viewport.
    /// Run every cycle: the list grows while scanning and the terminal can
    /// resize between frames.
    pub fn clamp(&mut self) {
        let count = self.store.len();
        if count == 0 {
            self.selected = 0;
            self.scroll = 0;
            return;
        }
        self.selected = self.selected.min(count - 1);
        self.scroll = self.scroll.min(count.saturating_sub(self.viewport));
    }

    /// Toggles the mark on the current record, then advances the cursor one
    /// row so repeated marking sweeps downward. Deleted records are skipped
    /// for marking but still advanced over.
    pub fn toggle_mark_and_advance(&mut self) {
        let count = self.store.len();
        if count == 0 {
            return;
        }

        if let Some(record) = self.store.get_mut(self.selected) {
            if !record.deleted {
                record.marked = !record.marked;
            }
        }

        if self.selected + 1 < count {
            self.selected += 1;
            self.scroll = nav::apply_scrolloff(self.selected, self.scroll, count, self.viewport);
        }
    }

    /// The delete target set: all marked, not-deleted records, or the record
    /// under the cursor when nothing is marked. Empty when there is nothing
    /// deletable.
    pub fn delete_targets(&self) -> Vec<usize> {
        let marked = self.store.marked_indices();
        if !marked.is_empty() {
            return marked;
        }
        match self.store.get(self.selected) {
            Some(record) if !record.deleted => vec![self.selected],
            _ => Vec::new(),
        }
    }

    /// Flags each target as in-progress and clears its mark; rendered once
    /// before the blocking batch delete so the transient state is visible.
    pub fn begin_deleting(&mut self, targets: &[usize]) {
        for &index in targets {
            if let Some(record) = self.store.get_mut(index) {
                record.status = String::from("Deleting...");
                record.marked = false;
            }
        }
    }

    pub fn open_confirm(&mut self, targets: Vec<usize>) {
        self.confirm = Some(targets);
    }

    pub fn close_confirm(&mut self) {
        self.confirm = None;
    }

    pub fn confirm_targets(&self) -> Option<&[usize]> {
        self.confirm.as_deref()
    }

    /// Records behind the pending confirmation, for the dialog body.
    pub fn confirm_records(&self) -> Vec<&Record> {
        match &self.confirm {
            Some(targets) => targets
                .iter()
                .filter_map(|&index| self.store.get(index))
                .collect(),
            None => Vec::new(),
        }
    }
}
