use std::fs;
use std::io;
use std::path::Path;

use crate::model::EntryStore;

/// Longest failure excerpt carried on a record's status line.
const REASON_EXCERPT_LEN: usize = 24;

/// Per-entry permission remediation hook: invoked with the filesystem entry
/// that failed to remove, before that entry is retried once.
pub type Remedy = dyn Fn(&Path) + Sync;

/// Outcome of removing one record's directory tree.
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyGone,
    Failed(String),
}

/// Removes the tree behind `path`, treating a vanished path as success.
pub fn delete_path(path: &Path) -> DeleteOutcome {
    if !path.exists() {
        return DeleteOutcome::AlreadyGone;
    }
    match remove_tree(path, &make_writable) {
        Ok(()) => DeleteOutcome::Deleted,
        Err(err) => DeleteOutcome::Failed(err.to_string()),
    }
}

/// Deletes every targeted record, updating each record's terminal state.
///
/// The whole batch is attempted even when an earlier record fails. A record
/// that was already gone counts as reclaimed. Failed records keep a bounded
/// excerpt of the reason in their status and stay targetable.
pub fn delete_batch(store: &mut EntryStore, targets: &[usize]) {
    for &index in targets {
        let record = match store.get_mut(index) {
            Some(record) => record,
            None => continue,
        };

        match delete_path(&record.absolute_path) {
            DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {
                record.deleted = true;
                record.status = String::from("Deleted");
                record.size_kib = 0;
                record.refresh_label();
            }
            DeleteOutcome::Failed(reason) => {
                record.status = format!("Err: {}", excerpt(&reason));
            }
        }
        record.marked = false;
    }
}

/// Recursively removes a directory tree with per-entry remediation.
///
/// An entry that fails to remove is handed to `remedy` and retried once;
/// a directory whose contents cannot be cleared gets the same treatment
/// (a read-only directory blocks removal of its children until its own
/// permissions are fixed). The retry is local to the failing entry, never
/// a restart of the whole tree.
pub fn remove_tree(path: &Path, remedy: &Remedy) -> io::Result<()> {
    if remove_dir_contents(path, remedy).is_err() {
        remedy(path);
        remove_dir_contents(path, remedy)?;
    }

    match fs::remove_dir(path) {
        Ok(()) => Ok(()),
        Err(_) => {
            remedy(path);
            fs::remove_dir(path)
        }
    }
}

fn remove_dir_contents(path: &Path, remedy: &Remedy) -> io::Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let child = entry.path();

        if file_type.is_dir() && !file_type.is_symlink() {
            remove_tree(&child, remedy)?;
        } else if fs::remove_file(&child).is_err() {
            remedy(&child);
            fs::remove_file(&child)?;
        }
    }
    Ok(())
}

fn make_writable(path: &Path) {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(_) => return,
    };
    let mut perms = meta.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o700);
    }
    #[cfg(not(unix))]
    perms.set_readonly(false);

    let _ = fs::set_permissions(path, perms);
}

fn excerpt(reason: &str) -> &str {
    match reason.char_indices().nth(REASON_EXCERPT_LEN) {
        Some((idx, _)) => &reason[..idx],
        None => reason,
    }
}
