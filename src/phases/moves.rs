//! Move phase.
//! Applies the relocation plan: named files out of the project root, and
//! whole directories renamed or merged into their new locations.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::errors::ReorgError;
use crate::plan::{MoveSource, Plan, RelocationEntry};
use crate::runlog::RunLog;

/// Apply every relocation entry in plan order.
pub fn relocate(plan: &Plan, root: &Path, log: &mut RunLog) {
    for entry in &plan.relocations {
        match &entry.source {
            MoveSource::Files(names) => move_named_files(root, entry, names, log),
            MoveSource::Tree(src) => merge_move_tree(root, entry, src, log),
        }
    }
}

fn move_named_files(root: &Path, entry: &RelocationEntry, names: &[String], log: &mut RunLog) {
    for name in names {
        let src = root.join(name);
        let dest = root.join(&entry.dest).join(name);
        if !src.exists() {
            debug!(file = %name, "Source absent; skipping");
            continue;
        }
        if dest.exists() {
            debug!(file = %name, dest = %entry.dest.display(), "Already at destination; skipping");
            continue;
        }
        match move_path(&src, &dest) {
            Ok(()) => {
                info!(file = %name, dest = %entry.dest.display(), "Moved file");
                log.record_move(format!("{} -> {}/", name, entry.dest.display()));
            }
            Err(e) => {
                error!(file = %name, error = %e, "Failed to move file");
                log.record_error(format!("move {name}: {e}"));
            }
        }
    }
}

/// Rename first; fall back to copy+remove for regular files, since a rename
/// cannot cross filesystems.
fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !src.is_file() {
                return Err(rename_err);
            }
            warn!(src = %src.display(), error = %rename_err, "Rename failed, falling back to copy+remove");
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
    }
}

/// Move the directory `src_name` to `entry.dest`. When the destination does
/// not exist yet the whole tree is renamed in one step; otherwise the direct
/// children are merged in, skipping names the destination already has, and
/// the source is removed once emptied.
fn merge_move_tree(root: &Path, entry: &RelocationEntry, src_name: &str, log: &mut RunLog) {
    let src = root.join(src_name);
    let dest = root.join(&entry.dest);
    let moved = format!("{}/ -> {}/", src_name, entry.dest.display());

    if !src.is_dir() {
        debug!(dir = %src_name, "Source directory absent; skipping");
        return;
    }

    if !dest.exists() {
        match fs::rename(&src, &dest) {
            Ok(()) => {
                info!(src = %src_name, dest = %entry.dest.display(), "Renamed directory");
                log.record_move(moved);
            }
            Err(e) => {
                error!(src = %src_name, error = %e, "Failed to move directory");
                log.record_error(format!("move directory {src_name}: {e}"));
            }
        }
        return;
    }

    if !dest.is_dir() {
        let err = ReorgError::DestNotDirectory {
            src: src.clone(),
            dest: dest.clone(),
        };
        error!(src = %src_name, dest = %entry.dest.display(), "Merge destination is not a directory");
        log.record_error(err.to_string());
        return;
    }

    let children = match fs::read_dir(&src) {
        Ok(rd) => rd,
        Err(e) => {
            error!(dir = %src_name, error = %e, "Failed to list source directory");
            log.record_error(format!("list directory {src_name}: {e}"));
            return;
        }
    };

    let mut failed = false;
    for child in children {
        let child = match child {
            Ok(c) => c,
            Err(e) => {
                log.record_error(format!("list directory {src_name}: {e}"));
                failed = true;
                continue;
            }
        };
        let child_label = format!("{}/{}", src_name, child.file_name().to_string_lossy());
        let target = dest.join(child.file_name());
        if target.exists() {
            debug!(item = %child_label, "Already present in destination; skipping");
            continue;
        }
        if let Err(e) = move_path(&child.path(), &target) {
            error!(item = %child_label, error = %e, "Failed to move directory entry");
            log.record_error(format!("move {child_label}: {e}"));
            failed = true;
        }
    }

    match dir_is_empty(&src) {
        Ok(true) => {
            if let Err(e) = fs::remove_dir(&src) {
                warn!(dir = %src_name, error = %e, "Could not remove emptied source directory");
                log.record_error(format!("remove directory {src_name}: {e}"));
                failed = true;
            }
        }
        Ok(false) => debug!(dir = %src_name, "Source directory still has entries; leaving it"),
        Err(e) => {
            log.record_error(format!("list directory {src_name}: {e}"));
            failed = true;
        }
    }

    if !failed {
        info!(src = %src_name, dest = %entry.dest.display(), "Merged directory");
        log.record_move(moved);
    }
}

fn dir_is_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
