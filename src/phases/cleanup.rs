//! Deletion phase for obsolete files and directories.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::plan::Plan;
use crate::runlog::RunLog;

/// Remove each obsolete file, then each obsolete directory that is empty.
/// Every target is attempted independently; one failure never stops the
/// sweep. Missing targets and non-empty directories are silent skips.
pub fn delete_obsolete(plan: &Plan, root: &Path, log: &mut RunLog) {
    for file in &plan.deletions.files {
        let path = root.join(file);
        if !path.exists() {
            debug!(file = %file.display(), "Obsolete file already gone");
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => info!(file = %file.display(), "Deleted obsolete file"),
            Err(e) => {
                error!(file = %file.display(), error = %e, "Failed to delete file");
                log.record_error(format!("delete {}: {e}", file.display()));
            }
        }
    }

    for dir in &plan.deletions.dirs {
        let path = root.join(dir);
        if !path.is_dir() {
            debug!(dir = %dir.display(), "Obsolete directory absent");
            continue;
        }
        match fs::read_dir(&path).map(|mut entries| entries.next().is_none()) {
            Ok(true) => match fs::remove_dir(&path) {
                Ok(()) => info!(dir = %dir.display(), "Deleted empty obsolete directory"),
                Err(e) => {
                    error!(dir = %dir.display(), error = %e, "Failed to delete directory");
                    log.record_error(format!("delete directory {}: {e}", dir.display()));
                }
            },
            Ok(false) => debug!(dir = %dir.display(), "Obsolete directory not empty; keeping it"),
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "Failed to inspect directory");
                log.record_error(format!("list directory {}: {e}", dir.display()));
            }
        }
    }
}
