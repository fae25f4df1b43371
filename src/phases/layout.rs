//! Directory-creation phase.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::plan::Plan;
use crate::runlog::RunLog;

/// Create every target directory that does not already exist. Pre-existing
/// paths are left alone; a failure is recorded and the phase continues.
pub fn create_directories(plan: &Plan, root: &Path, log: &mut RunLog) {
    for dir in &plan.target_dirs {
        let full = root.join(dir);
        if full.exists() {
            debug!(path = %dir.display(), "Directory already present");
            continue;
        }
        match fs::create_dir_all(&full) {
            Ok(()) => info!(path = %dir.display(), "Created directory"),
            Err(e) => {
                error!(path = %dir.display(), error = %e, "Failed to create directory");
                log.record_error(format!("create directory {}: {e}", dir.display()));
            }
        }
    }
}
