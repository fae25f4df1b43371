//! The reorganization phases, run in fixed order.

mod backup;
mod cleanup;
mod layout;
mod markers;
mod moves;
mod report;
mod rewrite;

pub use backup::create_backup;
pub use cleanup::delete_obsolete;
pub use layout::create_directories;
pub use markers::create_package_markers;
pub use moves::relocate;
pub use report::write_report;
pub use rewrite::apply_rewrites;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::plan::Plan;
use crate::runlog::RunLog;

/// What a completed run leaves behind for the caller.
#[derive(Debug)]
pub struct RunReport {
    pub backup_dir: PathBuf,
    pub log: RunLog,
}

/// Execute the full reorganization against `root`.
///
/// The backup is the only fatal step; it runs before anything is mutated.
/// Every later failure is recorded in the run log and the remaining phases
/// still execute. Safe to run again: moves and rewrites check their
/// postconditions first, so a second pass changes nothing beyond a fresh
/// backup and report.
pub fn run(plan: &Plan, root: &Path) -> Result<RunReport> {
    let backup_dir = create_backup(plan, root)?;
    info!(backup = %backup_dir.display(), "Backup complete");

    let mut log = RunLog::new();
    create_directories(plan, root, &mut log);
    relocate(plan, root, &mut log);

    let updated = apply_rewrites(root, &plan.import_rewrites, &mut log);
    info!(files = updated, "Import rewrite pass complete");
    let updated = apply_rewrites(root, &plan.path_rewrites, &mut log);
    info!(files = updated, "Path rewrite pass complete");

    delete_obsolete(plan, root, &mut log);
    create_package_markers(plan, root, &mut log);

    if let Err(e) = write_report(plan, root, &backup_dir, &log) {
        error!(error = %e, "Failed to write the report");
        log.record_error(format!("write {}: {e}", plan.report_file.display()));
    }

    Ok(RunReport { backup_dir, log })
}
