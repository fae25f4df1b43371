//! Package-marker phase.
//! Drops an `__init__.py` into each directory that became a Python package.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::plan::{PACKAGE_MARKER, PACKAGE_MARKER_CONTENT, Plan};
use crate::runlog::RunLog;

/// Create the marker file in each package directory unless it already
/// exists. Failures are recorded and the phase continues.
pub fn create_package_markers(plan: &Plan, root: &Path, log: &mut RunLog) {
    for package in &plan.package_dirs {
        let marker = root.join(package).join(PACKAGE_MARKER);
        if marker.exists() {
            debug!(package = %package.display(), "Marker already present");
            continue;
        }
        match fs::write(&marker, PACKAGE_MARKER_CONTENT) {
            Ok(()) => info!(package = %package.display(), "Created package marker"),
            Err(e) => {
                error!(package = %package.display(), error = %e, "Failed to create package marker");
                log.record_error(format!("create {}/{PACKAGE_MARKER}: {e}", package.display()));
            }
        }
    }
}
