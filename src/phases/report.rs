//! Report phase.
//! Writes a human-readable summary of the run into the project root,
//! replacing whatever a previous run left there.

use anyhow::{Context, Result};
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::plan::Plan;
use crate::runlog::RunLog;

/// Render and write the report file.
pub fn write_report(plan: &Plan, root: &Path, backup_dir: &Path, log: &RunLog) -> Result<PathBuf> {
    let path = root.join(&plan.report_file);
    fs::write(&path, render(plan, backup_dir, log))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!(report = %path.display(), "Report written");
    Ok(path)
}

fn render(plan: &Plan, backup_dir: &Path, log: &RunLog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== REORGANIZATION REPORT ===");
    let _ = writeln!(out, "Date: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Backup created at: {}", backup_dir.display());
    let _ = writeln!(out);

    let _ = writeln!(out, "COMPLETED MOVES:");
    for entry in log.moves() {
        let _ = writeln!(out, "  - {entry}");
    }

    if log.has_errors() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ERRORS ENCOUNTERED:");
        for entry in log.errors() {
            let _ = writeln!(out, "  - {entry}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "NEW STRUCTURE:");
    let _ = write!(out, "{}", plan.layout_diagram);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;

    fn sample_plan() -> Plan {
        Plan {
            layout_diagram: "\nproject/\n└── core/\n".to_string(),
            ..Plan::default()
        }
    }

    #[test]
    fn errors_section_appears_only_when_errors_exist() {
        let plan = sample_plan();
        let mut log = RunLog::new();
        log.record_move("a.py -> core/");

        let clean = render(&plan, Path::new("/tmp/backup"), &log);
        assert!(clean.contains("COMPLETED MOVES:"));
        assert!(clean.contains("  - a.py -> core/"));
        assert!(!clean.contains("ERRORS ENCOUNTERED:"));

        log.record_error("delete x.py: permission denied");
        let with_errors = render(&plan, Path::new("/tmp/backup"), &log);
        assert!(with_errors.contains("ERRORS ENCOUNTERED:"));
        assert!(with_errors.contains("  - delete x.py: permission denied"));
    }

    #[test]
    fn report_names_the_backup_and_the_layout() {
        let plan = sample_plan();
        let log = RunLog::new();
        let text = render(&plan, Path::new("/tmp/safety_system_backup_20250101_000000"), &log);
        assert!(text.starts_with("=== REORGANIZATION REPORT ==="));
        assert!(text.contains("Backup created at: /tmp/safety_system_backup_20250101_000000"));
        assert!(text.contains("NEW STRUCTURE:"));
        assert!(text.ends_with("└── core/\n"));
    }
}
