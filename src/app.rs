//! Application orchestrator.
//! Initializes logging, verifies the project marker, asks the operator for
//! confirmation, runs the reorganization phases, and prints the summary.

use anyhow::{Context, Result};
use safety_reorg::output as out;
use safety_reorg::{Plan, ReorgError, phases};
use std::env;
use std::io::{self, BufRead};
use tracing::{debug, error, info};

use safety_reorg::cli::Args;

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let level = args.effective_log_level();
    // Held until exit so the file appender flushes.
    let _guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&level, args.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    debug!("Starting safety_reorg: {:?}", args);

    banner();

    let plan = Plan::safety_system();
    let root = env::current_dir().context("Failed to determine the current directory")?;

    if !root.join(&plan.marker_file).exists() {
        let err = ReorgError::MarkerMissing(plan.marker_file.clone());
        error!(root = %root.display(), "Project marker not found");
        out::print_error(&format!("{err}. Run this tool from the project root."));
        return Err(err.into());
    }

    if !confirm_start()? {
        info!("User declined; nothing was changed");
        out::print_user("Operation cancelled.");
        return Ok(());
    }

    match phases::run(&plan, &root) {
        Ok(report) => {
            info!(
                moves = report.log.moves().len(),
                errors = report.log.errors().len(),
                "Reorganization finished"
            );
            print_summary(&plan, &report);
            Ok(())
        }
        Err(e) => {
            if let Some(re) = e.downcast_ref::<ReorgError>() {
                match re {
                    ReorgError::BackupExists(path) => {
                        error!(kind = "backup_exists", path = %path.display(), "Backup failed")
                    }
                    ReorgError::BackupFailed { path, .. } => {
                        error!(kind = "backup_failed", path = %path.display(), "Backup failed")
                    }
                    _ => error!(kind = "reorg_error", error = ?re, "Run failed"),
                }
            } else {
                error!(error = ?e, "Run failed");
            }
            out::print_error(&format!("Aborted before any changes were made: {e}"));
            Err(e)
        }
    }
}

fn banner() {
    out::print_user("==================================================");
    out::print_user("        SAFETY SYSTEM PROJECT REORGANIZER");
    out::print_user("==================================================");
}

/// Explain what is about to happen and read a y/N answer from stdin.
/// Anything other than `y` (case-insensitive), including EOF, cancels.
fn confirm_start() -> Result<bool> {
    out::print_user("");
    out::print_user("This tool will:");
    out::print_user("  1. Create a full backup of the project");
    out::print_user("  2. Reorganize the file layout");
    out::print_user("  3. Update imports automatically");
    out::print_user("  4. Delete duplicated and obsolete files");
    out::print_user("  5. Write a detailed report");
    out::print_user("");
    out::print_prompt("Continue? [y/N]:").context("Failed to print the confirmation prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the confirmation answer")?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(plan: &Plan, report: &phases::RunReport) {
    out::print_user("");
    if report.log.has_errors() {
        out::print_warn(&format!(
            "Reorganization completed with {} error(s); see {} for details.",
            report.log.errors().len(),
            plan.report_file.display()
        ));
    } else {
        out::print_success("Reorganization completed successfully!");
    }
    out::print_user(&format!(
        "Backup saved at: {}",
        report.backup_dir.display()
    ));
    out::print_info("Verify the system still works before deleting the backup.");
}
