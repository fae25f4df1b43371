//! Rewrite phase.
//! Plain literal substitution over whole files, applied in declared order.
//! A file is written back only when its content actually changed.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::plan::RewriteRule;
use crate::runlog::RunLog;

/// Apply every rule to its target file. Returns how many files were updated.
///
/// Missing targets are skipped silently. Matching is plain substring
/// replacement of every occurrence, so strings and comments are rewritten
/// too; that is the contract, not a defect.
pub fn apply_rewrites(root: &Path, rules: &[RewriteRule], log: &mut RunLog) -> usize {
    let mut updated = 0;
    for rule in rules {
        let path = root.join(&rule.file);
        if !path.exists() {
            debug!(file = %rule.file.display(), "Rewrite target absent; skipping");
            continue;
        }
        let original = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                error!(file = %rule.file.display(), error = %e, "Failed to read rewrite target");
                log.record_error(format!("read {}: {e}", rule.file.display()));
                continue;
            }
        };

        let mut content = original.clone();
        for (from, to) in &rule.substitutions {
            content = content.replace(from.as_str(), to);
        }

        if content == original {
            debug!(file = %rule.file.display(), "No rewrite needed");
            continue;
        }
        match fs::write(&path, &content) {
            Ok(()) => {
                info!(file = %rule.file.display(), "Updated references");
                updated += 1;
            }
            Err(e) => {
                error!(file = %rule.file.display(), error = %e, "Failed to write rewrite target");
                log.record_error(format!("write {}: {e}", rule.file.display()));
            }
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::RewriteRule;
    use crate::runlog::RunLog;
    use tempfile::tempdir;

    #[test]
    fn substitutions_apply_in_declared_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = \"models\"\n").unwrap();

        // The first rule consumes the match; the second never fires.
        let rules = vec![RewriteRule::new(
            "a.py",
            vec![
                ("\"models\"".to_string(), "\"assets/models\"".to_string()),
                ("x = \"models\"".to_string(), "y = \"nope\"".to_string()),
            ],
        )];
        let mut log = RunLog::new();
        let updated = apply_rewrites(dir.path(), &rules, &mut log);

        assert_eq!(updated, 1);
        assert!(!log.has_errors());
        let content = fs::read_to_string(dir.path().join("a.py")).unwrap();
        assert_eq!(content, "x = \"assets/models\"\n");
    }

    #[test]
    fn unchanged_files_are_not_counted_as_updates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "print('hi')\n").unwrap();

        let rules = vec![RewriteRule::new(
            "a.py",
            vec![("\"models\"".to_string(), "\"assets/models\"".to_string())],
        )];
        let mut log = RunLog::new();
        assert_eq!(apply_rewrites(dir.path(), &rules, &mut log), 0);
        assert!(!log.has_errors());
    }

    #[test]
    fn missing_targets_are_silent() {
        let dir = tempdir().unwrap();
        let rules = vec![RewriteRule::new(
            "gone.py",
            vec![("a".to_string(), "b".to_string())],
        )];
        let mut log = RunLog::new();
        assert_eq!(apply_rewrites(dir.path(), &rules, &mut log), 0);
        assert!(!log.has_errors());
    }
}
