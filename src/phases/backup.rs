//! Backup phase.
//! Copies the whole project tree into a timestamped sibling directory before
//! anything is mutated. Any failure here aborts the run.

use anyhow::Result;
use chrono::Local;
use filetime::FileTime;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::ReorgError;
use crate::plan::Plan;

/// Copy `root` into `<parent>/<prefix>_<YYYYMMDD_HHMMSS>`, skipping ignored
/// names at every depth. Returns the backup directory.
pub fn create_backup(plan: &Plan, root: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let parent = root.parent().unwrap_or(root);
    let backup_dir = parent.join(format!("{}_{}", plan.backup_prefix, stamp));

    if backup_dir.exists() {
        return Err(ReorgError::BackupExists(backup_dir).into());
    }
    info!(backup = %backup_dir.display(), "Creating backup");
    fs::create_dir_all(&backup_dir).map_err(|e| backup_failed(&backup_dir, e))?;
    copy_tree(root, &backup_dir, &plan.backup_ignore)?;
    Ok(backup_dir)
}

fn copy_tree(src_root: &Path, dest_root: &Path, ignore: &[String]) -> Result<()> {
    let walker = WalkDir::new(src_root)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_ignored(e.file_name(), ignore));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| src_root.to_path_buf());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
                return Err(ReorgError::BackupFailed { path, source }.into());
            }
        };

        let rel = entry.path().strip_prefix(src_root)?;
        let target = dest_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| backup_failed(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| backup_failed(entry.path(), e))?;
            preserve_mtime(entry.path(), &target);
        }
        debug!(path = %rel.display(), "Backed up");
    }
    Ok(())
}

/// Base-name match against the ignore patterns; a leading `*` makes the
/// pattern a suffix match.
fn is_ignored(name: &OsStr, patterns: &[String]) -> bool {
    let name = name.to_string_lossy();
    patterns.iter().any(|p| match p.strip_prefix('*') {
        Some(suffix) => name.ends_with(suffix),
        None => name == p.as_str(),
    })
}

fn preserve_mtime(src: &Path, dest: &Path) {
    if let Ok(meta) = fs::metadata(src)
        && let Ok(modified) = meta.modified()
    {
        let _ = filetime::set_file_mtime(dest, FileTime::from_system_time(modified));
    }
}

fn backup_failed(path: &Path, source: io::Error) -> anyhow::Error {
    ReorgError::BackupFailed {
        path: path.to_path_buf(),
        source,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_patterns_match_whole_names_only() {
        let patterns = vec!["__pycache__".to_string(), "venv".to_string()];
        assert!(is_ignored(OsStr::new("__pycache__"), &patterns));
        assert!(is_ignored(OsStr::new("venv"), &patterns));
        assert!(!is_ignored(OsStr::new("venv2"), &patterns));
        assert!(!is_ignored(OsStr::new("my__pycache__"), &patterns));
    }

    #[test]
    fn star_patterns_match_suffixes() {
        let patterns = vec!["*.pyc".to_string(), "*.log".to_string()];
        assert!(is_ignored(OsStr::new("camera_module.pyc"), &patterns));
        assert!(is_ignored(OsStr::new("system.log"), &patterns));
        assert!(!is_ignored(OsStr::new("camera_module.py"), &patterns));
        assert!(!is_ignored(OsStr::new("log"), &patterns));
    }
}
