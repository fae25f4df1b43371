//! Typed error definitions for safety_reorg.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReorgError {
    #[error("Project marker '{0}' not found in the current directory")]
    MarkerMissing(PathBuf),

    #[error("Backup destination already exists: {0}")]
    BackupExists(PathBuf),

    #[error("Backup failed at {path}: {source}")]
    BackupFailed { path: PathBuf, source: io::Error },

    #[error("Destination '{dest}' exists but is not a directory; cannot merge '{src}' into it")]
    DestNotDirectory { src: PathBuf, dest: PathBuf },
}
