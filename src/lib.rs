//! Core library for `safety_reorg`.
//!
//! Contains the reorganization engine: the fixed plan tables and the phases
//! (backup, layout, moves, rewrites, deletion, markers, report), with the
//! run log threaded through them. The binary adds the interactive
//! confirmation and logging setup on top.

pub mod cli;
pub mod errors;
pub mod output;
pub mod phases;
pub mod plan;
pub mod runlog;

pub use errors::ReorgError;
pub use phases::{RunReport, run};
pub use plan::{DeletionSet, MoveSource, Plan, RelocationEntry, RewriteRule};
pub use runlog::RunLog;
