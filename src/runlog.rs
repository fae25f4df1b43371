//! Run log threaded through the phases.
//! One value owns everything the report needs: the moves that happened and
//! the operations that failed.

/// Ordered record of what a run did and what went wrong.
///
/// Append-only while the phases execute; the report phase reads it at the
/// end. Only the backup phase runs without one (its failures abort the run
/// instead of being recorded).
#[derive(Debug, Default)]
pub struct RunLog {
    moves: Vec<String>,
    errors: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed move as a "source -> destination" line.
    pub fn record_move(&mut self, description: impl Into<String>) {
        self.moves.push(description.into());
    }

    /// Record a failed operation. The message names the operation and the
    /// path it failed on.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut log = RunLog::new();
        log.record_move("a.py -> core/");
        log.record_move("b.py -> core/");
        log.record_error("delete c.py: permission denied");
        assert_eq!(log.moves(), ["a.py -> core/", "b.py -> core/"]);
        assert_eq!(log.errors(), ["delete c.py: permission denied"]);
        assert!(log.has_errors());
    }

    #[test]
    fn fresh_log_is_clean() {
        let log = RunLog::new();
        assert!(log.moves().is_empty());
        assert!(!log.has_errors());
    }
}
