use serde::Serialize;

use crate::SortError;

pub const DEFAULT_MIN_RUN: usize = 32;
pub const DEFAULT_GALLOP_THRESHOLD: usize = 7;

/// Tunable thresholds of the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct SortConfig {
    /// Inputs shorter than this are insertion sorted directly; longer inputs are
    /// split into runs of exactly this length before merging.
    pub min_run: usize,
    /// Consecutive wins by one side of a merge before it switches to galloping.
    pub gallop_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            min_run: DEFAULT_MIN_RUN,
            gallop_threshold: DEFAULT_GALLOP_THRESHOLD,
        }
    }
}

impl SortConfig {
    pub fn with_min_run(mut self, min_run: usize) -> Self {
        self.min_run = min_run;
        self
    }

    pub fn with_gallop_threshold(mut self, gallop_threshold: usize) -> Self {
        self.gallop_threshold = gallop_threshold;
        self
    }

    pub fn validate(&self) -> Result<(), SortError> {
        if self.min_run == 0 {
            return Err(SortError::InvalidArgument(
                "min_run must be at least 1".to_string(),
            ));
        }
        if self.gallop_threshold == 0 {
            return Err(SortError::InvalidArgument(
                "gallop_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
