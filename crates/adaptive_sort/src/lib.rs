//! Stable adaptive hybrid sort.
//!
//! Short inputs are insertion sorted. Longer inputs are cut into fixed-size runs,
//! each run is insertion sorted, and runs are merged bottom-up with a galloping
//! fast path for merges where one side dominates.
//!
//! ```
//! let mut data = vec![5, 3, 8, 1, 9, 2];
//! adaptive_sort::sort(&mut data);
//! assert_eq!(data, [1, 2, 3, 5, 8, 9]);
//! ```

mod config;
mod engine;
mod error;
pub mod harness;
mod merge;
pub mod run_sorter;

use std::cmp::Ordering;

use serde::Serialize;

pub use config::{DEFAULT_GALLOP_THRESHOLD, DEFAULT_MIN_RUN, SortConfig};
pub use engine::AdaptiveSort;
pub use error::SortError;

/// Counters collected during one sort call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SortMetrics {
    /// Adjacent run pairs that were actually merged.
    pub merges: u64,
    /// Adjacent run pairs left alone because they were already in order.
    pub skipped_merges: u64,
    /// Times a merge switched into galloping mode.
    pub gallops: u64,
    /// Elements moved while galloping.
    pub galloped_elements: u64,
    pub comparisons: u64,
    /// Most elements held in scratch buffers at once.
    pub peak_scratch: usize,
}

/// Scratch buffers for the merge phase.
///
/// Only the capacity is used: a merge parks its two runs there and moves them
/// back before returning, so the buffers never own an element between calls.
/// Owned by the caller to reuse allocations across sorts, or created per call
/// by [`AdaptiveSort::sort_by`].
#[derive(Debug)]
pub struct SortContext<T> {
    pub(crate) left: Vec<T>,
    pub(crate) right: Vec<T>,
}

impl<T> Default for SortContext<T> {
    fn default() -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
        }
    }
}

impl<T> SortContext<T> {
    /// Context whose buffers can hold runs of `capacity` elements, so sorting
    /// up to `capacity` elements never reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            left: Vec::with_capacity(capacity),
            right: Vec::with_capacity(capacity),
        }
    }

    /// Elements each buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.left.capacity().min(self.right.capacity())
    }

    #[inline]
    pub(crate) fn reserve(&mut self, capacity: usize) {
        debug_assert!(self.left.is_empty() && self.right.is_empty());
        self.left.reserve(capacity);
        self.right.reserve(capacity);
    }
}

/// Sorts `data` with the default engine and `Ord`.
pub fn sort<T: Ord>(data: &mut [T]) -> &mut [T] {
    AdaptiveSort::default().sort(data)
}

/// Sorts `data` with the default engine and a caller-supplied comparator.
pub fn sort_by<T, F>(data: &mut [T], compare: F) -> &mut [T]
where
    F: FnMut(&T, &T) -> Ordering,
{
    AdaptiveSort::default().sort_by(data, compare)
}
