use std::cmp::Ordering;
use std::ptr;

use crate::{SortContext, SortMetrics};

/// Merges the sorted runs `data[..mid]` and `data[mid..]` in place.
///
/// Both runs are moved bitwise into the scratch buffers of `ctx` and moved back
/// one element at a time, so no element is cloned or dropped. Ties go to the
/// left run. Once one side wins `gallop_threshold` times in a row it drains
/// every element that still beats the opposing front in a single linear scan.
/// The scan is linear rather than exponential, so the gain is in skipped
/// bookkeeping, not in skipped comparisons.
pub(crate) fn merge_runs<T, F>(
    data: &mut [T],
    mid: usize,
    ctx: &mut SortContext<T>,
    gallop_threshold: usize,
    compare: &mut F,
    metrics: &mut SortMetrics,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = data.len();
    if mid == 0 || mid >= len {
        return;
    }

    ctx.reserve(mid.max(len - mid));
    metrics.merges += 1;
    metrics.peak_scratch = metrics.peak_scratch.max(len);

    let dest = data.as_mut_ptr();
    let left = ctx.left.as_mut_ptr();
    let right = ctx.right.as_mut_ptr();

    // From here on `data` is a row of holes that `hole` fills in order. If `compare`
    // panics, dropping `hole` moves the unconsumed tails back, so `data` still owns
    // every element exactly once.
    //
    // SAFETY: both buffers have capacity for their run (reserved above) and never
    // overlap `data`. Their `len` stays 0, so the `Vec`s never drop what we park there.
    let mut hole = unsafe {
        ptr::copy_nonoverlapping(dest, left, mid);
        ptr::copy_nonoverlapping(dest.add(mid), right, len - mid);
        MergeHole {
            left,
            left_len: mid,
            i: 0,
            right,
            right_len: len - mid,
            j: 0,
            dest,
        }
    };

    let mut left_wins = 0usize;
    let mut right_wins = 0usize;

    while hole.i < hole.left_len && hole.j < hole.right_len {
        if compare(hole.left_front(), hole.right_front()) != Ordering::Greater {
            hole.take_left();
            left_wins += 1;
            right_wins = 0;

            if left_wins >= gallop_threshold {
                left_wins = 0;
                metrics.gallops += 1;
                while hole.i < hole.left_len
                    && compare(hole.left_front(), hole.right_front()) != Ordering::Greater
                {
                    hole.take_left();
                    metrics.galloped_elements += 1;
                }
            }
        } else {
            hole.take_right();
            right_wins += 1;
            left_wins = 0;

            if right_wins >= gallop_threshold {
                right_wins = 0;
                metrics.gallops += 1;
                while hole.j < hole.right_len
                    && compare(hole.right_front(), hole.left_front()) == Ordering::Less
                {
                    hole.take_right();
                    metrics.galloped_elements += 1;
                }
            }
        }
    }
    // Dropping `hole` flushes whichever run is left over.
}

/// Unconsumed elements `left[i..left_len]` and `right[j..right_len]` belong in
/// `dest[i + j..]`. `i + j` is the next hole whatever the comparator returned.
struct MergeHole<T> {
    left: *mut T,
    left_len: usize,
    i: usize,
    right: *mut T,
    right_len: usize,
    j: usize,
    dest: *mut T,
}

impl<T> MergeHole<T> {
    #[inline]
    fn left_front(&self) -> &T {
        debug_assert!(self.i < self.left_len);
        // SAFETY: callers check `i < left_len`; that slot holds a parked element.
        unsafe { &*self.left.add(self.i) }
    }

    #[inline]
    fn right_front(&self) -> &T {
        debug_assert!(self.j < self.right_len);
        // SAFETY: callers check `j < right_len`; that slot holds a parked element.
        unsafe { &*self.right.add(self.j) }
    }

    #[inline]
    fn take_left(&mut self) {
        // SAFETY: `i < left_len` and `i + j < left_len + right_len == data.len()`.
        unsafe {
            ptr::copy_nonoverlapping(self.left.add(self.i), self.dest.add(self.i + self.j), 1);
        }
        self.i += 1;
    }

    #[inline]
    fn take_right(&mut self) {
        // SAFETY: `j < right_len` and `i + j < left_len + right_len == data.len()`.
        unsafe {
            ptr::copy_nonoverlapping(self.right.add(self.j), self.dest.add(self.i + self.j), 1);
        }
        self.j += 1;
    }
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        let rest_left = self.left_len - self.i;
        let rest_right = self.right_len - self.j;
        let out = self.i + self.j;
        // SAFETY: the remaining holes are exactly `dest[out..out + rest_left + rest_right]`.
        unsafe {
            ptr::copy_nonoverlapping(self.left.add(self.i), self.dest.add(out), rest_left);
            ptr::copy_nonoverlapping(
                self.right.add(self.j),
                self.dest.add(out + rest_left),
                rest_right,
            );
        }
    }
}
