use std::cmp::Ordering;

use crate::SortError;

/// Stable straight insertion sort.
///
/// Each element moves left only past predecessors that compare `Greater`, so
/// equal elements never cross. Runs in O(n) on sorted input.
pub fn insertion_sort_by<T, F>(data: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = data.len();
    if len < 2 {
        return;
    }

    for i in 1..len {
        let mut j = i;
        while j > 0 && compare(&data[j - 1], &data[i]) == Ordering::Greater {
            j -= 1;
        }
        if j < i {
            data[j..=i].rotate_right(1);
        }
    }
}

/// Sorts the inclusive index range `lo..=hi` of `data` in place.
pub fn sort_range_by<T, F>(
    data: &mut [T],
    lo: usize,
    hi: usize,
    mut compare: F,
) -> Result<(), SortError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if lo > hi {
        return Err(SortError::InvalidArgument(format!(
            "range start {lo} is past range end {hi}"
        )));
    }
    if hi >= data.len() {
        return Err(SortError::InvalidArgument(format!(
            "range end {hi} out of bounds for length {}",
            data.len()
        )));
    }

    insertion_sort_by(&mut data[lo..=hi], &mut compare);
    Ok(())
}
