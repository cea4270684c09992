use std::cmp::Ordering;

use crate::config::SortConfig;
use crate::merge::merge_runs;
use crate::run_sorter::insertion_sort_by;
use crate::{SortContext, SortError, SortMetrics};

/// Stable hybrid sort: insertion sort below `min_run`, otherwise fixed-size
/// runs merged bottom-up with a galloping fast path.
///
/// The engine holds nothing but its thresholds, so one value can be shared
/// freely between threads sorting disjoint slices.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct AdaptiveSort {
    config: SortConfig,
}

impl AdaptiveSort {
    pub fn new(config: SortConfig) -> Result<Self, SortError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> SortConfig {
        self.config
    }

    pub fn sort<'a, T: Ord>(&self, data: &'a mut [T]) -> &'a mut [T] {
        self.sort_by(data, T::cmp)
    }

    pub fn sort_by<'a, T, F>(&self, data: &'a mut [T], compare: F) -> &'a mut [T]
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut ctx = SortContext::default();
        self.sort_by_with_ctx(data, &mut ctx, compare);
        data
    }

    pub fn sort_by_key<'a, T, K, F>(&self, data: &'a mut [T], mut key: F) -> &'a mut [T]
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_by(data, |a, b| key(a).cmp(&key(b)))
    }

    pub fn sort_with_ctx<T: Ord>(&self, data: &mut [T], ctx: &mut SortContext<T>) -> SortMetrics {
        self.sort_by_with_ctx(data, ctx, T::cmp)
    }

    /// Sorts `data` using the scratch buffers in `ctx` and reports what the
    /// merge phase did.
    ///
    /// Elements are moved through the buffers, never cloned. The buffers keep
    /// their capacity, so a context reused across calls allocates only when an
    /// input outgrows it.
    pub fn sort_by_with_ctx<T, F>(
        &self,
        data: &mut [T],
        ctx: &mut SortContext<T>,
        mut compare: F,
    ) -> SortMetrics
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut metrics = SortMetrics::default();
        let len = data.len();
        if len < 2 {
            return metrics;
        }

        let mut comparisons = 0u64;
        let mut counted = |a: &T, b: &T| {
            comparisons += 1;
            compare(a, b)
        };

        if len < self.config.min_run {
            insertion_sort_by(data, &mut counted);
            metrics.comparisons = comparisons;
            return metrics;
        }

        self.merge_sort(data, ctx, &mut counted, &mut metrics);
        metrics.comparisons = comparisons;
        log::debug!(
            "sorted {} elements: merges={} skipped={} gallops={} comparisons={}",
            len,
            metrics.merges,
            metrics.skipped_merges,
            metrics.gallops,
            metrics.comparisons,
        );
        metrics
    }

    fn merge_sort<T, F>(
        &self,
        data: &mut [T],
        ctx: &mut SortContext<T>,
        compare: &mut F,
        metrics: &mut SortMetrics,
    ) where
        F: FnMut(&T, &T) -> Ordering,
    {
        let len = data.len();
        let min_run = self.config.min_run;

        for chunk in data.chunks_mut(min_run) {
            insertion_sort_by(chunk, compare);
        }

        if min_run < len {
            // Neither side of any merge exceeds the widest run that is still shorter
            // than the input.
            let mut widest = min_run;
            while widest < len - widest {
                widest *= 2;
            }
            ctx.reserve(widest);
        }

        let mut size = min_run;
        while size < len {
            let mut start = 0usize;
            while start < len - size {
                let mid = start + size;
                let end = mid + size.min(len - mid);
                let pair = &mut data[start..end];

                if compare(&pair[size - 1], &pair[size]) != Ordering::Greater {
                    metrics.skipped_merges += 1;
                } else {
                    merge_runs(
                        pair,
                        size,
                        ctx,
                        self.config.gallop_threshold,
                        compare,
                        metrics,
                    );
                }
                start = end;
            }

            log::trace!(
                "merge pass done: run_size={} merges={} gallops={}",
                size,
                metrics.merges,
                metrics.gallops
            );
            size *= 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn engine(min_run: usize, gallop_threshold: usize) -> AdaptiveSort {
        AdaptiveSort::new(SortConfig {
            min_run,
            gallop_threshold,
        })
        .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let err = AdaptiveSort::new(SortConfig::default().with_min_run(0)).unwrap_err();
        assert!(matches!(err, SortError::InvalidArgument(_)));
        assert!(err.to_string().contains("min_run"));
    }

    #[test]
    fn trivial_inputs_skip_merge_logic() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();

        let mut empty: Vec<i32> = vec![];
        assert_eq!(sorter.sort_with_ctx(&mut empty, &mut ctx), SortMetrics::default());

        let mut single = vec![7];
        assert_eq!(sorter.sort_with_ctx(&mut single, &mut ctx), SortMetrics::default());
        assert_eq!(single, vec![7]);
    }

    #[test]
    fn short_input_is_insertion_sorted_only() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<i32> = (0..31).rev().collect();
        let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);

        assert_eq!(data, (0..31).collect::<Vec<_>>());
        assert_eq!(metrics.merges, 0);
        assert_eq!(metrics.skipped_merges, 0);
        assert!(metrics.comparisons > 0);
    }

    #[test]
    fn exact_min_run_needs_no_merge_pass() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<i32> = (0..32).rev().collect();
        let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);

        assert_eq!(data, (0..32).collect::<Vec<_>>());
        assert_eq!(metrics.merges + metrics.skipped_merges, 0);
    }

    #[test]
    fn sorted_input_skips_every_merge() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<u32> = (0..1000).collect();
        let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);

        assert_eq!(metrics.merges, 0);
        // 32 runs collapse in 16 + 8 + 4 + 2 + 1 pairs.
        assert_eq!(metrics.skipped_merges, 31);
    }

    #[test]
    fn reverse_input_merges_every_pair() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<u32> = (0..1024).rev().collect();
        let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);

        assert_eq!(data, (0..1024).collect::<Vec<_>>());
        assert_eq!(metrics.merges, 31);
        assert_eq!(metrics.peak_scratch, 1024);
        assert!(metrics.gallops > 0);
    }

    #[test]
    fn context_grows_once_and_keeps_capacity() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<String> = (0..300).rev().map(|i| format!("{i:04}")).collect();
        sorter.sort_with_ctx(&mut data, &mut ctx);

        assert!(ctx.capacity() >= 256);
        assert!(data.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn presized_context_is_not_reallocated() {
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::with_capacity(512);
        let before = ctx.capacity();
        assert!(before >= 512);

        for len in [100_usize, 300, 1000, 1024] {
            let mut data: Vec<u64> = (0..len as u64).rev().collect();
            let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);
            assert!(metrics.merges > 0, "len={len}");
            assert_eq!(ctx.capacity(), before, "len={len}");
        }
    }

    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Tracked {
        key: u32,
    }

    thread_local! {
        static CLONES: Cell<usize> = const { Cell::new(0) };
        static DROPS: Cell<usize> = const { Cell::new(0) };
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            CLONES.with(|c| c.set(c.get() + 1));
            Self { key: self.key }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            DROPS.with(|c| c.set(c.get() + 1));
        }
    }

    #[test]
    fn merge_moves_elements_without_cloning_or_dropping() {
        const LEN: u32 = 10_000;
        let sorter = AdaptiveSort::default();
        let mut ctx = SortContext::default();
        let mut data: Vec<Tracked> = (0..LEN).rev().map(|key| Tracked { key }).collect();
        CLONES.with(|c| c.set(0));
        DROPS.with(|c| c.set(0));

        let metrics = sorter.sort_with_ctx(&mut data, &mut ctx);

        assert!(metrics.merges > 0);
        assert_eq!(CLONES.with(Cell::get), 0);
        assert_eq!(DROPS.with(Cell::get), 0);
        assert!(data.iter().map(|t| t.key).eq(0..LEN));

        drop(data);
        drop(ctx);
        assert_eq!(DROPS.with(Cell::get), LEN as usize);
    }

    struct Capture;

    thread_local! {
        static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            RECORDS.with(|r| {
                r.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    fn sort_summaries(len: u32) -> usize {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        RECORDS.with(|r| r.borrow_mut().clear());

        let mut data: Vec<u32> = (0..len).rev().collect();
        AdaptiveSort::default().sort(&mut data);

        RECORDS.with(|r| {
            r.borrow()
                .iter()
                .filter(|(level, msg)| *level == log::Level::Debug && msg.starts_with("sorted "))
                .count()
        })
    }

    #[test]
    fn summary_is_logged_only_for_merged_sorts() {
        assert_eq!(sort_summaries(2), 0);
        assert_eq!(sort_summaries(31), 0);
        assert_eq!(sort_summaries(32), 1);
        assert_eq!(sort_summaries(100), 1);
    }

    #[test]
    fn thresholds_at_and_around_min_run() {
        let mut rng = StdRng::seed_from_u64(0x7E57_0032);
        for &min_run in &[1_usize, 2, 3, 8, 16, 32, 64] {
            for &gallop in &[1_usize, 2, 7, 100] {
                let sorter = engine(min_run, gallop);
                let lens = [
                    min_run.saturating_sub(1),
                    min_run,
                    min_run + 1,
                    min_run * 2 + 1,
                    min_run * 5 + 3,
                ];
                for &len in &lens {
                    let data: Vec<u16> = (0..len).map(|_| rng.random_range(0..50)).collect();
                    let mut actual = data.clone();
                    sorter.sort(&mut actual);
                    let mut expected = data;
                    expected.sort();
                    assert_eq!(actual, expected, "min_run={min_run} gallop={gallop} len={len}");
                }
            }
        }
    }

    #[test]
    fn sort_by_key_is_stable() {
        let sorter = engine(4, 2);
        let mut data: Vec<(u8, usize)> = (0..100).map(|i| ((i * 7 % 5) as u8, i)).collect();
        sorter.sort_by_key(&mut data, |p| p.0);

        for w in data.windows(2) {
            assert!(w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1));
        }
    }
}
