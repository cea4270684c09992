//! Synthetic datasets and measured sorts for benchmarking the engine.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::{AdaptiveSort, SortConfig, SortContext, SortError, SortMetrics};

const RANDOM_KEY_MAX: i64 = 1_000_000;
const STRING_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const STRING_MAX_LEN: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Random,
    Sorted,
    Reverse,
    /// Ascending keys with 5% of positions disturbed by random swaps.
    NearlySorted,
    /// About `size / 10` distinct keys.
    Duplicates,
    Strings,
    /// Keys with many ties, tagged with their input position.
    Objects,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Random,
        Pattern::Sorted,
        Pattern::Reverse,
        Pattern::NearlySorted,
        Pattern::Duplicates,
        Pattern::Strings,
        Pattern::Objects,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sorted => "sorted",
            Self::Reverse => "reverse",
            Self::NearlySorted => "nearly_sorted",
            Self::Duplicates => "duplicates",
            Self::Strings => "strings",
            Self::Objects => "objects",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pattern {
    type Err = SortError;

    /// Accepts every label, plus `records` as an alias for `objects`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "records" {
            return Ok(Pattern::Objects);
        }
        Pattern::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| SortError::InvalidArgument(format!("unknown pattern `{s}`")))
    }
}

/// An element whose `id` is its position in the generated input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Record {
    pub value: i64,
    pub id: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    Numbers(Vec<i64>),
    Strings(Vec<String>),
    Objects(Vec<Record>),
}

impl Dataset {
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(v) => v.len(),
            Self::Strings(v) => v.len(),
            Self::Objects(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn generate_test_data(size: usize, pattern: Pattern, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    match pattern {
        Pattern::Strings => Dataset::Strings(random_strings(size, &mut rng)),
        Pattern::Objects => {
            let distinct = distinct_keys(size);
            let records = (0..size)
                .map(|id| Record {
                    value: rng.random_range(0..distinct),
                    id,
                })
                .collect();
            Dataset::Objects(records)
        }
        _ => Dataset::Numbers(numbers_with(size, pattern, &mut rng)),
    }
}

/// Integer keys for `pattern`. `Strings` and `Objects` fall back to uniform
/// random keys.
pub fn numeric_data(size: usize, pattern: Pattern, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    numbers_with(size, pattern, &mut rng)
}

fn numbers_with(size: usize, pattern: Pattern, rng: &mut StdRng) -> Vec<i64> {
    match pattern {
        Pattern::Sorted => (0..size as i64).collect(),
        Pattern::Reverse => (0..size as i64).rev().collect(),
        Pattern::NearlySorted => {
            let mut data: Vec<i64> = (0..size as i64).collect();
            if size >= 2 {
                let swaps = (size / 20).max(1);
                for _ in 0..swaps {
                    let a = rng.random_range(0..size);
                    let b = rng.random_range(0..size);
                    data.swap(a, b);
                }
            }
            data
        }
        Pattern::Duplicates => {
            let distinct = distinct_keys(size);
            (0..size).map(|_| rng.random_range(0..distinct)).collect()
        }
        Pattern::Random | Pattern::Strings | Pattern::Objects => (0..size)
            .map(|_| rng.random_range(0..=RANDOM_KEY_MAX))
            .collect(),
    }
}

#[inline]
fn distinct_keys(size: usize) -> i64 {
    (size / 10).max(1) as i64
}

fn random_strings(size: usize, rng: &mut StdRng) -> Vec<String> {
    (0..size)
        .map(|_| {
            let len = rng.random_range(1..=STRING_MAX_LEN);
            (0..len)
                .map(|_| STRING_ALPHABET[rng.random_range(0..STRING_ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

/// Timing and verification for one measured sort.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SortStats {
    pub len: usize,
    pub elapsed_ms: f64,
    pub elements_per_ms: f64,
    pub is_sorted: bool,
    pub metrics: SortMetrics,
    /// Peak scratch memory held by the merge phase.
    pub scratch_bytes: usize,
}

/// Sorts `data` in place and measures the call.
pub fn sort_with_stats<T, F>(engine: &AdaptiveSort, data: &mut [T], mut compare: F) -> SortStats
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut ctx = SortContext::default();
    let start = Instant::now();
    let metrics = engine.sort_by_with_ctx(data, &mut ctx, &mut compare);
    let elapsed = start.elapsed();

    let nanos = elapsed.as_nanos().max(1) as f64;
    SortStats {
        len: data.len(),
        elapsed_ms: nanos / 1_000_000.0,
        elements_per_ms: data.len() as f64 * 1_000_000.0 / nanos,
        is_sorted: is_sorted_by(data, &mut compare),
        metrics,
        scratch_bytes: metrics.peak_scratch * size_of::<T>(),
    }
}

pub fn is_sorted_by<T, F>(data: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    data.windows(2).all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}

/// True when `records` is ordered by value and equal values keep ascending ids.
pub fn is_stable(records: &[Record]) -> bool {
    records.windows(2).all(|w| {
        w[0].value < w[1].value || (w[0].value == w[1].value && w[0].id < w[1].id)
    })
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PatternReport {
    pub pattern: Pattern,
    pub size: usize,
    pub seed: u64,
    pub config: SortConfig,
    pub stats: SortStats,
    /// Only checked for [`Pattern::Objects`].
    pub stable: Option<bool>,
}

pub fn run_pattern(
    engine: &AdaptiveSort,
    size: usize,
    pattern: Pattern,
    seed: u64,
) -> PatternReport {
    let (stats, stable) = match generate_test_data(size, pattern, seed) {
        Dataset::Numbers(mut data) => (sort_with_stats(engine, &mut data, i64::cmp), None),
        Dataset::Strings(mut data) => (sort_with_stats(engine, &mut data, String::cmp), None),
        Dataset::Objects(mut data) => {
            let by_value = |a: &Record, b: &Record| a.value.cmp(&b.value);
            let stats = sort_with_stats(engine, &mut data, by_value);
            (stats, Some(is_stable(&data)))
        }
    };

    log::debug!(
        "{} x{}: {:.3} ms, {:.0} elem/ms, gallops={}",
        pattern,
        size,
        stats.elapsed_ms,
        stats.elements_per_ms,
        stats.metrics.gallops,
    );

    PatternReport {
        pattern,
        size,
        seed,
        config: engine.config(),
        stats,
        stable,
    }
}
