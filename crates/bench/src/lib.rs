use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, SamplingMode};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const RNG_SEED: u64 = 0x5EED_2026;

/// Criterion budget bucket chosen from the input length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeTier {
    Small,
    Medium,
    Large,
}

impl RuntimeTier {
    pub fn for_len(len: usize) -> Self {
        if len <= 16_384 {
            Self::Small
        } else if len <= 65_536 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    fn sample_size(self) -> usize {
        match self {
            Self::Small | Self::Medium => 15,
            Self::Large => 10,
        }
    }

    fn warm_up(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(100),
            Self::Medium => Duration::from_millis(500),
            Self::Large => Duration::from_millis(800),
        }
    }

    fn measurement(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(1000),
            Self::Large => Duration::from_millis(1500),
        }
    }

    fn sampling_mode(self) -> SamplingMode {
        match self {
            Self::Small => SamplingMode::Auto,
            Self::Medium | Self::Large => SamplingMode::Flat,
        }
    }
}

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, len: usize) {
    let tier = RuntimeTier::for_len(len);
    group.sample_size(tier.sample_size());
    group.warm_up_time(tier.warm_up());
    group.measurement_time(tier.measurement());
    group.sampling_mode(tier.sampling_mode());
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Derives a well-mixed per-case seed from the shared base seed.
pub fn seed_for(case: u64, size: usize) -> u64 {
    mix_seed(RNG_SEED ^ (case << 48) ^ size as u64)
}

#[inline]
fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
