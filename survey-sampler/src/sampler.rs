use crate::error::SamplerError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How `generate_samples` treats trials larger than the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Allow a trial to contain the same item twice when it is larger than the pool
    #[default]
    Lenient,
    /// Reject trials larger than the pool; no trial then repeats an item
    Strict,
}

/// Draws trials from a pool using an injected randomness source
#[derive(Debug, Clone)]
pub struct Sampler<R: Rng> {
    pub rng: R,
    pub mode: SamplingMode,
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, mode: SamplingMode) -> Self {
        Self { rng, mode }
    }

    /// Shuffles `pool` in place, repeats it end to end until it covers
    /// `n * k` slots and cuts that into `n` consecutive trials of `k` items.
    ///
    /// Every pool item ends up in `floor(n*k / |pool|)` or `ceil(n*k / |pool|)`
    /// slots. Trials may straddle a repeat boundary.
    pub fn generate_samples<T: Clone>(
        &mut self,
        pool: &mut [T],
        n: usize,
        k: usize,
    ) -> Result<Vec<Vec<T>>, SamplerError> {
        if k == 0 {
            return Err(SamplerError::ZeroItemsPerTrial);
        }
        if n == 0 {
            return Ok(Vec::new());
        }
        let slots = n.checked_mul(k).ok_or(SamplerError::TooManySlots {
            trials: n,
            per_trial: k,
        })?;
        if pool.is_empty() {
            return Err(SamplerError::EmptyPool { requested: slots });
        }
        if self.mode == SamplingMode::Strict && k > pool.len() {
            return Err(SamplerError::TrialLargerThanPool {
                per_trial: k,
                pool_size: pool.len(),
            });
        }

        fy_shuffle(pool, &mut self.rng);

        let passes = slots.div_ceil(pool.len());
        debug!(
            pool = pool.len(),
            trials = n,
            per_trial = k,
            passes,
            "generating samples"
        );

        let repeated: Vec<T> = pool.iter().cycle().take(slots).cloned().collect();
        Ok(repeated.chunks(k).map(<[T]>::to_vec).collect())
    }

    /// Independent uniform draws with replacement
    pub fn sample_random_elements<T: Clone>(
        &mut self,
        pool: &[T],
        count: usize,
    ) -> Result<Vec<T>, SamplerError> {
        sample_random_elements(pool, count, &mut self.rng)
    }

    pub fn shuffle<T>(&mut self, sequence: &mut [T]) {
        fy_shuffle(sequence, &mut self.rng)
    }
}

/// Each output position draws a uniformly random index into `pool`.
/// No coverage or uniqueness guarantee.
pub fn sample_random_elements<T: Clone, R: Rng + ?Sized>(
    pool: &[T],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>, SamplerError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(SamplerError::EmptyPool { requested: count });
    }
    Ok((0..count)
        .map(|_| pool[rng.random_range(0..pool.len())].clone())
        .collect())
}

/// In-place Fisher-Yates shuffle
pub fn fy_shuffle<T, R: Rng + ?Sized>(sequence: &mut [T], rng: &mut R) {
    for i in (1..sequence.len()).rev() {
        let j = rng.random_range(0..=i);
        sequence.swap(i, j);
    }
}

/// Inserts `marker` `times` times at `i*(q+1) - 1` for `i = 1..=times`,
/// where `q = floor(len / (times + 1))` is taken from the original length.
///
/// Each index is applied to the sequence as it stands after the previous
/// insertions. Since `times * q <= len`, every index is within bounds.
pub fn insert_element<T: Clone>(sequence: &mut Vec<T>, marker: T, times: usize) {
    if times < 1 {
        return;
    }
    let q = sequence.len() / (times + 1);
    for i in 1..=times {
        let position = i * (q + 1) - 1;
        sequence.insert(position, marker.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn seeded(seed: u64) -> Sampler<StdRng> {
        Sampler::new(StdRng::seed_from_u64(seed), SamplingMode::Lenient)
    }

    fn counts<T: std::hash::Hash + Eq + Clone>(trials: &[Vec<T>]) -> HashMap<T, usize> {
        let mut map = HashMap::new();
        for item in trials.iter().flatten() {
            *map.entry(item.clone()).or_insert(0) += 1;
        }
        map
    }

    #[test]
    fn returns_n_trials_of_k_items() {
        let mut sampler = seeded(1);
        for (p, n, k) in [(8, 4, 3), (5, 10, 4), (336, 84, 4), (3, 1, 7), (1, 2, 1)] {
            let mut pool: Vec<usize> = (0..p).collect();
            let trials = sampler.generate_samples(&mut pool, n, k).unwrap();
            assert_eq!(trials.len(), n);
            assert!(trials.iter().all(|t| t.len() == k));
        }
    }

    #[test]
    fn every_item_is_used_floor_or_ceil_times() {
        let mut sampler = seeded(7);
        for (p, n, k) in [(8, 4, 3), (7, 9, 4), (336, 100, 4), (10, 3, 3), (4, 5, 9)] {
            let mut pool: Vec<usize> = (0..p).collect();
            let trials = sampler.generate_samples(&mut pool, n, k).unwrap();
            let counts = counts(&trials);
            let lo = n * k / p;
            let hi = (n * k).div_ceil(p);
            for item in 0..p {
                let c = counts.get(&item).copied().unwrap_or(0);
                assert!(lo <= c && c <= hi, "item {item} used {c} times, want {lo}..={hi}");
            }
        }
    }

    #[test]
    fn eight_items_four_trials_of_three() {
        let mut sampler = seeded(42);
        let mut pool: Vec<u32> = (1..=8).collect();
        let trials = sampler.generate_samples(&mut pool, 4, 3).unwrap();
        assert_eq!(trials.len(), 4);

        let counts = counts(&trials);
        let repeated = counts.values().filter(|&&c| c == 2).count();
        let single = counts.values().filter(|&&c| c == 1).count();
        assert_eq!(repeated, 4);
        assert_eq!(single, 4);
    }

    #[test]
    fn trials_follow_the_shuffled_pool_cyclically() {
        let mut sampler = seeded(3);
        let mut pool: Vec<u32> = (0..5).collect();
        let trials = sampler.generate_samples(&mut pool, 3, 4).unwrap();
        let flat: Vec<u32> = trials.concat();
        for (i, item) in flat.iter().enumerate() {
            assert_eq!(*item, pool[i % pool.len()]);
        }
    }

    #[test]
    fn pool_is_left_shuffled_not_replaced() {
        let mut sampler = seeded(11);
        let mut pool: Vec<u32> = (0..20).collect();
        sampler.generate_samples(&mut pool, 2, 2).unwrap();
        let mut sorted = pool.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn lenient_mode_allows_duplicates_in_oversized_trials() {
        let mut sampler = seeded(5);
        let mut pool = vec!['a', 'b'];
        let trials = sampler.generate_samples(&mut pool, 1, 5).unwrap();
        assert_eq!(trials[0].len(), 5);
        assert_eq!(counts(&trials).len(), 2);
    }

    #[test]
    fn strict_mode_rejects_oversized_trials() {
        let mut sampler = Sampler::new(StdRng::seed_from_u64(5), SamplingMode::Strict);
        let mut pool = vec![1, 2, 3];
        assert_eq!(
            sampler.generate_samples(&mut pool, 2, 4),
            Err(SamplerError::TrialLargerThanPool {
                per_trial: 4,
                pool_size: 3
            })
        );
    }

    #[test]
    fn strict_mode_trials_never_repeat_an_item() {
        let mut sampler = Sampler::new(StdRng::seed_from_u64(9), SamplingMode::Strict);
        let mut pool: Vec<u32> = (0..7).collect();
        let trials = sampler.generate_samples(&mut pool, 20, 4).unwrap();
        for trial in &trials {
            let mut sorted = trial.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), trial.len(), "duplicate in {trial:?}");
        }
    }

    #[test]
    fn degenerate_inputs() {
        let mut sampler = seeded(0);
        let mut empty: Vec<u8> = Vec::new();
        assert_eq!(
            sampler.generate_samples(&mut empty, 2, 2),
            Err(SamplerError::EmptyPool { requested: 4 })
        );
        assert_eq!(
            sampler.generate_samples(&mut vec![1u8], 3, 0),
            Err(SamplerError::ZeroItemsPerTrial)
        );
        assert_eq!(sampler.generate_samples(&mut empty, 0, 4), Ok(Vec::new()));
    }

    #[test]
    fn oversized_request_is_rejected() {
        let mut sampler = seeded(0);
        let mut pool = vec![1u8, 2, 3];
        let n = usize::MAX / 2 + 1;
        assert_eq!(
            sampler.generate_samples(&mut pool, n, 2),
            Err(SamplerError::TooManySlots {
                trials: n,
                per_trial: 2
            })
        );
        // nothing is shuffled when the request is refused
        assert_eq!(pool, vec![1, 2, 3]);
    }

    #[test]
    fn same_seed_same_trials() {
        let mut a = seeded(1234);
        let mut b = seeded(1234);
        let mut pool_a: Vec<u32> = (0..50).collect();
        let mut pool_b = pool_a.clone();
        assert_eq!(
            a.generate_samples(&mut pool_a, 10, 4).unwrap(),
            b.generate_samples(&mut pool_b, 10, 4).unwrap()
        );
    }

    #[test]
    fn random_elements_come_from_pool() {
        let mut sampler = seeded(8);
        let pool = ["x", "y", "z"];
        let drawn = sampler.sample_random_elements(&pool, 100).unwrap();
        assert_eq!(drawn.len(), 100);
        assert!(drawn.iter().all(|d| pool.contains(d)));
        // with replacement: 100 draws from 3 must repeat
        assert!(counts(&[drawn]).values().any(|&c| c > 1));
    }

    #[test]
    fn random_elements_from_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [u8; 0] = [];
        assert_eq!(sample_random_elements(&empty, 0, &mut rng), Ok(Vec::new()));
        assert_eq!(
            sample_random_elements(&empty, 1, &mut rng),
            Err(SamplerError::EmptyPool { requested: 1 })
        );
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seq = vec![1, 2, 3, 4, 5];
        fy_shuffle(&mut seq, &mut rng);
        let mut sorted = seq.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let runs = 120_000;
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..runs {
            let mut seq = vec![1u8, 2, 3, 4, 5];
            fy_shuffle(&mut seq, &mut rng);
            *seen.entry(seq).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 120);
        // expected 1000 per ordering; allow generous slack
        assert!(seen.values().all(|&c| (800..=1200).contains(&c)), "{seen:?}");
    }

    #[test]
    fn shuffle_handles_short_sequences() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<u8> = Vec::new();
        fy_shuffle(&mut empty, &mut rng);
        let mut one = vec![7];
        fy_shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn insert_twice_into_six() {
        let mut seq = vec!["1", "2", "3", "4", "5", "6"];
        insert_element(&mut seq, "X", 2);
        assert_eq!(seq, vec!["1", "2", "X", "3", "4", "X", "5", "6"]);
    }

    #[test]
    fn insert_zero_times_is_noop() {
        let mut seq = vec![1, 2, 3];
        insert_element(&mut seq, 0, 0);
        assert_eq!(seq, vec![1, 2, 3]);
    }

    #[test]
    fn insert_uses_growing_sequence() {
        // q = 10 / 5 = 2 -> positions 2, 5, 8, 11
        let mut seq: Vec<i32> = (1..=10).collect();
        insert_element(&mut seq, 0, 4);
        assert_eq!(seq, vec![1, 2, 0, 3, 4, 0, 5, 6, 0, 7, 8, 0, 9, 10]);
    }

    #[test]
    fn insert_into_short_sequences_stays_in_bounds() {
        for len in 0..6 {
            for times in 1..8 {
                let mut seq: Vec<i32> = (1..=len).collect();
                insert_element(&mut seq, 0, times);
                assert_eq!(seq.len(), len as usize + times);
                let originals: Vec<i32> = seq.iter().copied().filter(|&x| x != 0).collect();
                assert_eq!(originals, (1..=len).collect::<Vec<_>>());
            }
        }
    }
}
