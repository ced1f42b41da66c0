use crate::core::random::RandomSource;
use crate::core::reservoir::OffsetReservoir;
use crate::core::sampler::{SampleMetadata, SampleResult, Sampler};
use crate::error::Result;
use std::io;
use tracing::debug;

/// Collects every line offset, then permutes them with Fisher-Yates.
pub struct FullShuffleSampler {
    pub initial: usize,
    pub increment: usize,
}

impl FullShuffleSampler {
    pub fn new(initial: usize, increment: usize) -> Self {
        Self { initial, increment }
    }
}

impl Sampler for FullShuffleSampler {
    fn sample<I>(&self, lines: I, rng: &mut dyn RandomSource) -> Result<SampleResult>
    where
        I: Iterator<Item = io::Result<u64>>,
    {
        let mut reservoir = OffsetReservoir::growable(self.initial, self.increment)?;
        for offset in lines {
            reservoir.push(offset?)?;
        }

        let lines_seen = reservoir.len() as u64;
        debug!(lines_seen, capacity = reservoir.capacity(), "collected all offsets");

        reservoir.shuffle(rng);

        Ok(SampleResult {
            metadata: SampleMetadata {
                lines_seen,
                sample_size: reservoir.len(),
                method: "shuffle".to_string(),
            },
            reservoir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn returns_every_offset_once() {
        let mut rng = StdRng::seed_from_u64(9);
        let result = FullShuffleSampler::new(4, 4)
            .sample((0..37u64).map(Ok), &mut rng)
            .unwrap();
        assert_eq!(result.metadata.sample_size, 37);
        assert_eq!(result.reservoir.capacity(), 40);
        let mut got = result.reservoir.offsets().to_vec();
        got.sort_unstable();
        assert_eq!(got, (0..37u64).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_gives_empty_sample() {
        let mut rng = StdRng::seed_from_u64(9);
        let result = FullShuffleSampler::new(10, 10)
            .sample(std::iter::empty(), &mut rng)
            .unwrap();
        assert!(result.reservoir.is_empty());
        assert_eq!(result.metadata.lines_seen, 0);
    }

    #[test]
    fn every_position_is_reachable() {
        // 首元素在多次运行中应落到每个位置
        let mut seen = [false; 5];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = FullShuffleSampler::new(5, 5)
                .sample((0..5u64).map(Ok), &mut rng)
                .unwrap();
            let pos = result
                .reservoir
                .offsets()
                .iter()
                .position(|&o| o == 0)
                .unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
