use crate::core::random::RandomSource;
use crate::core::reservoir::{DrawWidth, OffsetReservoir};
use crate::core::sampler::{SampleMetadata, SampleResult, Sampler};
use crate::error::Result;
use std::io;
use tracing::debug;

/// Algorithm R over line offsets with a fixed sample size `k`.
pub struct FixedSizeSampler {
    pub k: usize,
    pub width: DrawWidth,
}

impl FixedSizeSampler {
    pub fn new(k: usize, width: DrawWidth) -> Self {
        Self { k, width }
    }
}

impl Sampler for FixedSizeSampler {
    fn sample<I>(&self, lines: I, rng: &mut dyn RandomSource) -> Result<SampleResult>
    where
        I: Iterator<Item = io::Result<u64>>,
    {
        let mut reservoir = OffsetReservoir::fixed(self.k)?;
        let mut lines_seen: u64 = 0;

        for (index, offset) in lines.enumerate() {
            reservoir.offer(index, offset?, self.width, rng);
            lines_seen += 1;
        }

        // 行数少于 k 时 count 已自动收缩
        let sample_size = reservoir.len();
        debug!(k = self.k, lines_seen, sample_size, "fixed-size sampling finished");

        Ok(SampleResult {
            reservoir,
            metadata: SampleMetadata {
                lines_seen,
                sample_size,
                method: "reservoir".to_string(),
            },
        })
    }
}
