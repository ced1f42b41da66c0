use crate::core::random::RandomSource;
use crate::core::reservoir::OffsetReservoir;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io;

pub trait Sampler {
    fn sample<I>(&self, lines: I, rng: &mut dyn RandomSource) -> Result<SampleResult>
    where
        I: Iterator<Item = io::Result<u64>>;
}

#[derive(Debug, Clone)]
pub struct SampleResult {
    pub reservoir: OffsetReservoir,
    pub metadata: SampleMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMetadata {
    pub lines_seen: u64,
    pub sample_size: usize,
    pub method: String,
}
