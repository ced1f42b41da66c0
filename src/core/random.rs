use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform random source consumed by the samplers.
///
/// Index draws are `raw % bound`; the modulo bias of that reduction is accepted.
pub trait RandomSource {
    fn raw_u32(&mut self) -> u32;
    fn raw_u64(&mut self) -> u64;
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    fn wide_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.raw_u64() % bound as u64) as usize
    }

    fn narrow_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        // 超出 u32 范围时退回宽整数
        match u32::try_from(bound) {
            Ok(b) => (self.raw_u32() % b) as usize,
            Err(_) => self.wide_below(bound),
        }
    }
}

impl<R: RngCore> RandomSource for R {
    fn raw_u32(&mut self) -> u32 {
        self.next_u32()
    }

    fn raw_u64(&mut self) -> u64 {
        self.next_u64()
    }

    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Builds the single generator for a run.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
