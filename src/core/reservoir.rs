use crate::core::random::RandomSource;
use crate::error::{Result, SampleError};
use tracing::{trace, Level};

/// How the slot index for a replacement is drawn.
///
/// The two widths consume the random stream differently, so the same seed
/// does not produce the same sample across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawWidth {
    Wide,
    Narrow,
}

/// Pool of line-start byte offsets.
#[derive(Debug, Clone)]
pub struct OffsetReservoir {
    offsets: Vec<u64>,
    count: usize,
    capacity: usize,
    growth_increment: Option<usize>,
}

impl OffsetReservoir {
    /// Fixed capacity `k`. All `k` slots exist from the start.
    pub fn fixed(k: usize) -> Result<Self> {
        Ok(Self {
            offsets: zeroed(k)?,
            count: 0,
            capacity: k,
            growth_increment: None,
        })
    }

    /// Growable pool that extends by exactly `increment` slots when full.
    pub fn growable(initial: usize, increment: usize) -> Result<Self> {
        Ok(Self {
            offsets: zeroed(initial)?,
            count: 0,
            capacity: initial,
            growth_increment: Some(increment.max(1)),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Active offsets, in slot order.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets[..self.count]
    }

    /// Algorithm R step for line `index` (0-based) starting at `offset`.
    pub fn offer<R: RandomSource + ?Sized>(
        &mut self,
        index: usize,
        offset: u64,
        width: DrawWidth,
        rng: &mut R,
    ) {
        let k = self.capacity;
        if k == 0 {
            return;
        }
        if index < k {
            self.offsets[index] = offset;
            self.count = index + 1;
            return;
        }

        // 两次抽样都无条件执行
        let slot = match width {
            DrawWidth::Wide => rng.wide_below(k),
            DrawWidth::Narrow => rng.narrow_below(k),
        };
        let p_replacement = k as f64 / (index + 1) as f64;
        if rng.next_unit() < p_replacement {
            trace!(slot, index, p_replacement, "replacing reservoir slot");
            self.offsets[slot] = offset;
        }
    }

    /// Appends an offset, growing the pool by the fixed increment if needed.
    pub fn push(&mut self, offset: u64) -> Result<()> {
        if self.count == self.capacity {
            let increment = self.growth_increment.ok_or_else(|| {
                SampleError::InvalidConfig("cannot grow a fixed-size reservoir".to_string())
            })?;
            let grown = self
                .capacity
                .checked_add(increment)
                .ok_or(SampleError::Allocation(usize::MAX))?;
            self.offsets
                .try_reserve_exact(increment)
                .map_err(|_| SampleError::Allocation(grown))?;
            self.offsets.resize(grown, 0);
            self.capacity = grown;
        }
        self.offsets[self.count] = offset;
        self.count += 1;
        Ok(())
    }

    /// Fisher-Yates over the active prefix.
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.count).rev() {
            let j = rng.wide_below(i + 1);
            self.offsets.swap(i, j);
        }
    }

    pub fn sort(&mut self) {
        self.offsets[..self.count].sort_unstable();
    }

    pub fn dump(&self) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        for (idx, offset) in self.offsets().iter().enumerate() {
            trace!("[{:012}] {:012}", idx, offset);
        }
    }
}

fn zeroed(len: usize) -> Result<Vec<u64>> {
    let mut offsets = Vec::new();
    offsets
        .try_reserve_exact(len)
        .map_err(|_| SampleError::Allocation(len))?;
    offsets.resize(len, 0);
    Ok(offsets)
}
