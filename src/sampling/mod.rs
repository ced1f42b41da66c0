pub mod fixed;
pub mod shuffle;

pub use fixed::FixedSizeSampler;
pub use shuffle::FullShuffleSampler;
