pub mod mapping;
pub mod random;
pub mod reservoir;
pub mod sampler;
pub mod scanner;

pub use mapping::{open_input, FileMapping};
pub use random::{make_rng, RandomSource};
pub use reservoir::{DrawWidth, OffsetReservoir};
pub use sampler::{SampleMetadata, SampleResult, Sampler};
pub use scanner::{read_bounded_line, BoundedLine, BufferedLines, MappedLines};
