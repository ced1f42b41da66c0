use crate::config::{Backend, Config, OrderMode, Replacement};
use crate::core::mapping::{open_input, FileMapping};
use crate::core::random::RandomSource;
use crate::core::reservoir::DrawWidth;
use crate::core::sampler::{SampleMetadata, SampleResult, Sampler};
use crate::core::scanner::{BufferedLines, MappedLines};
use crate::emit::{self, EmitStats};
use crate::error::{Result, SampleError};
use crate::sampling::{FixedSizeSampler, FullShuffleSampler};
use serde::Serialize;
use std::io::{BufReader, Write};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub metadata: SampleMetadata,
    pub emit: EmitStats,
}

/// Samples `config.input` and writes the selected lines to `out`.
pub fn run(config: &Config, rng: &mut dyn RandomSource, out: &mut dyn Write) -> Result<RunReport> {
    config.validate()?;
    check_modes(config)?;

    info!(
        input = %config.input.display(),
        backend = config.backend.name(),
        sample_size = ?config.sample_size,
        "sampling started"
    );

    // mmap 后端扫描和输出共用同一个映射
    let (mut result, mapping) = match config.backend {
        Backend::Buffered | Backend::Hybrid => (scan_buffered(config, rng)?, None),
        Backend::Mmap => {
            let mapping = FileMapping::open(&config.input)?;
            (scan_mapped(config, &mapping, rng)?, Some(mapping))
        }
    };

    result.reservoir.dump();

    if config.order == OrderMode::PreserveOrder {
        result.reservoir.sort();
        debug!("sorted offsets");
        result.reservoir.dump();
    }

    let offsets = result.reservoir.offsets();
    let cap = config.max_line_length;
    let emitted = match (config.backend, mapping) {
        (Backend::Mmap, Some(mapping)) => emit::emit_mapped(&mapping, offsets, cap, out)?,
        (Backend::Hybrid, _) => {
            let mapping = FileMapping::open(&config.input)?;
            emit::emit_mapped(&mapping, offsets, cap, out)?
        }
        (Backend::Buffered, _) | (Backend::Mmap, None) => {
            let file = open_input(&config.input)?;
            match config.order {
                OrderMode::PreserveOrder => emit::emit_sorted_buffered(file, offsets, cap, out)?,
                OrderMode::AsSampled => emit::emit_unsorted_buffered(file, offsets, cap, out)?,
            }
        }
    };
    out.flush()?;

    Ok(RunReport {
        metadata: result.metadata,
        emit: emitted,
    })
}

// 在碰文件之前拒绝不支持的组合
fn check_modes(config: &Config) -> Result<()> {
    if config.replacement == Replacement::With {
        return Err(SampleError::WithReplacementUnsupported);
    }
    if config.sample_size.is_none() && config.backend == Backend::Mmap {
        return Err(SampleError::UnspecifiedSizeUnsupported(config.backend.name()));
    }
    Ok(())
}

fn scan_buffered(config: &Config, rng: &mut dyn RandomSource) -> Result<SampleResult> {
    let file = open_input(&config.input)?;
    let lines = BufferedLines::new(BufReader::new(file), config.max_line_length);
    match config.sample_size {
        Some(k) => FixedSizeSampler::new(k, DrawWidth::Wide).sample(lines, rng),
        None => FullShuffleSampler::new(config.growth_increment, config.growth_increment).sample(lines, rng),
    }
}

fn scan_mapped(config: &Config, mapping: &FileMapping, rng: &mut dyn RandomSource) -> Result<SampleResult> {
    let k = config
        .sample_size
        .ok_or(SampleError::UnspecifiedSizeUnsupported(config.backend.name()))?;
    debug!(path = %mapping.path().display(), size = mapping.size(), "scanning mapping");
    FixedSizeSampler::new(k, DrawWidth::Narrow).sample(MappedLines::new(mapping.bytes()), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write as _;

    fn input(data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file
    }

    #[test]
    fn with_replacement_fails_before_any_output() {
        let file = input(b"a\nb\n");
        let mut config = Config::new(file.path());
        config.sample_size = Some(1);
        config.replacement = Replacement::With;
        let mut out = Vec::new();
        let err = run(&config, &mut StdRng::seed_from_u64(0), &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(out.is_empty());
    }

    #[test]
    fn unspecified_size_rejected_for_mmap() {
        let mut config = Config::new("/nonexistent/path/never/opened");
        config.backend = Backend::Mmap;
        let err = run(&config, &mut StdRng::seed_from_u64(0), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, SampleError::UnspecifiedSizeUnsupported("mmap")));
    }

    #[test]
    fn missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path().join("absent.txt"));
        config.sample_size = Some(2);
        for backend in [Backend::Mmap, Backend::Buffered, Backend::Hybrid] {
            config.backend = backend;
            let err = run(&config, &mut StdRng::seed_from_u64(0), &mut Vec::new()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Input);
        }
    }

    #[test]
    fn as_sampled_output_follows_reservoir_order() {
        let data = b"a\nb\nc\nd\ne\nf\ng\n";
        let file = input(data);
        let mut config = Config::new(file.path());
        config.sample_size = Some(3);
        config.backend = Backend::Buffered;

        let mut out = Vec::new();
        run(&config, &mut StdRng::seed_from_u64(17), &mut out).unwrap();

        // 用相同种子重放采样
        let expected = FixedSizeSampler::new(3, DrawWidth::Wide)
            .sample(
                BufferedLines::new(std::io::Cursor::new(&data[..]), config.max_line_length),
                &mut StdRng::seed_from_u64(17),
            )
            .unwrap();
        let mut replay = Vec::new();
        emit::emit_from_bytes(data, expected.reservoir.offsets(), 64, &mut replay).unwrap();
        assert_eq!(out, replay);
    }

    #[test]
    fn report_counts_lines() {
        let file = input(b"1\n2\n3\n4\n");
        let mut config = Config::new(file.path());
        config.sample_size = Some(2);
        let mut out = Vec::new();
        let report = run(&config, &mut StdRng::seed_from_u64(3), &mut out).unwrap();
        assert_eq!(report.metadata.lines_seen, 4);
        assert_eq!(report.metadata.sample_size, 2);
        assert_eq!(report.emit.lines, 2);
        assert_eq!(report.emit.bytes, out.len() as u64);
    }
}
