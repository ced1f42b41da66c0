use crate::core::mapping::FileMapping;
use crate::core::scanner::read_bounded_line;
use crate::error::{Result, SampleError};
use serde::Serialize;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmitStats {
    pub lines: usize,
    pub bytes: u64,
    /// Lines cut at the length cap.
    pub truncated: usize,
}

impl EmitStats {
    fn record(&mut self, offset: u64, len: usize, terminated: bool, cap: usize) {
        self.lines += 1;
        self.bytes += len as u64;
        if !terminated && len == cap {
            self.truncated += 1;
            warn!(offset, cap, "line exceeds maximum length, truncated");
        }
    }
}

/// Offsets must be ascending. Seeks only forward, relative to the last line read.
pub fn emit_sorted_buffered<R, W>(reader: R, offsets: &[u64], cap: usize, out: &mut W) -> Result<EmitStats>
where
    R: Read + Seek,
    W: Write + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::with_capacity(cap.min(64 * 1024));
    let mut stats = EmitStats::default();
    let mut previous_offset: u64 = 0;
    let mut previous_line_length: u64 = 0;

    for &offset in offsets {
        let delta = offset as i64 - previous_offset as i64 - previous_line_length as i64;
        reader.seek_relative(delta)?;

        line.clear();
        let read = read_bounded_line(&mut reader, cap, Some(&mut line))?;
        out.write_all(&line)?;
        stats.record(offset, read.len, read.terminated, cap);

        previous_offset = offset;
        previous_line_length = read.len as u64;
    }

    Ok(stats)
}

/// Any offset order; every line is an absolute seek.
pub fn emit_unsorted_buffered<R, W>(reader: R, offsets: &[u64], cap: usize, out: &mut W) -> Result<EmitStats>
where
    R: Read + Seek,
    W: Write + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::with_capacity(cap.min(64 * 1024));
    let mut stats = EmitStats::default();

    for &offset in offsets {
        reader.seek(SeekFrom::Start(offset))?;

        line.clear();
        let read = read_bounded_line(&mut reader, cap, Some(&mut line))?;
        out.write_all(&line)?;
        stats.record(offset, read.len, read.terminated, cap);
    }

    Ok(stats)
}

/// Reads lines straight out of the mapping, no seeking.
pub fn emit_mapped<W>(mapping: &FileMapping, offsets: &[u64], cap: usize, out: &mut W) -> Result<EmitStats>
where
    W: Write + ?Sized,
{
    emit_from_bytes(mapping.bytes(), offsets, cap, out)
}

pub(crate) fn emit_from_bytes<W>(bytes: &[u8], offsets: &[u64], cap: usize, out: &mut W) -> Result<EmitStats>
where
    W: Write + ?Sized,
{
    let mut stats = EmitStats::default();

    for &offset in offsets {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&start| start < bytes.len())
            .ok_or(SampleError::OffsetOutOfRange {
                offset,
                size: bytes.len() as u64,
            })?;

        // 到换行符 (含) 或长度上限为止
        let window = &bytes[start..bytes.len().min(start.saturating_add(cap))];
        let (len, terminated) = match window.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (window.len(), false),
        };
        out.write_all(&window[..len])?;
        stats.record(offset, len, terminated, cap);
    }

    Ok(stats)
}
