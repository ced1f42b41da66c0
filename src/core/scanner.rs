use std::io::{self, BufRead};

/// Outcome of one capped line read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedLine {
    pub len: usize,
    /// True when the read ended on a `'\n'`.
    pub terminated: bool,
}

/// Reads up to and including the next `'\n'`, but never more than `cap` bytes.
///
/// Bytes are appended to `buf` when one is given, otherwise only counted.
pub fn read_bounded_line<R: BufRead + ?Sized>(
    reader: &mut R,
    cap: usize,
    mut buf: Option<&mut Vec<u8>>,
) -> io::Result<BoundedLine> {
    let mut len = 0;
    while len < cap {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        let window = &available[..available.len().min(cap - len)];
        let (take, terminated) = match window.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (window.len(), false),
        };
        if let Some(buf) = buf.as_deref_mut() {
            buf.extend_from_slice(&window[..take]);
        }
        reader.consume(take);
        len += take;

        if terminated {
            return Ok(BoundedLine { len, terminated });
        }
    }
    Ok(BoundedLine {
        len,
        terminated: false,
    })
}

/// Line-start offsets from sequential capped reads.
///
/// A line longer than the cap is cut at the cap and its remainder is read as
/// the next record. A trailing line without `'\n'` still counts.
pub struct BufferedLines<R> {
    reader: R,
    cap: usize,
    position: u64,
    done: bool,
}

impl<R: BufRead> BufferedLines<R> {
    pub fn new(reader: R, cap: usize) -> Self {
        Self {
            reader,
            cap,
            position: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for BufferedLines<R> {
    type Item = io::Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.position;
        match read_bounded_line(&mut self.reader, self.cap, None) {
            Ok(line) if line.len == 0 => {
                self.done = true;
                None
            }
            Ok(line) => {
                self.position += line.len as u64;
                Some(Ok(start))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Line-start offsets from a mapped byte range.
///
/// Only `'\n'`-terminated lines count; trailing bytes without a terminator
/// are ignored.
pub struct MappedLines<'a> {
    bytes: &'a [u8],
    start: usize,
}

impl<'a> MappedLines<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, start: 0 }
    }
}

impl<'a> Iterator for MappedLines<'a> {
    type Item = io::Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.start..)?;
        let pos = rest.iter().position(|&b| b == b'\n')?;
        let line_start = self.start;
        self.start += pos + 1;
        Some(Ok(line_start as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn buffered(data: &[u8], cap: usize) -> Vec<u64> {
        BufferedLines::new(Cursor::new(data.to_vec()), cap)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    fn mapped(data: &[u8]) -> Vec<u64> {
        MappedLines::new(data)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(buffered(b"", 64).is_empty());
        assert!(mapped(b"").is_empty());
    }

    #[test]
    fn unterminated_last_line_counts_only_when_buffered() {
        assert_eq!(buffered(b"x", 64), vec![0]);
        assert!(mapped(b"x").is_empty());

        assert_eq!(buffered(b"ab\ncd\nef", 64), vec![0, 3, 6]);
        assert_eq!(mapped(b"ab\ncd\nef"), vec![0, 3]);
    }

    #[test]
    fn bare_terminators_are_empty_lines() {
        assert_eq!(buffered(b"\n\n\n", 64), vec![0, 1, 2]);
        assert_eq!(mapped(b"\n\n\n"), vec![0, 1, 2]);
    }

    #[test]
    fn long_lines_split_at_cap_when_buffered() {
        // 10 字节 + 换行, cap = 4
        let data = b"0123456789\nab\n";
        assert_eq!(buffered(data, 4), vec![0, 4, 8, 11]);
        assert_eq!(mapped(data), vec![0, 11]);
    }

    #[test]
    fn bounded_read_stops_at_cap() {
        let mut reader = Cursor::new(b"abcdef\n".to_vec());
        let mut buf = Vec::new();
        let line = read_bounded_line(&mut reader, 3, Some(&mut buf)).unwrap();
        assert_eq!(line, BoundedLine { len: 3, terminated: false });
        assert_eq!(buf, b"abc");

        buf.clear();
        let line = read_bounded_line(&mut reader, 16, Some(&mut buf)).unwrap();
        assert_eq!(line, BoundedLine { len: 4, terminated: true });
        assert_eq!(buf, b"def\n");
    }

    #[test]
    fn bounded_read_crosses_buffer_refills() {
        let inner = Cursor::new(b"abcdefgh\nz".to_vec());
        let mut reader = io::BufReader::with_capacity(2, inner);
        let mut buf = Vec::new();
        let line = read_bounded_line(&mut reader, 64, Some(&mut buf)).unwrap();
        assert!(line.terminated);
        assert_eq!(buf, b"abcdefgh\n");
    }
}
