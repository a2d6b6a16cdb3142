//! Forward-only line reader over a byte source.
//!
//! [`LineReader::next_line`] distinguishes three outcomes: a line (`Ok(Some)`),
//! end of input (`Ok(None)`) and an I/O failure (`Err`). A single buffer is
//! reused across calls, so memory stays bounded by the longest line no matter
//! how large the file is.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read buffer size used when opening a corpus file.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Lazy line source over any [`BufRead`].
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    buf: String,
    lines_read: u64,
    bytes_read: u64,
}

impl LineReader<BufReader<File>> {
    /// Open `path` for buffered line reading.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the file cannot be opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap an existing buffered reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            lines_read: 0,
            bytes_read: 0,
        }
    }

    /// Read the next line without its terminator (`\n` or `\r\n`).
    ///
    /// The returned slice borrows the reader's buffer and is valid until the
    /// next call. A last line without a trailing newline is still returned.
    ///
    /// # Errors
    ///
    /// Propagates read failures, including `InvalidData` for non UTF-8 input.
    pub fn next_line(&mut self) -> io::Result<Option<&str>> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }

        self.lines_read += 1;
        self.bytes_read += n as u64;

        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(Some(self.buf.as_str()))
    }

    /// Lines produced so far, empty ones included.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Raw bytes consumed so far, terminators included.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
