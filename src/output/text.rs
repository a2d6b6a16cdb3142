//! Plain-text output: one duplicate key per line.

use std::io::Write;

use super::OutputError;

/// Streams keys to a writer, newline-terminated.
#[derive(Debug)]
pub struct TextOutput<W: Write> {
    writer: W,
}

impl<W: Write> TextOutput<W> {
    /// Wrap a writer. Callers writing to files or stdout should pass a buffered writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write every key from `keys` and flush. Returns the number of keys written.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Io`] if the sink rejects a write.
    pub fn write_keys<I>(&mut self, keys: I) -> Result<usize, OutputError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut written = 0;
        for key in keys {
            self.writer.write_all(key.as_ref().as_bytes())?;
            self.writer.write_all(b"\n")?;
            written += 1;
        }
        self.writer.flush()?;
        Ok(written)
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
