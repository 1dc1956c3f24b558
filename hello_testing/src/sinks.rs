//! Output sinks that misbehave on purpose.

use std::io::{self, Write};

/// Access to what a sink accepted.
pub trait SinkContents {
    /// Bytes successfully written so far.
    fn contents(&self) -> &[u8];
}

impl SinkContents for Vec<u8> {
    fn contents(&self) -> &[u8] { self }
}

fn device_full() -> io::Error { io::Error::new(io::ErrorKind::StorageFull, "No space left on device") }

/// Rejects every write containing one of its needles; everything else is
/// kept. With no needles at all, every write fails.
#[derive(Debug, Default)]
pub struct FailingLines {
    needles: Vec<Vec<u8>>,
    written: Vec<u8>,
}

impl FailingLines {
    /// Fail writes whose bytes contain `needle`.
    pub fn containing(needle: &str) -> Self { Self::default().or_containing(needle) }

    /// Also fail writes whose bytes contain `needle`.
    #[must_use]
    pub fn or_containing(mut self, needle: &str) -> Self {
        self.needles.push(needle.as_bytes().to_vec());
        self
    }

    /// Fail every write, like `/dev/full`.
    pub fn all() -> Self { Self::default() }

    fn rejects(&self, buf: &[u8]) -> bool {
        self.needles.is_empty()
            || self
                .needles
                .iter()
                .any(|needle| buf.windows(needle.len()).any(|w| w == needle))
    }
}

impl Write for FailingLines {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.rejects(buf) {
            return Err(device_full());
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl SinkContents for FailingLines {
    fn contents(&self) -> &[u8] { &self.written }
}

/// Accepts every write but fails when flushed at close.
#[derive(Debug, Default)]
pub struct CloseFailure {
    written: Vec<u8>,
}

impl Write for CloseFailure {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Err(device_full()) }
}

impl SinkContents for CloseFailure {
    fn contents(&self) -> &[u8] { &self.written }
}
