//! Output sink with close-time write error detection.
//!
//! Writes through [`Output::write_line`] never fail at the call site; the
//! first error is kept and surfaced by [`Output::close`], so a run that
//! writes to a full device still exits unsuccessfully. Callers that need to
//! react to a failure right away use [`Output::try_write_line`].

use std::io::{self, Write};

/// Line-oriented writer that remembers the first write failure.
#[derive(Debug)]
pub struct Output<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> Output<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self { Self { inner, error: None } }

    /// Write `bytes` as-is, keeping any error for [`Output::close`].
    pub fn write_text(&mut self, bytes: &[u8]) {
        if let Err(err) = self.inner.write_all(bytes) {
            self.remember(&err);
        }
    }

    /// Write `bytes` and a newline, keeping any error for [`Output::close`].
    pub fn write_line(&mut self, bytes: &[u8]) {
        let _ = self.try_write_line(bytes);
    }

    /// Write `bytes` and a newline, returning any error to the caller.
    ///
    /// The failure is still remembered, so [`Output::close`] fails as well.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the underlying writer.
    pub fn try_write_line(&mut self, bytes: &[u8]) -> io::Result<()> {
        let result = self
            .inner
            .write_all(bytes)
            .and_then(|()| self.inner.write_all(b"\n"));
        if let Err(err) = &result {
            self.remember(err);
        }
        result
    }

    /// Flush the writer and report the first failure seen, if any.
    ///
    /// # Errors
    ///
    /// Returns the first remembered write error, or the flush error.
    pub fn close(&mut self) -> io::Result<()> {
        let flushed = self.inner.flush();
        match self.error.take() {
            Some(err) => Err(err),
            None => flushed,
        }
    }

    /// Consume the sink, returning the wrapped writer.
    pub fn into_inner(self) -> W { self.inner }

    fn remember(&mut self, err: &io::Error) {
        if self.error.is_none() {
            self.error = Some(io::Error::new(err.kind(), err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "No space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn successful_writes_close_cleanly() {
        let mut out = Output::new(Vec::new());
        out.write_line(b"hello");
        out.write_text(b"world");
        assert!(out.close().is_ok());
        assert_eq!(out.into_inner(), b"hello\nworld");
    }

    #[test]
    fn deferred_write_error_surfaces_at_close() {
        let mut out = Output::new(FullDevice);
        out.write_line(b"hello");
        let err = out.close().expect_err("close should report the lost write");
        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
    }

    #[test]
    fn immediate_write_error_is_also_kept() {
        let mut out = Output::new(FullDevice);
        assert!(out.try_write_line(b"hello").is_err());
        assert!(out.close().is_err());
    }
}
