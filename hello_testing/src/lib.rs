//! Test helpers for driving the `hello` greeter with in-memory streams.
//!
//! ```rust
//! use hello::{Context, Locale, Status};
//! use hello_testing::run_captured;
//!
//! let ctx = Context::new("hello", Locale::parse("en_US.UTF-8"));
//! let run = run_captured(&ctx, &["hello", "-t"]);
//! assert_eq!(run.status, Status::Success);
//! assert_eq!(run.stdout, "hello, world\n");
//! ```

pub mod logging;
pub mod sinks;

use std::{ffi::OsString, io::Write};

use hello::{Context, Greeter, Status};
pub use logging::{LoggerHandle, logger};
pub use sinks::{CloseFailure, FailingLines, SinkContents};

/// Everything a run produced.
#[derive(Debug)]
pub struct CapturedRun {
    /// Exit status.
    pub status: Status,
    /// Bytes written to standard output.
    pub stdout_bytes: Vec<u8>,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

/// Run `args` against in-memory buffers.
pub fn run_captured<I, T>(ctx: &Context, args: I) -> CapturedRun
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with(ctx, args, Vec::new())
}

/// Run `args` writing greetings to `out` and collecting standard error.
///
/// Arguments may be any `OsString`-convertible value, so tests can pass bytes
/// that are not UTF-8.
pub fn run_with<I, T, W>(ctx: &Context, args: I, out: W) -> CapturedRun
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + SinkContents,
{
    let mut greeter = Greeter::new(ctx, out, Vec::new());
    let status = greeter.run(args);
    let (out, err) = greeter.into_parts();
    let stdout_bytes = out.contents().to_vec();
    CapturedRun {
        status,
        stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
        stdout_bytes,
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}
