//! Program lifecycle: parse flags, select a greeting, convert it for the
//! locale, write it, close the output.

use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use crate::{
    config::{Config, GreetingMode, GreetingSource, Invocation},
    error::{ConversionError, GreeterError, Result},
    frame::{Frame, FrameLine},
    help,
    i18n::{Message, gettext},
    locale::Locale,
    output::Output,
};

/// Name used in diagnostics when `argv[0]` is unusable.
pub const DEFAULT_PROGRAM_NAME: &str = "hello";

/// Process context shared by formatting and diagnostics.
#[derive(Clone, Debug)]
pub struct Context {
    program_name: String,
    locale: Locale,
}

impl Context {
    /// Build a context from an explicit program name and locale.
    pub fn new(program_name: impl Into<String>, locale: Locale) -> Self {
        Self {
            program_name: program_name.into(),
            locale,
        }
    }

    /// Build a context naming the program after `argv0`.
    ///
    /// Only the file name is kept, and a libtool `lt-` prefix is dropped.
    #[must_use]
    pub fn from_argv0(argv0: Option<&OsStr>, locale: Locale) -> Self {
        let name = argv0
            .map(Path::new)
            .and_then(Path::file_name)
            .and_then(OsStr::to_str)
            .map(|name| name.strip_prefix("lt-").unwrap_or(name))
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PROGRAM_NAME);
        Self::new(name, locale)
    }

    /// Program name used in diagnostics and usage text.
    #[must_use]
    pub fn program_name(&self) -> &str { &self.program_name }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> &Locale { &self.locale }
}

/// Final outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Exit code 0.
    Success,
    /// Exit code 1.
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Runs one invocation against an output and a diagnostics stream.
pub struct Greeter<'c, W, E> {
    ctx: &'c Context,
    out: Output<W>,
    diag: E,
    write_error_reported: bool,
}

impl<'c, W: Write, E: Write> Greeter<'c, W, E> {
    /// Create a greeter writing greetings to `out` and diagnostics to `diag`.
    pub fn new(ctx: &'c Context, out: W, diag: E) -> Self {
        Self {
            ctx,
            out: Output::new(out),
            diag,
            write_error_reported: false,
        }
    }

    /// Run the full lifecycle for `args` (program name first).
    pub fn run<I, T>(&mut self, args: I) -> Status
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let result = Invocation::parse(args)
            .map_err(GreeterError::from)
            .and_then(|invocation| self.dispatch(&invocation));
        let mut status = match result {
            Ok(()) => Status::Success,
            Err(err) => {
                self.report(&err);
                Status::Failure
            }
        };

        if let Err(err) = self.out.close() {
            if !self.write_error_reported {
                self.report(&GreeterError::Write(err));
            }
            status = Status::Failure;
        }
        status
    }

    /// Consume the greeter, returning the output and diagnostics writers.
    pub fn into_parts(self) -> (W, E) { (self.out.into_inner(), self.diag) }

    fn dispatch(&mut self, invocation: &Invocation) -> Result<()> {
        match invocation {
            Invocation::Help => {
                tracing::debug!("printing usage");
                self.out
                    .write_text(help::usage(self.ctx.program_name()).as_bytes());
                Ok(())
            }
            Invocation::Version => {
                tracing::debug!("printing version");
                self.out.write_text(help::version().as_bytes());
                Ok(())
            }
            Invocation::Greet(config) => self.greet(config),
        }
    }

    fn greet(&mut self, config: &Config) -> Result<()> {
        let ctx = self.ctx;
        let locale = ctx.locale();
        let charset = locale.charset();
        let greeting: Cow<'_, str> = match &config.source {
            GreetingSource::Default => Cow::Borrowed(gettext(Message::Greeting, locale)),
            GreetingSource::Traditional => {
                Cow::Borrowed(gettext(Message::TraditionalGreeting, locale))
            }
            GreetingSource::Custom(text) => charset.decode(text.as_encoded_bytes())?,
        };
        tracing::debug!(
            source = config.source.label(),
            mode = ?config.mode,
            %charset,
            "greeting selected"
        );

        match config.mode {
            GreetingMode::Traditional => {
                let encoded = charset.encode(&greeting)?;
                self.out.write_line(&encoded);
            }
            GreetingMode::NextGeneration => self.write_boxed(&greeting)?,
        }
        Ok(())
    }

    /// Render `greeting` in a frame. The whole frame is encoded before the
    /// first byte is written; a failed body line is reported and skipped.
    fn write_boxed(&mut self, greeting: &str) -> Result<()> {
        let charset = self.ctx.locale().charset();
        let frame = Frame::layout(greeting);
        let rendered = frame
            .lines()
            .map(|line| {
                let bytes = charset.encode(line.as_str())?.into_owned();
                Ok::<_, ConversionError>((line, bytes))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (index, (line, bytes)) in rendered.iter().enumerate() {
            match line {
                FrameLine::Border(_) => self.out.write_line(bytes),
                FrameLine::Body(_) => {
                    if let Err(err) = self.out.try_write_line(bytes) {
                        tracing::debug!(line = index, error = %err, "failed to write greeting line");
                        self.report_write(err);
                    }
                }
            }
        }
        Ok(())
    }

    fn report_write(&mut self, err: io::Error) {
        self.report(&GreeterError::Write(err));
        self.write_error_reported = true;
    }

    fn report(&mut self, err: &GreeterError) {
        let ctx = self.ctx;
        let program = ctx.program_name();
        // Nowhere left to report a failing diagnostics stream.
        let _ = writeln!(self.diag, "{program}: {err}");
        if err.wants_help_hint() {
            let _ = writeln!(self.diag, "Try '{program} --help' for more information.");
        }
    }
}

/// Run `args` with `ctx`, writing to `out` and `diag`.
pub fn run<I, T, W, E>(args: I, ctx: &Context, out: W, diag: E) -> Status
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    Greeter::new(ctx, out, diag).run(args)
}
