//! Resolution of command line flags into a single run configuration.
//!
//! Parsing happens once; afterwards the greeter only ever looks at the
//! resolved [`Invocation`].

use std::ffi::OsString;

use clap::{
    Parser,
    error::{ContextKind, ErrorKind},
};

use crate::{cli::Cli, error::UsageError};

/// Where the greeting text comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GreetingSource {
    /// The localized default greeting.
    #[default]
    Default,
    /// The localized traditional greeting.
    Traditional,
    /// User-supplied text, printed verbatim.
    Custom(OsString),
}

impl GreetingSource {
    /// Short name used in log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Traditional => "traditional",
            Self::Custom(_) => "custom",
        }
    }
}

/// How the greeting is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GreetingMode {
    /// A single plain line.
    #[default]
    Traditional,
    /// The greeting drawn inside a box.
    NextGeneration,
}

/// Resolved configuration for printing a greeting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Greeting text selection.
    pub source: GreetingSource,
    /// Output layout.
    pub mode: GreetingMode,
}

/// What a run of the program should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage text.
    Help,
    /// Print version information.
    Version,
    /// Print a greeting.
    Greet(Config),
}

impl Invocation {
    /// Parse a full argument vector, program name first.
    ///
    /// `--help` and `--version` take effect as soon as the parser reaches
    /// them.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] for unknown options, options missing their
    /// argument, and positional operands.
    pub fn parse<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match Cli::try_parse_from(&args) {
            Ok(cli) => Self::from_cli(cli),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp => Ok(Self::Help),
                ErrorKind::DisplayVersion => Ok(Self::Version),
                _ => Err(usage_error(&err, args.last())),
            },
        }
    }

    fn from_cli(cli: Cli) -> Result<Self, UsageError> {
        if let Some(operand) = cli.operands.first() {
            return Err(UsageError::ExtraOperand(
                operand.to_string_lossy().into_owned(),
            ));
        }

        let source = match (cli.greeting, cli.traditional) {
            (Some(text), _) => GreetingSource::Custom(text),
            (None, true) => GreetingSource::Traditional,
            (None, false) => GreetingSource::Default,
        };
        let mode = if cli.next_generation {
            GreetingMode::NextGeneration
        } else {
            GreetingMode::Traditional
        };
        Ok(Self::Greet(Config { source, mode }))
    }
}

/// `last` is the final command line argument; an option missing its value
/// is always the last one, and its spelling decides the wording.
fn usage_error(err: &clap::Error, last: Option<&OsString>) -> UsageError {
    // clap reports e.g. `--greeting <TEXT>`; keep only the option itself.
    let token = err
        .get(ContextKind::InvalidArg)
        .map(ToString::to_string)
        .and_then(|arg| arg.split_whitespace().next().map(str::to_owned))
        .unwrap_or_default();

    match err.kind() {
        ErrorKind::UnknownArgument => unknown_option(token),
        ErrorKind::InvalidValue | ErrorKind::NoEquals | ErrorKind::WrongNumberOfValues => {
            missing_argument(token, last)
        }
        ErrorKind::TooManyValues => UsageError::UnexpectedArgument(token),
        kind => {
            let reason = kind.as_str().unwrap_or("invalid arguments");
            UsageError::Invalid(if token.is_empty() {
                reason.to_owned()
            } else {
                format!("{reason}: '{token}'")
            })
        }
    }
}

/// `-g` and clusters ending in it (`-tg`) are named by their character; a
/// long spelling, abbreviated or not, by the option's full name.
fn missing_argument(token: String, last: Option<&OsString>) -> UsageError {
    let short = last
        .map(|arg| arg.to_string_lossy())
        .filter(|arg| !arg.starts_with("--"))
        .and_then(|arg| arg.strip_prefix('-').and_then(|flags| flags.chars().last()));
    match short {
        Some(flag) => UsageError::MissingShortArgument(flag),
        None => UsageError::MissingArgument(token),
    }
}

/// Unknown short options are named by their character, long ones in full.
fn unknown_option(token: String) -> UsageError {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(short), None) if short != '-' => UsageError::InvalidOption(short),
        _ => UsageError::UnrecognizedOption(token),
    }
}
