//! Canonical error and result types for the crate.
//!
//! Every failure a run can hit ends that run: usage errors before any output,
//! conversion errors before any output, and write errors detected while
//! writing or at close.

use std::io;

use thiserror::Error;

use crate::locale::Charset;

/// The command line could not be turned into an invocation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// An option that is not part of the flag set.
    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),
    /// An unknown single-character option.
    #[error("invalid option -- '{0}'")]
    InvalidOption(char),
    /// An option that needs an argument was given none.
    #[error("option '{0}' requires an argument")]
    MissingArgument(String),
    /// A short option that needs an argument was given none.
    #[error("option requires an argument -- '{0}'")]
    MissingShortArgument(char),
    /// A flag was given a value with `=`.
    #[error("option '{0}' doesn't allow an argument")]
    UnexpectedArgument(String),
    /// A positional operand; the program accepts none.
    #[error("extra operand: {0}")]
    ExtraOperand(String),
    /// Any other rejection from the argument parser.
    #[error("{0}")]
    Invalid(String),
}

/// The greeting could not be represented in the locale's character set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The greeting bytes do not form a valid character sequence.
    #[error("invalid or incomplete multibyte or wide character")]
    InvalidSequence,
    /// A character has no encoding in the active charset.
    #[error("character {ch:?} cannot be represented in {charset}")]
    Unrepresentable {
        /// First offending character.
        ch: char,
        /// Charset of the active locale.
        charset: Charset,
    },
}

/// Top-level error for a greeter run.
#[derive(Debug, Error)]
pub enum GreeterError {
    /// Bad flag or operand.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// Greeting text could not be converted for output.
    #[error("conversion to a multibyte string failed: {0}")]
    Conversion(#[from] ConversionError),
    /// Writing to standard output failed.
    #[error("write error: {0}")]
    Write(#[from] io::Error),
}

impl GreeterError {
    /// Returns true if the user should be pointed at `--help`.
    #[must_use]
    pub fn wants_help_hint(&self) -> bool { matches!(self, Self::Usage(_)) }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GreeterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_messages_name_the_token() {
        assert_eq!(
            UsageError::UnrecognizedOption("--shout".into()).to_string(),
            "unrecognized option '--shout'"
        );
        assert_eq!(
            UsageError::ExtraOperand("world".into()).to_string(),
            "extra operand: world"
        );
        assert_eq!(UsageError::InvalidOption('x').to_string(), "invalid option -- 'x'");
        assert_eq!(
            UsageError::MissingShortArgument('g').to_string(),
            "option requires an argument -- 'g'"
        );
        assert_eq!(
            UsageError::UnexpectedArgument("--traditional".into()).to_string(),
            "option '--traditional' doesn't allow an argument"
        );
    }

    #[test]
    fn conversion_error_is_wrapped_with_context() {
        let err = GreeterError::from(ConversionError::Unrepresentable {
            ch: 'ś',
            charset: Charset::Latin1,
        });
        assert_eq!(
            err.to_string(),
            "conversion to a multibyte string failed: character 'ś' cannot be represented in ISO-8859-1"
        );
        assert!(!err.wants_help_hint());
    }

    #[test]
    fn write_error_keeps_its_cause() {
        let err = GreeterError::from(io::Error::other("No space left on device"));
        assert_eq!(err.to_string(), "write error: No space left on device");
    }
}
