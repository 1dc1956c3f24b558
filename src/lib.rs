//! Public API for the `hello` greeter.
//!
//! The binary is a thin wrapper: it resolves a [`Context`] from the process
//! environment and hands the argument vector to [`run`]. Everything else,
//! from flag resolution to boxed rendering, lives here and can be driven with
//! in-memory writers.

pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod greeter;
pub mod help;
pub mod i18n;
pub mod locale;
pub mod output;

pub use config::{Config, GreetingMode, GreetingSource, Invocation};
pub use error::{ConversionError, GreeterError, Result, UsageError};
pub use frame::{Frame, FrameLine, LinePart};
pub use greeter::{Context, Greeter, Status, run};
pub use locale::{Charset, Locale};
