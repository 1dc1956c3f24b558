//! Command line interface for the `hello` binary.
//!
//! The definition is shared with `build.rs`, which renders the manual page
//! from it, so this module must not depend on anything else in the crate.

use std::ffi::OsString;

use clap::{ArgAction, Parser};

/// Command line arguments for the `hello` binary.
///
/// `--greeting` and `--traditional` override each other, so whichever appears
/// last on the command line wins. Like `getopt`, `--greeting` takes the next
/// argument as its text even when it starts with a dash. Long options may be
/// abbreviated to any unambiguous prefix (`--trad`, `--gree=TEXT`).
#[derive(Debug, Parser)]
#[command(
    name = "hello",
    version,
    about = "Print a friendly, customizable greeting.",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    infer_long_args = true
)]
pub struct Cli {
    /// Use TEXT as the greeting message.
    #[arg(
        short,
        long,
        value_name = "TEXT",
        value_parser = clap::value_parser!(OsString),
        allow_hyphen_values = true,
        overrides_with = "traditional"
    )]
    pub greeting: Option<OsString>,

    /// Use the traditional greeting.
    #[arg(short, long, overrides_with = "greeting")]
    pub traditional: bool,

    /// Print the greeting inside a box.
    #[arg(short, long)]
    pub next_generation: bool,

    /// Display this help and exit.
    #[arg(short = 'h', long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Output version information and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Operands are never valid; they are collected so they can be reported.
    #[arg(hide = true, value_parser = clap::value_parser!(OsString))]
    pub operands: Vec<OsString>,
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::{Parser, error::ErrorKind};
    use rstest::rstest;

    use super::Cli;

    #[test]
    fn parses_greeting_option() {
        let cli = Cli::parse_from(["hello", "--greeting", "Howdy"]);
        assert_eq!(cli.greeting.as_deref(), Some(OsStr::new("Howdy")));
        assert!(!cli.traditional);
    }

    #[rstest]
    #[case(&["hello", "-g", "x", "-t"], None, true)]
    #[case(&["hello", "-t", "-g", "x"], Some("x"), false)]
    #[case(&["hello", "-g", "a", "-g", "b"], Some("b"), false)]
    fn later_greeting_flags_win(
        #[case] args: &[&str],
        #[case] greeting: Option<&str>,
        #[case] traditional: bool,
    ) {
        let cli = Cli::parse_from(args);
        assert_eq!(
            cli.greeting.as_ref().and_then(|g| g.to_str()),
            greeting
        );
        assert_eq!(cli.traditional, traditional);
    }

    #[rstest]
    #[case("-h", ErrorKind::DisplayHelp)]
    #[case("--help", ErrorKind::DisplayHelp)]
    #[case("-v", ErrorKind::DisplayVersion)]
    #[case("--version", ErrorKind::DisplayVersion)]
    fn help_and_version_short_circuit(#[case] flag: &str, #[case] kind: ErrorKind) {
        let err = Cli::try_parse_from(["hello", flag]).expect_err("flag should exit early");
        assert_eq!(err.kind(), kind);
    }

    #[test]
    fn collects_operands() {
        let cli = Cli::parse_from(["hello", "world"]);
        assert_eq!(cli.operands, vec!["world"]);
    }
}
