//! `hello` prints a friendly, customizable greeting.

use std::{io, process::ExitCode};

use hello::{Context, Locale};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Standard output carries only the greeting; logs go to standard error.
    let filter = EnvFilter::try_from_env("HELLO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<_> = std::env::args_os().collect();
    let locale = Locale::from_env(|var| std::env::var_os(var));
    let ctx = Context::from_argv0(args.first().map(|arg| arg.as_os_str()), locale);

    hello::run(args, &ctx, io::stdout().lock(), io::stderr().lock()).into()
}
