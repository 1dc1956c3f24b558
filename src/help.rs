//! `--help` and `--version` text.

/// Address shown in the usage text for bug reports.
pub const BUG_REPORT_ADDRESS: &str = "bug-hello@gnu.org";

/// Usage text for `program`.
#[must_use]
pub fn usage(program: &str) -> String {
    format!(
        "\
Usage: {program} [OPTION]...
Print a friendly, customizable greeting.

Mandatory arguments to long options are mandatory for short options too.
  -t, --traditional       use traditional greeting
  -g, --greeting=TEXT     use TEXT as the greeting message
  -n, --next-generation   print the greeting inside a box
  -h, --help              display this help and exit
  -v, --version           output version information and exit

Report bugs to: {BUG_REPORT_ADDRESS}
{name} home page: <{homepage}>
General help using GNU software: <https://www.gnu.org/gethelp/>
",
        name = env!("CARGO_PKG_NAME"),
        homepage = env!("CARGO_PKG_HOMEPAGE"),
    )
}

/// Name, version, license and author block.
#[must_use]
pub fn version() -> String {
    format!(
        "\
{name} {version}
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.

Written by The King and others.
",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    )
}
