//! Build script generating the manual page from the CLI definition.

use std::{fs, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from("target/generated-man");
    fs::create_dir_all(&out_dir)?;

    let man = Man::new(cli::Cli::command())
        .section("1")
        .manual("User Commands")
        .source(concat!("hello ", env!("CARGO_PKG_VERSION")));

    let mut page = fs::File::create(out_dir.join("hello.1"))?;
    man.render(&mut page)?;

    Ok(())
}
