//! upgrade-config: migrate a legacy TOML proxy configuration to the current
//! YAML schema and print it to stdout.

mod error;
mod tools;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "upgrade-config",
    about = "Upgrade a legacy TOML proxy configuration to the current YAML schema",
    version
)]
struct Cli {
    /// Path to the legacy configuration file.
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match tools::upgrade::run(&cli.file) {
        Ok(yaml) => {
            println!("{}", yaml);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
