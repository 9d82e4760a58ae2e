mod check;
mod cli;
mod config;

use std::process::ExitCode;

use cli::Cli;

fn main() -> ExitCode {
    Cli::init(module_path!())
}
