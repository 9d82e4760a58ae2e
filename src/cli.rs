use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    check::{self, Format, Report},
    config::{self, Environment, TrackedKey},
};

/// The default log level.
///
/// 2 corresponds to the level INFO.
const DEFAULT_LOG_LEVEL: usize = 2;

/// Check that the API keys and URLs are available in the environment
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Silence all log output
    #[arg(short, long)]
    quiet: bool,
    /// Verbose mode (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// The dotenv file to load
    #[arg(
        short = 'f',
        long,
        long_help = "The dotenv file to load\n\n\
            If this is omitted, ENVCHECK_ENV_FILE is used. Otherwise the first .env found in \
            the current directory or one of its parents is loaded."
    )]
    env_file: Option<PathBuf>,
    /// Output format of the report
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

impl Cli {
    pub fn init(module: &str) -> ExitCode {
        let cli = Self::parse();

        let _ = stderrlog::new()
            .module(module)
            .show_level(false)
            .quiet(cli.quiet)
            .verbosity(DEFAULT_LOG_LEVEL + usize::from(cli.verbose))
            .init();

        let env_file = cli.env_file.or_else(config::env_file);

        // A missing variable is reported, it is not a failure.
        match run(env_file.as_deref(), cli.format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                // When at least one -v is added, the source of the error is also printed.
                if DEFAULT_LOG_LEVEL + usize::from(cli.verbose) >= 3 {
                    log::error!("{err:#}");
                } else {
                    log::error!("{err}");
                }
                ExitCode::FAILURE
            }
        }
    }
}

fn run(env_file: Option<&Path>, format: Format) -> Result<()> {
    let source = config::load(env_file);
    let env = Environment::capture();

    for key in TrackedKey::ALL {
        // Never log the value as it is a secret.
        match env.get(key) {
            Some("") => log::warn!("{}: {key} is empty", key.service()),
            Some(_) => log::debug!("{}: {key} is set", key.service()),
            None => log::warn!("{}: {key} is not set", key.service()),
        }
    }

    let report = Report::new(&source, &env);
    if !report.all_present() {
        log::debug!("Configuration is incomplete");
    }

    check::report(&report, format)
}
