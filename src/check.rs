use std::{
    fmt::{self, Write as _},
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::config::{Environment, Source, TrackedKey};

const CHECKING: &str = "Checking environment variables...";
const SUCCESS: &str = "✅ All keys and URLs were loaded successfully!";
const FAILURE: &str = "❌ Error: One or more environment variables were not found.";

/// Whether every value is set to something non-empty.
pub fn check_all<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    values
        .into_iter()
        .all(|value| value.is_some_and(|value| !value.is_empty()))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Outcome of a check.
///
/// Only key names end up in here. The values are credentials and are never reported.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    all_present: bool,
    missing: Vec<TrackedKey>,
    env_file: Option<PathBuf>,
}

impl Report {
    pub fn new(source: &Source, env: &Environment) -> Self {
        Self {
            all_present: check_all(env.values()),
            missing: env.missing(),
            env_file: source.path().map(ToOwned::to_owned),
        }
    }

    pub fn all_present(&self) -> bool {
        self.all_present
    }

    pub fn render(&self, format: Format) -> Result<String> {
        match format {
            Format::Text => Ok(self.to_string()),
            Format::Json => {
                let mut json =
                    serde_json::to_string_pretty(self).context("Failed to serialize report")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut report = String::new();
        writeln!(&mut report, "{CHECKING}")?;
        if self.all_present {
            writeln!(&mut report, "{SUCCESS}")?;
        } else {
            writeln!(&mut report, "{FAILURE}")?;
        }
        write!(f, "{report}")
    }
}

/// Print the report to stdout.
pub fn report(report: &Report, format: Format) -> Result<()> {
    let rendered = report.render(format)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write report to stdout")
}
