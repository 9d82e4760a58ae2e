use std::{ffi::OsStr, path::Path, process::Output};

use anyhow::Result;
use assert_cmd::Command;

mod json;

const ALL_KEYS: &str = indoc::indoc! {"
    API_SYSLED_URL=https://sysled.example.com
    API_SYSLED_KEY=sysled-secret
    API_SUPABASE_URL=https://project.supabase.co
    API_SUPABASE_KEY=supabase-secret
"};

/// Run envcheck in a directory with an otherwise empty environment.
fn envcheck<I, S>(directory: &Path, args: I, envs: &[(&str, &str)]) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envcheck"));
    cmd.current_dir(directory).env_clear().args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    Ok(cmd.output()?)
}

fn stdout(output: &Output) -> Result<String> {
    Ok(String::from_utf8(output.stdout.clone())?)
}
