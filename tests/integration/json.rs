use std::{ffi::OsStr, fs};

use anyhow::Result;
use expect_test::expect;
use indoc::indoc;
use tempfile::tempdir;

use crate::{ALL_KEYS, envcheck, stdout};

#[test]
fn json_lists_missing_keys() -> Result<()> {
    let tmpdir = tempdir()?;
    let env_file = tmpdir.path().join("missing.env");

    let output = envcheck(
        tmpdir.path(),
        [
            OsStr::new("--format"),
            OsStr::new("json"),
            OsStr::new("--env-file"),
            env_file.as_os_str(),
        ],
        &[],
    )?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)?)?;
    assert_eq!(report["allPresent"], false);
    assert_eq!(
        report["missing"],
        serde_json::json!([
            "API_SYSLED_URL",
            "API_SYSLED_KEY",
            "API_SUPABASE_URL",
            "API_SUPABASE_KEY"
        ])
    );
    assert_eq!(report["envFile"], serde_json::Value::Null);
    Ok(())
}

#[test]
fn json_never_contains_values() -> Result<()> {
    let tmpdir = tempdir()?;
    fs::write(tmpdir.path().join(".env"), ALL_KEYS)?;

    let output = envcheck(tmpdir.path(), ["--format", "json"], &[])?;
    assert!(output.status.success());

    let stdout = stdout(&output)?;
    assert!(!stdout.contains("secret"));

    let report: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(report["allPresent"], true);
    assert_eq!(report["missing"], serde_json::json!([]));
    Ok(())
}

#[test]
fn quiet_keeps_report() -> Result<()> {
    let tmpdir = tempdir()?;
    fs::write(
        tmpdir.path().join(".env"),
        indoc! {"
            API_SUPABASE_URL=https://project.supabase.co
        "},
    )?;

    let output = envcheck(tmpdir.path(), ["-q"], &[])?;

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let expected = expect![[r#"
        Checking environment variables...
        ❌ Error: One or more environment variables were not found.
    "#]];
    expected.assert_eq(&stdout(&output)?);
    Ok(())
}
