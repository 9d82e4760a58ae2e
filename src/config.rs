use std::{
    env, fmt,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

/// Environment variable that points to the dotenv file.
const ENV_FILE_VAR: &str = "ENVCHECK_ENV_FILE";

/// A key that has to be present for the services to be reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackedKey {
    SysledUrl,
    SysledKey,
    SupabaseUrl,
    SupabaseKey,
}

impl TrackedKey {
    pub const ALL: [Self; 4] = [
        Self::SysledUrl,
        Self::SysledKey,
        Self::SupabaseUrl,
        Self::SupabaseKey,
    ];

    /// Name of the environment variable.
    pub fn name(self) -> &'static str {
        match self {
            Self::SysledUrl => "API_SYSLED_URL",
            Self::SysledKey => "API_SYSLED_KEY",
            Self::SupabaseUrl => "API_SUPABASE_URL",
            Self::SupabaseKey => "API_SUPABASE_KEY",
        }
    }

    pub fn service(self) -> Service {
        match self {
            Self::SysledUrl | Self::SysledKey => Service::Sysled,
            Self::SupabaseUrl | Self::SupabaseKey => Service::Supabase,
        }
    }
}

impl Serialize for TrackedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for TrackedKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Sysled,
    Supabase,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sysled => write!(f, "Sysled"),
            Self::Supabase => write!(f, "Supabase"),
        }
    }
}

/// Where the environment was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Missing,
    Unreadable,
}

impl Source {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Missing | Self::Unreadable => None,
        }
    }
}

/// Load a dotenv file into the process environment.
///
/// If no path is given, the first `.env` found walking up from the current directory is used.
/// Variables that are already set in the environment are left untouched.
///
/// This never fails. A missing file only means that the values have to come from somewhere
/// else, and a broken file is reported as a warning.
pub fn load(path: Option<&Path>) -> Source {
    match try_load(path) {
        Ok(source) => source,
        Err(err) => {
            log::warn!("{err:#}");
            Source::Unreadable
        }
    }
}

fn try_load(path: Option<&Path>) -> Result<Source> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match result {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            Ok(Source::File(path))
        }
        Err(err) if err.not_found() => {
            match path {
                Some(path) => log::info!("{} not found", path.display()),
                None => log::debug!("No .env file found"),
            }
            Ok(Source::Missing)
        }
        Err(err) => Err(err).with_context(|| match path {
            Some(path) => format!("Failed to load {}", path.display()),
            None => "Failed to load .env".into(),
        }),
    }
}

/// Read a variable from the process environment.
///
/// Only unset variables are absent. A value that is not valid unicode is still a value and is
/// converted lossily.
pub fn retrieve(key: &str) -> Option<String> {
    env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// The dotenv file named by `ENVCHECK_ENV_FILE`.
///
/// An empty value is treated like an unset one.
pub fn env_file() -> Option<PathBuf> {
    env::var_os(ENV_FILE_VAR)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Snapshot of the tracked keys.
///
/// Captured once after loading and passed to whatever needs the values, so nothing else has to
/// read the process environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    values: [Option<String>; 4],
}

impl Environment {
    pub fn capture() -> Self {
        Self::from_lookup(retrieve)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            values: TrackedKey::ALL.map(|key| lookup(key.name())),
        }
    }

    pub fn get(&self, key: TrackedKey) -> Option<&str> {
        TrackedKey::ALL
            .iter()
            .position(|k| *k == key)
            .and_then(|i| self.values[i].as_deref())
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.values.iter().map(Option::as_deref)
    }

    /// Keys that are unset or empty.
    pub fn missing(&self) -> Vec<TrackedKey> {
        TrackedKey::ALL
            .into_iter()
            .zip(self.values())
            .filter(|(_, value)| value.is_none_or(str::is_empty))
            .map(|(key, _)| key)
            .collect()
    }
}
