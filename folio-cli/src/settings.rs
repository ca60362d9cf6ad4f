//! User settings (`~/.config/folio/settings.toml`) and database path
//! resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use folio_reconcile::PhaseDeadlines;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Environment variable naming the catalog database file.
pub(crate) const DB_ENV_VAR: &str = "FOLIO_DB";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub deadlines: DeadlineSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DeadlineSettings {
    #[serde(default = "default_read_ms")]
    pub read_ms: u64,
    #[serde(default = "default_write_ms")]
    pub write_ms: u64,
}

fn default_read_ms() -> u64 {
    1200
}

fn default_write_ms() -> u64 {
    4000
}

impl Default for DeadlineSettings {
    fn default() -> Self {
        Self {
            read_ms: default_read_ms(),
            write_ms: default_write_ms(),
        }
    }
}

impl DeadlineSettings {
    /// The read phase must be given less time than the write phase.
    pub fn check(&self) -> Result<(), String> {
        if self.read_ms >= self.write_ms {
            return Err(format!(
                "deadlines.read_ms ({}) must be less than deadlines.write_ms ({})",
                self.read_ms, self.write_ms
            ));
        }
        Ok(())
    }

    pub fn to_deadlines(&self) -> PhaseDeadlines {
        PhaseDeadlines::from_millis(self.read_ms, self.write_ms)
    }
}

/// Canonical path to the settings file: `~/.config/folio/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("folio").join("settings.toml")
}

/// Default database location: `<data_dir>/folio/catalog.db`.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("folio").join("catalog.db")
}

impl Settings {
    /// Load settings from the canonical path. A missing file yields defaults.
    pub fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))?;
        settings
            .deadlines
            .check()
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))?;
        Ok(settings)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Where the resolved database path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DbPathSource {
    Flag,
    EnvVar,
    SettingsFile,
    Default,
}

impl fmt::Display for DbPathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbPathSource::Flag => f.write_str("--db flag"),
            DbPathSource::EnvVar => write!(f, "{DB_ENV_VAR} environment variable"),
            DbPathSource::SettingsFile => f.write_str("settings file"),
            DbPathSource::Default => f.write_str("default"),
        }
    }
}

/// Resolve the database path using a priority chain:
///
/// 1. `--db` flag
/// 2. `FOLIO_DB` environment variable (`env_value`)
/// 3. `database.path` in `settings.toml`
/// 4. `<data_dir>/folio/catalog.db`
pub(crate) fn resolve_db_path(
    flag: Option<PathBuf>,
    env_value: Option<PathBuf>,
    settings: &Settings,
) -> (PathBuf, DbPathSource) {
    if let Some(p) = flag {
        return (p, DbPathSource::Flag);
    }
    if let Some(p) = env_value.filter(|p| !p.as_os_str().is_empty()) {
        return (p, DbPathSource::EnvVar);
    }
    if let Some(p) = &settings.database.path {
        return (p.clone(), DbPathSource::SettingsFile);
    }
    (default_db_path(), DbPathSource::Default)
}

/// The value of `FOLIO_DB`, if set.
pub(crate) fn db_path_from_env() -> Option<PathBuf> {
    std::env::var_os(DB_ENV_VAR).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.deadlines.to_deadlines(), PhaseDeadlines::default());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let settings = Settings::parse(
            r#"
            [database]
            path = "/srv/folio/catalog.db"

            [deadlines]
            write_ms = 9000
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.database.path.as_deref(),
            Some(Path::new("/srv/folio/catalog.db"))
        );
        assert_eq!(settings.deadlines.read_ms, 1200);
        assert_eq!(settings.deadlines.write_ms, 9000);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[deadlines]\nread_ms = \"soon\"\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn read_deadline_must_be_shorter_than_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[deadlines]\nread_ms = 5000\nwrite_ms = 4000\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(CliError::Config(_))));

        let equal = DeadlineSettings {
            read_ms: 4000,
            write_ms: 4000,
        };
        assert!(equal.check().is_err());
        assert!(DeadlineSettings::default().check().is_ok());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn db_path_priority() {
        let settings = Settings {
            database: DatabaseSettings {
                path: Some(PathBuf::from("/from/settings.db")),
            },
            ..Default::default()
        };

        let (p, src) = resolve_db_path(
            Some(PathBuf::from("/from/flag.db")),
            Some(PathBuf::from("/from/env.db")),
            &settings,
        );
        assert_eq!((p.as_path(), src), (Path::new("/from/flag.db"), DbPathSource::Flag));

        let (p, src) = resolve_db_path(None, Some(PathBuf::from("/from/env.db")), &settings);
        assert_eq!((p.as_path(), src), (Path::new("/from/env.db"), DbPathSource::EnvVar));

        let (p, src) = resolve_db_path(None, Some(PathBuf::new()), &settings);
        assert_eq!(
            (p.as_path(), src),
            (Path::new("/from/settings.db"), DbPathSource::SettingsFile)
        );

        let (_, src) = resolve_db_path(None, None, &Settings::default());
        assert_eq!(src, DbPathSource::Default);
    }
}
