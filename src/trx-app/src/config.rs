// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an extra config file, searched first.
pub const CONFIG_ENV: &str = "TRX_APRS_CONFIG";
const CONFIG_FILE_NAME: &str = "trx-aprs.toml";
const CONFIG_DIR_NAME: &str = "trx-aprs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
}

/// Search order: `$TRX_APRS_CONFIG`, `./trx-aprs.toml`, XDG config dir,
/// `/etc/trx-aprs/`.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if !env_path.trim().is_empty() {
            paths.push(PathBuf::from(env_path));
        }
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths.push(Path::new("/etc").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    paths
}

/// Read `path` and deserialize its `[key]` table.
///
/// `Ok(None)` means the file parsed but has no such section.
fn load_section_from_file<T: DeserializeOwned>(
    path: &Path,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

    let mut table: toml::Table = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;

    let Some(section) = table.remove(key) else {
        return Ok(None);
    };

    section
        .try_into()
        .map(Some)
        .map_err(|e: toml::de::Error| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
}

/// A configuration stored as one section of `trx-aprs.toml`.
pub trait ConfigFile: Sized + Default + DeserializeOwned {
    /// Section key, e.g. `"trx-aprs-tool"`.
    fn section_key() -> &'static str;

    /// Load the section from `path`; a missing section is an error.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        load_section_from_file::<Self>(path, Self::section_key())?.ok_or_else(|| {
            ConfigError::ParseError(
                path.to_path_buf(),
                format!("missing [{}] section", Self::section_key()),
            )
        })
    }

    /// Load the first default-path file that carries the section.
    ///
    /// Falls back to `Default::default()` with no path when nothing is found.
    fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in config_search_paths() {
            if !path.exists() {
                continue;
            }
            if let Some(cfg) = load_section_from_file::<Self>(&path, Self::section_key())? {
                return Ok((cfg, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct SampleConfig {
        pretty: bool,
        kind: Option<String>,
    }

    impl ConfigFile for SampleConfig {
        fn section_key() -> &'static str {
            "sample"
        }
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_section() {
        let file = write_config("[other]\nx = 1\n\n[sample]\npretty = true\n");
        let cfg = SampleConfig::load_from_file(file.path()).unwrap();
        assert!(cfg.pretty);
        assert_eq!(cfg.kind, None);
    }

    #[test]
    fn test_missing_section() {
        let file = write_config("[other]\nx = 1\n");
        let err = SampleConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("missing [sample] section"));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[sample\n");
        assert!(matches!(
            SampleConfig::load_from_file(file.path()),
            Err(ConfigError::ParseError(_, _))
        ));
    }

    #[test]
    fn test_search_paths() {
        let paths = config_search_paths();
        assert!(paths.contains(&PathBuf::from("trx-aprs.toml")));
        assert_eq!(
            paths.last(),
            Some(&PathBuf::from("/etc/trx-aprs/trx-aprs.toml"))
        );
    }

    #[test]
    fn test_unreadable_file() {
        let err = SampleConfig::load_from_file(Path::new("/nonexistent/trx-aprs.toml"));
        assert!(matches!(err, Err(ConfigError::ReadError(_, _))));
    }
}
