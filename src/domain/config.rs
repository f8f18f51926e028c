use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// The file name looked up in the working directory when no configuration
/// path is given.
pub const CONFIG_FILE_NAME: &str = ".prontuario.toml";

/// Configuration for note analysis.
///
/// These settings control the save-time composition of parser and
/// interpreter output. The parser and interpreter themselves take no
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Which lines of a note may adjust the medication list.
    pub adjustment_scope: AdjustmentScope,

    /// Whether medications declared without a date start on the save date.
    ///
    /// When `false`, undated medications are recorded without a start date.
    pub date_undated_medications: bool,
}

/// Where medication adjustment lines (`+`, `-`, `!`, `++`, `--`) are honoured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjustmentScope {
    /// Only inside an open `[CONDUTA]` section.
    #[default]
    CondutaSection,
    /// Anywhere after the first `[CONDUTA]` header, whichever section is open.
    AfterCondutaHeader,
    /// On any line of the note.
    Anywhere,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adjustment_scope: AdjustmentScope::default(),
            date_undated_medications: default_date_undated_medications(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration from `path` if given, otherwise from
    /// [`CONFIG_FILE_NAME`] in `dir` if that file exists, otherwise returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be loaded.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading configuration");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] io::Error),
    /// The configuration file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] io::Error),
    /// The configuration file is not valid TOML for this configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

const fn default_date_undated_medications() -> bool {
    true
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        adjustment_scope: AdjustmentScope,

        #[serde(default = "default_date_undated_medications")]
        date_undated_medications: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                adjustment_scope,
                date_undated_medications,
            } => Self {
                adjustment_scope,
                date_undated_medications,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            adjustment_scope: config.adjustment_scope,
            date_undated_medications: config.date_undated_medications,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nadjustment_scope = \"after-conduta-header\"\ndate_undated_medications = false\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.adjustment_scope, AdjustmentScope::AfterCondutaHeader);
        assert!(!config.date_undated_medications);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read(_)));
        assert!(error.to_string().starts_with("failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nadjustment_scope = \"everywhere\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        let config = Config {
            adjustment_scope: AdjustmentScope::Anywhere,
            date_undated_medications: false,
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn discover_prefers_explicit_path_then_directory_then_default() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(None, tmp.path()).unwrap(), Config::default());

        let in_dir = Config {
            adjustment_scope: AdjustmentScope::Anywhere,
            ..Config::default()
        };
        in_dir.save(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(Config::discover(None, tmp.path()).unwrap(), in_dir);

        let explicit_path = tmp.path().join("other.toml");
        let explicit = Config {
            date_undated_medications: false,
            ..Config::default()
        };
        explicit.save(&explicit_path).unwrap();
        assert_eq!(
            Config::discover(Some(&explicit_path), tmp.path()).unwrap(),
            explicit
        );
    }
}
