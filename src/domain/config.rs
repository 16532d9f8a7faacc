use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// How a `Divorce` relationship is written when exporting to GEDCOM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DivorcePolicy {
    /// Open a separate top-level family with a fixed `DIV` date and place,
    /// matching files produced by earlier exporters.
    #[default]
    Legacy,
    /// Append the divorce to the family already written for the same couple,
    /// or open a new family at the usual depth when there is none.
    AttachToCouple,
}

/// Settings for importing and exporting GEDCOM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// How divorces are exported.
    pub divorce_policy: DivorcePolicy,

    /// Whether a record without an identifier aborts an import.
    ///
    /// When `false` such records are skipped and reported.
    pub strict: bool,
}

/// Error loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),

    /// The file is not a valid configuration.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be encoded.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
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

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        divorce_policy: DivorcePolicy,

        #[serde(default)]
        strict: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                divorce_policy,
                strict,
            } => Self {
                divorce_policy,
                strict,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            divorce_policy: config.divorce_policy,
            strict: config.strict,
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
        file.write_all(b"_version = \"1\"\ndivorce_policy = \"attach-to-couple\"\nstrict = true\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.divorce_policy, DivorcePolicy::AttachToCouple);
        assert!(config.strict);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read(_)));
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndivorce_policy = \"sometimes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_version_is_rejected() {
        assert!(toml::from_str::<Config>("strict = true").is_err());
    }

    #[test]
    fn empty_file_returns_default() {
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, Config::default());
        assert_eq!(actual.divorce_policy, DivorcePolicy::Legacy);
        assert!(!actual.strict);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("kinship.toml");
        let config = Config {
            divorce_policy: DivorcePolicy::AttachToCouple,
            strict: true,
        };

        config.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("_version = \"1\""));
        assert!(written.contains("divorce_policy = \"attach-to-couple\""));

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
