use std::path::{Path, PathBuf};

mod check;
mod export;
mod import;
mod terminal;

use anyhow::Context;
use check::Check;
use clap::ArgAction;
use export::Export;
use import::Import;
use kinship::Config;
use tracing::{debug, instrument};

/// Configuration file read from the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG_FILE: &str = "kinship.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to ./kinship.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        self.command.run(&config)
    }

    /// Logs go to stderr so that `--stdout` output stays machine-readable.
    /// `RUST_LOG` takes precedence over `-v`.
    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(log_level(verbosity).into())
            .from_env_lossy();

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

const fn log_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Convert GEDCOM files to interchange JSON
    ///
    /// Directories are searched recursively for `.ged` files.
    Import(Import),

    /// Convert an interchange JSON document to GEDCOM
    Export(Export),

    /// Report malformed lines and unusable records in a GEDCOM file
    Check(Check),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Import(command) => command.run(config)?,
            Self::Export(command) => command.run(config)?,
            Self::Check(command) => command.run()?,
        }
        Ok(())
    }
}

/// Reads the explicit configuration file, or `kinship.toml` in the working
/// directory if one exists, or falls back to the defaults.
#[instrument(level = "debug")]
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        debug!(path = %default_path.display(), "using configuration from working directory");
        return Config::load(default_path).with_context(|| {
            format!("Failed to load configuration from {}", default_path.display())
        });
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use kinship::DivorcePolicy;

    use super::*;

    #[test]
    fn explicit_config_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndivorce_policy = \"attach-to-couple\"\n")
            .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.divorce_policy, DivorcePolicy::AttachToCouple);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("Failed to load configuration from")
        );
    }

    #[test_case::test_case(0 => tracing::Level::WARN)]
    #[test_case::test_case(1 => tracing::Level::INFO)]
    #[test_case::test_case(2 => tracing::Level::DEBUG)]
    #[test_case::test_case(3 => tracing::Level::TRACE)]
    #[test_case::test_case(9 => tracing::Level::TRACE)]
    fn verbosity_levels(verbosity: u8) -> tracing::Level {
        log_level(verbosity)
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["kinship", "-vv", "import", "a.ged", "dir", "--stdout"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Import(_)));

        let cli = Cli::try_parse_from([
            "kinship",
            "export",
            "tree.json",
            "--now",
            "2025-01-01T12:34:56Z",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Export(_)));

        assert!(Cli::try_parse_from(["kinship", "import"]).is_err());
        assert!(Cli::try_parse_from(["kinship"]).is_err());
    }
}
