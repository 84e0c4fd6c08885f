pub mod toml_config;

use crate::core::database::DATABASE_FILE;
#[cfg(feature = "cli")]
use crate::utils::error::FleetError;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fleet-manager")]
#[command(about = "Interactive expense ledger for a small fleet of boats")]
pub struct CliConfig {
    /// Text file to import instead of resuming from the database
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: Option<String>,

    #[arg(hide = true)]
    pub ignored: Vec<String>,

    #[arg(long, help = "Fleet database path [default: FleetData.db]")]
    pub database: Option<String>,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging flags, settings file and defaults, in
/// that order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub import_path: Option<String>,
    pub database_path: String,
    pub log_level: Option<String>,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(
        import_path: Option<String>,
        database_flag: Option<String>,
        verbose: bool,
        file: Option<&TomlConfig>,
    ) -> Self {
        let database_path = database_flag
            .or_else(|| file.and_then(|f| f.database_path().map(str::to_string)))
            .unwrap_or_else(|| DATABASE_FILE.to_string());
        let log_level = file.and_then(|f| f.log_level().map(str::to_string));

        Self {
            import_path,
            database_path,
            log_level,
            verbose,
        }
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: CliConfig) -> Result<Self> {
        let file = match cli.config.as_deref() {
            Some(path) => {
                let file = TomlConfig::from_file(path).map_err(|e| FleetError::ConfigError {
                    message: format!("cannot load settings file {}: {}", path, e),
                })?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        Ok(Self::resolve(
            cli.csv_file,
            cli.database,
            cli.verbose,
            file.as_ref(),
        ))
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("database_path", &self.database_path)?;
        Ok(())
    }
}
