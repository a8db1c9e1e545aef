#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;

/// File settings (or defaults) with command-line overrides applied.
#[cfg(feature = "cli")]
pub fn load_effective(cli: &CliConfig) -> Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    config.apply_overrides(cli.api_base.clone(), cli.timezone.clone());
    if cli.verbose {
        config.logging.verbose = true;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = Some(match format {
            LogFormat::Compact => "compact".to_string(),
            LogFormat::Json => "json".to_string(),
        });
    }
    Ok(config)
}

impl TomlConfig {
    pub fn log_format(&self) -> LogFormat {
        self.logging
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }
}
