use crate::core::client::DEFAULT_API_BASE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
    pub format: FormatConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub timezone: Option<String>,
    pub reminder_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| CalcError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, api_base: Option<String>, timezone: Option<String>) {
        if let Some(base) = api_base {
            self.api.base_url = base;
        }
        if timezone.is_some() {
            self.calendar.timezone = timezone;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_base_url("api.base_url", &self.api.base_url)?;
        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_separators(
            "format",
            &self.format.thousands_separator,
            &self.format.decimal_separator,
        )?;

        if let Some(tz) = &self.calendar.timezone {
            validation::validate_non_empty_string("calendar.timezone", tz)?;
        }
        if let Some(minutes) = self.calendar.reminder_minutes {
            // Google Calendar caps popup reminders at four weeks.
            validation::validate_range("calendar.reminder_minutes", minutes, 0, 40_320)?;
        }
        if let Some(format) = &self.logging.format {
            format
                .parse::<crate::utils::logger::LogFormat>()
                .map_err(|reason| CalcError::InvalidConfigValue {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason,
                })?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timezone(&self) -> Option<&str> {
        self.calendar.timezone.as_deref()
    }

    fn reminder_minutes(&self) -> Option<i64> {
        self.calendar.reminder_minutes
    }

    fn thousands_separator(&self) -> &str {
        &self.format.thousands_separator
    }

    fn decimal_separator(&self) -> &str {
        &self.format.decimal_separator
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
