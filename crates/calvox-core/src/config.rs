use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Google OAuth settings
    #[serde(default)]
    pub google: GoogleConfig,

    /// Calendar skill settings
    #[serde(default)]
    pub skill: SkillSettings,
}

/// Google OAuth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Google OAuth App Client ID
    /// Create at: https://console.cloud.google.com/apis/credentials
    pub client_id: String,
    /// Google OAuth App Client Secret
    pub client_secret: String,
}

impl GoogleConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.client_id.starts_with("YOUR_")
            && !self.client_secret.starts_with("YOUR_")
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: "YOUR_GOOGLE_CLIENT_ID".to_string(),
            client_secret: "YOUR_GOOGLE_CLIENT_SECRET".to_string(),
        }
    }
}

/// User-facing settings of the calendar skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSettings {
    /// Display names of the calendars to read events from
    #[serde(default)]
    pub enabled_calendars: Vec<String>,

    /// Read events from every calendar on the account, ignoring
    /// `enabled_calendars`
    #[serde(default)]
    pub enable_all_calendars: bool,

    /// Speak times on a 24-hour clock instead of a.m./p.m.
    #[serde(default)]
    pub use_24_hour_clock: bool,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            enabled_calendars: Vec::new(),
            enable_all_calendars: false,
            use_24_hour_clock: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calvox");

        Self {
            config_dir,
            google: GoogleConfig::default(),
            skill: SkillSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Client id and secret come as a pair
        let id_set = !self.google.client_id.is_empty() && !self.google.client_id.starts_with("YOUR_");
        let secret_set =
            !self.google.client_secret.is_empty() && !self.google.client_secret.starts_with("YOUR_");
        if id_set != secret_set {
            result.add_error(
                "google",
                "client_id and client_secret must be configured together",
            );
        } else if !self.google.is_configured() {
            result.add_warning(
                "google",
                "Google OAuth not configured - the skill cannot reach your calendar",
            );
        }

        if self.skill.enabled_calendars.is_empty() && !self.skill.enable_all_calendars {
            result.add_warning(
                "skill.enabled_calendars",
                "No calendars enabled - falling back to the primary calendar",
            );
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("calvox");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_google_not_configured_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "google"));
    }

    #[test]
    fn test_partial_google_credentials_is_error() {
        let mut config = Config::default();
        config.google.client_id = "123456.apps.googleusercontent.com".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "google"));
    }

    #[test]
    fn test_no_enabled_calendars_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "skill.enabled_calendars"));
    }

    #[test]
    fn test_enable_all_silences_calendar_warning() {
        let mut config = Config::default();
        config.skill.enable_all_calendars = true;
        let result = config.validate();
        assert!(!result
            .warnings
            .iter()
            .any(|w| w.field == "skill.enabled_calendars"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.skill.enabled_calendars = vec!["Work".to_string(), "Family".to_string()];
        config.skill.use_24_hour_clock = true;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.skill.enabled_calendars, config.skill.enabled_calendars);
        assert!(parsed.skill.use_24_hour_clock);
        assert!(!parsed.skill.enable_all_calendars);
    }
}
