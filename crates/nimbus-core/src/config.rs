use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::Unit;

/// Default OpenWeatherMap endpoints. Overridable for tests and proxies.
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

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
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API key credential
    pub api_key: String,

    /// Base URL for current weather and forecast endpoints
    pub weather_base_url: String,

    /// Base URL for the direct geocoding endpoint
    pub geocode_base_url: String,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Autocomplete search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Location fallback settings
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Unit system preference at startup
    pub default_unit: Unit,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_unit: Unit::Metric,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum trimmed query length before a lookup is scheduled
    pub min_query_chars: usize,

    /// Quiet period between keystrokes and the autocomplete lookup
    pub debounce_ms: u64,

    /// Maximum number of city suggestions requested
    pub suggestion_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            debounce_ms: 300,
            suggestion_limit: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Oldest last-known fix the fallback will accept
    pub max_last_known_age_secs: u64,

    /// Worst last-known accuracy the fallback will accept, in meters
    pub max_last_known_accuracy_m: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            max_last_known_age_secs: 15 * 60,
            max_last_known_accuracy_m: 5000.0,
        }
    }
}

impl Config {
    /// Build a config with default endpoints and tuning for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geocode_base_url: DEFAULT_GEOCODE_BASE_URL.to_string(),
            weather: WeatherConfig::default(),
            search: SearchConfig::default(),
            location: LocationConfig::default(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// `OPENWEATHER_API_KEY` is required; `NIMBUS_WEATHER_BASE_URL` and
    /// `NIMBUS_GEOCODE_BASE_URL` override the endpoints when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| ConfigError::MissingSetting(API_KEY_ENV.to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(base) = std::env::var("NIMBUS_WEATHER_BASE_URL") {
            config.weather_base_url = base;
        }
        if let Ok(base) = std::env::var("NIMBUS_GEOCODE_BASE_URL") {
            config.geocode_base_url = base;
        }
        Ok(config)
    }

    /// Validate the configuration, collecting errors and warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.api_key.trim().is_empty() {
            result.add_error("api_key", "API key must not be empty");
        }
        if !self.weather_base_url.starts_with("http") {
            result.add_error("weather_base_url", "must be an http(s) URL");
        }
        if !self.geocode_base_url.starts_with("http") {
            result.add_error("geocode_base_url", "must be an http(s) URL");
        }
        if self.search.min_query_chars == 0 {
            result.add_warning("search.min_query_chars", "0 fires a lookup on every keystroke");
        }
        if self.search.suggestion_limit == 0 {
            result.add_error("search.suggestion_limit", "must be at least 1");
        }
        if self.location.max_last_known_accuracy_m <= 0.0 {
            result.add_error("location.max_last_known_accuracy_m", "must be positive");
        }

        result
    }
}
