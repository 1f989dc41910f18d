//! Centralized error types for the Nimbus client core.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Nimbus pipeline should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Location(e) => e.user_message().to_string(),
            AppError::Weather(e) => e.user_message(),
            AppError::Search(e) => e.user_message(),
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Location resolution errors.
///
/// Permission-related variants carry a remediation path: the UI can offer
/// to open system or browser settings (`needs_settings()`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission was denied")]
    PermissionDenied,

    #[error("Location requires a secure context")]
    InsecureContext,

    #[error("No recent location fix available")]
    StaleOrUnavailable,

    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Permission to access location was denied. Allow location access in settings."
            }
            LocationError::InsecureContext => {
                "Location on web requires a secure context. Use localhost or HTTPS."
            }
            LocationError::StaleOrUnavailable => {
                "Could not get a recent location. Please try again."
            }
            LocationError::Other(_) => "Failed to get location. Please try again.",
        }
    }

    /// True when the fix is to change a permission, so the UI should offer
    /// an open-settings action alongside the message.
    pub fn needs_settings(&self) -> bool {
        matches!(
            self,
            LocationError::PermissionDenied | LocationError::InsecureContext
        )
    }
}

/// Weather API errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Non-success HTTP status or malformed body from the weather service.
    /// The message is either the API's own `message` field or a synthesized
    /// status description, and is safe to show as-is.
    #[error("{message}")]
    Api { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// Create an API error from an arbitrary message.
    pub fn message(msg: impl Into<String>) -> Self {
        WeatherError::Api {
            message: msg.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Api { message } => message.clone(),
            WeatherError::Network(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            WeatherError::Network(_) => {
                "Unable to connect. Check your internet connection.".to_string()
            }
        }
    }
}

/// Autocomplete search errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search failed: {0}")]
    Failed(String),
}

impl SearchError {
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Failed(msg) if !msg.is_empty() => msg.clone(),
            SearchError::Failed(_) => "Search failed. Please try again.".to_string(),
        }
    }
}

impl From<WeatherError> for SearchError {
    fn from(err: WeatherError) -> Self {
        SearchError::Failed(err.user_message())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
