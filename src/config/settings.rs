//! User settings for Moneta
//!
//! Manages client preferences: which API to talk to, request timeouts and
//! how amounts and reports are presented.

use serde::{Deserialize, Serialize};

use super::paths::MonetaPaths;
use crate::error::MonetaError;

/// User settings for Moneta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the Moneta API, including the `/api` prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many categories the top-categories report shows
    #[serde(default = "default_top_categories_limit")]
    pub top_categories_limit: usize,

    /// How many months the spending-trends report covers
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// Page size for expense listings
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_top_categories_limit() -> usize {
    5
}

fn default_trend_months() -> u32 {
    6
}

fn default_page_size() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            top_categories_limit: default_top_categories_limit(),
            trend_months: default_trend_months(),
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MonetaPaths) -> Result<Self, MonetaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| MonetaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MonetaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MonetaPaths) -> Result<(), MonetaError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| MonetaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| MonetaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Update a single setting by key, validating the new value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), MonetaError> {
        let invalid = |what: &str| MonetaError::Validation(format!("Invalid {}: {}", what, value));

        match key {
            "api_base_url" | "api-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("API URL (expected http:// or https://)"));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "request_timeout_secs" | "timeout" => {
                self.request_timeout_secs = value.parse().map_err(|_| invalid("timeout"))?;
            }
            "currency_symbol" | "currency" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "top_categories_limit" | "top-limit" => {
                self.top_categories_limit = value.parse().map_err(|_| invalid("limit"))?;
            }
            "trend_months" => {
                self.trend_months = value.parse().map_err(|_| invalid("month count"))?;
            }
            "page_size" => {
                self.page_size = value.parse().map_err(|_| invalid("page size"))?;
            }
            _ => {
                return Err(MonetaError::Config(format!("Unknown setting: {}", key)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8080/api");
        assert_eq!(settings.top_categories_limit, 5);
        assert_eq!(settings.trend_months, 6);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonetaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.api_base_url = "https://moneta.example.com/api".into();
        settings.trend_months = 12;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.api_base_url, "https://moneta.example.com/api");
        assert_eq!(loaded.trend_months, 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"$"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.page_size, 10);
    }

    #[test]
    fn test_set_validates() {
        let mut settings = Settings::default();
        settings.set("api-url", "https://x.test/api/").unwrap();
        assert_eq!(settings.api_base_url, "https://x.test/api");

        assert!(settings.set("api-url", "ftp://x").is_err());
        assert!(settings.set("timeout", "soon").is_err());
        assert!(settings.set("colour", "blue").is_err());
    }
}
