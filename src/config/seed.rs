//! Seed configuration loading from config.toml
//!
//! A fresh database starts empty. The optional `config.toml` lists the service
//! types to create on first run and the initial payout frequency.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Service types to seed
    #[serde(default)]
    pub service_types: Vec<ServiceTypeConfig>,
    /// Initial payout frequency in months
    pub payment_frequency_months: Option<i32>,
}

/// Configuration for a single service type
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceTypeConfig {
    /// Name of the service
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Liability, `"company"` or `"owner"`
    pub paid_by: String,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads ./config.toml, falling back to an empty seed when the file does not exist.
pub fn load_default_config() -> Result<SeedConfig> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, starting without seed data.");
        return Ok(SeedConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_seed_config() {
        let toml_str = r#"
            payment_frequency_months = 2

            [[service_types]]
            name = "Cleaning"
            paid_by = "company"

            [[service_types]]
            name = "Plumbing"
            description = "Repairs billed to the owner"
            paid_by = "owner"
        "#;

        let config: SeedConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.payment_frequency_months, Some(2));
        assert_eq!(config.service_types.len(), 2);
        assert_eq!(config.service_types[0].name, "Cleaning");
        assert!(config.service_types[0].description.is_none());
        assert_eq!(config.service_types[1].paid_by, "owner");
    }

    #[test]
    fn test_parse_empty_seed_config() {
        let config: SeedConfig = toml::from_str("").unwrap();
        assert!(config.service_types.is_empty());
        assert!(config.payment_frequency_months.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
