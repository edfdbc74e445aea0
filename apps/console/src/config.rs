//! # Console Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`DREAMS_*`)
//! 2. Config file (`--config <path>` or `DREAMS_CONFIG`, read by the
//!    argument parser, else `dreams.toml` in the platform config directory)
//! 3. Defaults (this file)
//!
//! ## Example File
//! ```toml
//! store_name = "Dreams Centro"
//! currency_symbol = "$"
//! default_tax_rate_bps = 1600
//! seed_demo_data = false
//! log_filter = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dreams_core::validation::validate_tax_rate_bps;
use dreams_core::{Money, TaxRate, DEFAULT_TAX_RATE};
use dreams_store::format_money;

use crate::error::{ConsoleError, ConsoleResult};

pub const CONFIG_FILE_NAME: &str = "dreams.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Printed in the menu header
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Tax rate for new sales in basis points, e.g. 1600 = 16%
    pub default_tax_rate_bps: u32,

    /// Load the demo catalog on startup
    pub seed_demo_data: bool,

    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            store_name: "Dreams POS".to_string(),
            currency_symbol: "$".to_string(),
            default_tax_rate_bps: DEFAULT_TAX_RATE.bps(),
            seed_demo_data: true,
            log_filter: "warn,dreams=info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from the file chain and the process environment.
    ///
    /// An explicit path must exist; the platform default is only read when
    /// present.
    pub fn load(explicit: Option<&Path>) -> ConsoleResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    ConsoleConfig::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConsoleResult<Self> {
        debug!(path = %path.display(), "Reading config file");
        let text = fs::read_to_string(path).map_err(|e| {
            ConsoleError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> ConsoleResult<Self> {
        let config: ConsoleConfig = toml::from_str(text)?;
        config.tax_rate()?;
        Ok(config)
    }

    /// `<platform config dir>/dreams.toml`, e.g. `~/.config/dreams-pos/dreams.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dreams", "dreams-pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies `DREAMS_*` overrides read through `var`.
    ///
    /// ## Environment Variables
    /// - `DREAMS_STORE_NAME`: store name
    /// - `DREAMS_TAX_RATE`: percentage, e.g. `"16"` or `"8.25"`
    /// - `DREAMS_SEED_DEMO`: `true`/`false` (also `1`/`0`, `yes`/`no`)
    /// - `DREAMS_LOG`: log filter
    pub fn apply_env<F>(&mut self, var: F) -> ConsoleResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("DREAMS_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(rate) = var("DREAMS_TAX_RATE") {
            self.default_tax_rate_bps = TaxRate::from_percentage_str(&rate)
                .map_err(|e| ConsoleError::config(format!("DREAMS_TAX_RATE: {}", e)))?
                .bps();
        }

        if let Some(flag) = var("DREAMS_SEED_DEMO") {
            self.seed_demo_data = parse_flag(&flag).ok_or_else(|| {
                ConsoleError::config(format!("DREAMS_SEED_DEMO: expected true or false, got '{}'", flag))
            })?;
        }

        if let Some(filter) = var("DREAMS_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    pub fn tax_rate(&self) -> ConsoleResult<TaxRate> {
        validate_tax_rate_bps(self.default_tax_rate_bps)
            .map_err(|e| ConsoleError::config(format!("default_tax_rate_bps: {}", e)))?;
        Ok(TaxRate::from_bps(self.default_tax_rate_bps))
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use dreams_console::config::ConsoleConfig;
    ///
    /// let config = ConsoleConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format_money(Money::from_cents(cents), &self.currency_symbol)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_currency() {
        let config = ConsoleConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(-1234), "-$12.34");
        assert_eq!(config.format_currency(123456789), "$1234567.89");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConsoleConfig::from_toml_str("store_name = \"Dreams Centro\"\n").unwrap();
        assert_eq!(config.store_name, "Dreams Centro");
        assert_eq!(config.default_tax_rate_bps, 1600);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_bad_files_are_config_errors() {
        let err = ConsoleConfig::from_toml_str("default_tax_rate_bps = 20000").unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);

        let err = ConsoleConfig::from_toml_str("store_name = ").unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);

        let err = ConsoleConfig::from_toml_str("receipt_printer = \"usb0\"").unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ConsoleConfig::from_toml_str("store_name = \"Archivo\"").unwrap();
        config
            .apply_env(env(&[
                ("DREAMS_STORE_NAME", "Entorno"),
                ("DREAMS_TAX_RATE", "8.25"),
                ("DREAMS_SEED_DEMO", "no"),
                ("DREAMS_LOG", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.store_name, "Entorno");
        assert_eq!(config.tax_rate().unwrap().bps(), 825);
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = ConsoleConfig::default();
        let err = config.apply_env(env(&[("DREAMS_TAX_RATE", "-3")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);

        let err = config.apply_env(env(&[("DREAMS_SEED_DEMO", "maybe")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency_symbol = \"MX$\"").unwrap();
        writeln!(file, "seed_demo_data = false").unwrap();

        let config = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.format_currency(50), "MX$0.50");
        assert!(!config.seed_demo_data);

        let missing = file.path().with_extension("missing");
        assert_eq!(
            ConsoleConfig::from_file(&missing).unwrap_err().code,
            ErrorCode::Config
        );
    }
}
