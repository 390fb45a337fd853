//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. `shopgate.toml` in the working directory
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the TOML file is expanded from the environment.
//! The legacy `conf.json` layout (`{"key": ..., "ebay": {"access_token": ...}}`)
//! is also accepted through [`Config::from_json_file`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default configuration file name
pub const CONFIG_FILE: &str = "shopgate.toml";

/// Telegram transport configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub token: Option<String>,
}

/// Product search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// OAuth access token for the Browse API
    pub access_token: String,

    /// Browse API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `X-EBAY-C-MARKETPLACE-ID` header
    #[serde(default = "default_marketplace_id")]
    pub marketplace_id: String,

    /// Currency requested for prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Products per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_base_url(),
            marketplace_id: default_marketplace_id(),
            currency: default_currency(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.ebay.com/buy/browse/v1".to_string()
}

fn default_marketplace_id() -> String {
    "EBAY_IT".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_page_size() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    15
}

/// Main configuration for shopgate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` references with environment values.
    ///
    /// Unknown variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file
    ///
    /// Environment variables override whatever the file sets.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let toml: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        Ok(Self::from_toml_config(toml))
    }

    /// Load configuration from the legacy `conf.json` layout
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let legacy: LegacyJsonConfig = serde_json::from_str(&content)?;

        let mut cfg = Config {
            telegram: TelegramConfig {
                token: legacy.key,
            },
            search: SearchConfig {
                access_token: legacy.ebay.access_token,
                ..SearchConfig::default()
            },
        };
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Load configuration from the default locations
    ///
    /// Looks for `./shopgate.toml`, then `./conf.json`, and falls back to
    /// environment variables only.
    pub fn load() -> Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        if Path::new("conf.json").exists() {
            return Self::from_json_file("conf.json");
        }

        Self::from_env()
    }

    fn from_toml_config(toml: TomlConfig) -> Self {
        let telegram = toml.telegram.unwrap_or_default();
        let search = toml.search.unwrap_or_default();

        Config {
            telegram: TelegramConfig {
                token: telegram.token.filter(|t| !t.is_empty()),
            },
            search: SearchConfig {
                access_token: search.access_token.unwrap_or_default(),
                base_url: search.base_url.unwrap_or_else(default_base_url),
                marketplace_id: search.marketplace_id.unwrap_or_else(default_marketplace_id),
                currency: search.currency.unwrap_or_else(default_currency),
                page_size: search.page_size.unwrap_or_else(default_page_size),
                timeout_secs: search.timeout_secs.unwrap_or_else(default_timeout_secs),
            },
        }
    }

    /// Override settings from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                self.telegram.token = Some(token);
            }
        }

        if let Ok(token) = std::env::var("EBAY_ACCESS_TOKEN") {
            if !token.is_empty() {
                self.search.access_token = token;
            }
        }
        if let Ok(url) = std::env::var("EBAY_BASE_URL") {
            if !url.is_empty() {
                self.search.base_url = url;
            }
        }
        if let Ok(marketplace) = std::env::var("EBAY_MARKETPLACE_ID") {
            if !marketplace.is_empty() {
                self.search.marketplace_id = marketplace;
            }
        }
        if let Ok(currency) = std::env::var("EBAY_CURRENCY") {
            if !currency.is_empty() {
                self.search.currency = currency;
            }
        }
        if let Ok(size) = std::env::var("SEARCH_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.search.page_size = n;
            }
        }
        if let Ok(secs) = std::env::var("SEARCH_TIMEOUT_SECS") {
            if let Ok(n) = secs.parse() {
                self.search.timeout_secs = n;
            }
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("EBAY_ACCESS_TOKEN")
            .map_err(|_| Error::Config("EBAY_ACCESS_TOKEN not set".to_string()))?;

        let mut cfg = Config {
            telegram: TelegramConfig::default(),
            search: SearchConfig {
                access_token,
                ..SearchConfig::default()
            },
        };
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.search.access_token.trim().is_empty() {
            return Err(Error::Config("search access token is empty".to_string()));
        }
        if self.search.page_size == 0 {
            return Err(Error::Config("page size must be at least 1".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// File layouts
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    telegram: Option<TomlTelegramConfig>,
    search: Option<TomlSearchConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlTelegramConfig {
    token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlSearchConfig {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    marketplace_id: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    page_size: Option<usize>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct LegacyJsonConfig {
    key: Option<String>,
    ebay: LegacyEbayConfig,
}

#[derive(Debug, Deserialize)]
struct LegacyEbayConfig {
    access_token: String,
}
