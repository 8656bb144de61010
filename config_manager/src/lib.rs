use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Environment variable conventionally holding the BirdEye API key.
pub const BIRDEYE_TOKEN_ENV: &str = "BIRD_EYE_TOKEN";

/// Wrapped SOL mint, the default reference currency for pool selection.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// BirdEye API configuration (multi-price and token overview)
    pub birdeye: BirdEyeConfig,

    /// DexScreener API configuration (bulk token lookups and pairs)
    pub dexscreener: DexScreenerConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct BirdEyeConfig {
    /// BirdEye API key, sent as `X-API-KEY`
    pub api_key: String,

    /// BirdEye API base URL
    pub api_base_url: String,

    /// Chain sent in the `x-chain` header
    pub chain: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerConfig {
    /// DexScreener API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Quote token a pool must trade against to be picked as the best pool
    pub reference_mint: String,
}

impl Default for BirdEyeConfig {
    fn default() -> Self {
        Self {
            api_key: "".to_string(), // Must be set in .env, config file or BIRD_EYE_TOKEN
            api_base_url: "https://public-api.birdeye.so".to_string(),
            chain: "solana".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl std::fmt::Debug for BirdEyeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.has_api_key() { "***" } else { "<unset>" };
        f.debug_struct("BirdEyeConfig")
            .field("api_key", &api_key)
            .field("api_base_url", &self.api_base_url)
            .field("chain", &self.chain)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.dexscreener.com".to_string(),
            request_timeout_seconds: 30,
            reference_mint: SOL_MINT.to_string(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            birdeye: BirdEyeConfig::default(),
            dexscreener: DexScreenerConfig::default(),
        }
    }
}

impl BirdEyeConfig {
    /// Validate BirdEye configuration.
    ///
    /// A missing API key is not rejected here: requests without it are
    /// refused by the API and surface as invalid tokens.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "BirdEye base URL cannot be empty".to_string(),
            ));
        }

        if self.chain.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "BirdEye chain cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl DexScreenerConfig {
    /// Validate DexScreener configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "DexScreener base URL cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.reference_mint.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "DexScreener reference mint cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl SystemConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        // Load .env file if present, ignore errors
        dotenv::dotenv().ok();

        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&SystemConfig::default())?);

        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        config_builder = config_builder
            .add_source(
                Environment::with_prefix("PRICE_FEEDS")
                    .try_parsing(true)
                    .separator("__"),
            )
            .set_override_option("birdeye.api_key", std::env::var(BIRDEYE_TOKEN_ENV).ok())?;

        let system_config: SystemConfig = config_builder.build()?.try_deserialize()?;

        if !system_config.birdeye.has_api_key() {
            warn!(
                "BirdEye API key is not set ({} or PRICE_FEEDS__BIRDEYE__API_KEY); BirdEye requests will be rejected",
                BIRDEYE_TOKEN_ENV
            );
        }

        system_config.validate()?;

        Ok(system_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.birdeye.validate()?;
        self.dexscreener.validate()?;
        Ok(())
    }

    /// Get configuration as a JSON value with the API key redacted
    pub fn to_redacted_json(&self) -> serde_json::Value {
        let mut redacted = self.clone();
        if redacted.birdeye.has_api_key() {
            redacted.birdeye.api_key = "***".to_string();
        }
        serde_json::to_value(redacted).unwrap_or(serde_json::Value::Null)
    }
}
