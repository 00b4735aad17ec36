//! Run configuration.
//!
//! Values come from environment-style key/value pairs and can then be
//! overridden from the command line. Blank values count as unset.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use feed_model::{FeedConstants, FeedOptions, PricingOptions, ZeroPricePolicy};
use thiserror::Error;

/// Placeholder printed instead of secrets.
pub const REDACTED_VALUE: &str = "[REDACTED]";

pub const TARGET_CURRENCY: &str = "FEED_TARGET_CURRENCY";
pub const BASE_CURRENCY: &str = "FEED_BASE_CURRENCY";
pub const EXCHANGE_RATE: &str = "FEED_EXCHANGE_RATE";
pub const MARKET_SUFFIX: &str = "FEED_MARKET_SUFFIX";
pub const ZERO_PRICE_POLICY: &str = "FEED_ZERO_PRICE_POLICY";
pub const OUTPUT_DIR: &str = "LOCAL_OUTPUT_DIRECTORY";
pub const STAGING_DIR: &str = "FTP_DOWNLOAD_DIR";
pub const FTP_SERVER: &str = "FTP_SERVER";
pub const FTP_PORT: &str = "FTP_PORT";
pub const FTP_USERNAME: &str = "FTP_USERNAME";
pub const FTP_PASSWORD: &str = "FTP_PASSWORD";
pub const SOURCE_DIR: &str = "FEED_SOURCE_DIR";
pub const BUCKET_NAME: &str = "BUCKET_NAME";
pub const BUCKET_FOLDER: &str = "BUCKET_FOLDER";
pub const SINK_DIR: &str = "FEED_SINK_DIR";

const DEFAULT_OUTPUT_DIR: &str = "/tmp/output";
const DEFAULT_STAGING_DIR: &str = "/tmp/ftp";
const DEFAULT_FTP_PORT: u16 = 21;

/// Invalid configuration value. Always names the offending key or flag.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key}: {value:?} is not a number")]
    InvalidNumber { key: String, value: String },

    #[error("{key}: exchange rate must be finite and greater than zero, got {value}")]
    InvalidExchangeRate { key: String, value: f64 },

    #[error("{key}: {value:?} is not a currency code")]
    InvalidCurrency { key: String, value: String },

    #[error("{key}: expected `emit` or `drop`, got {value:?}")]
    InvalidZeroPricePolicy { key: String, value: String },

    #[error("{key}: {value:?} is not a valid port")]
    InvalidPort { key: String, value: String },
}

/// Credentials for the remote drop folder.
#[derive(Clone, PartialEq, Eq)]
pub struct FtpCredentials {
    pub server: String,
    pub port: u16,
    pub username: String,
    password: String,
}

impl FtpCredentials {
    pub fn new(
        server: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for FtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpCredentials")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &REDACTED_VALUE)
            .finish()
    }
}

/// Bucket and folder that published files land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketTarget {
    pub name: String,
    pub folder: String,
}

impl BucketTarget {
    /// Object name for `file_name`: `<folder>/<file_name>`, without a doubled slash.
    pub fn destination(&self, file_name: &str) -> String {
        format!("{}/{}", self.folder.trim_end_matches('/'), file_name)
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub options: FeedOptions,
    pub output_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub ftp: Option<FtpCredentials>,
    /// Local mirror of the remote drop folder.
    pub source_dir: Option<PathBuf>,
    /// Unset when either the bucket name or folder is missing.
    pub bucket: Option<BucketTarget>,
    /// Root directory standing in for the object store.
    pub sink_dir: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            options: FeedOptions::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
            ftp: None,
            source_dir: None,
            bucket: None,
            sink_dir: None,
        }
    }
}

impl FeedConfig {
    /// Builds a configuration from key/value pairs such as `std::env::vars()`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let get = |key: &str| lookup(&vars, key);

        let defaults = PricingOptions::default();
        let base_currency = match get(BASE_CURRENCY) {
            Some(value) => parse_currency(BASE_CURRENCY, value)?,
            None => defaults.base_currency,
        };
        let target_currency = match get(TARGET_CURRENCY) {
            Some(value) => parse_currency(TARGET_CURRENCY, value)?,
            None => defaults.target_currency,
        };
        let exchange_rate = match get(EXCHANGE_RATE) {
            Some(value) => parse_exchange_rate(EXCHANGE_RATE, value)?,
            None => defaults.exchange_rate,
        };

        let mut constants = FeedConstants::default();
        if let Some(suffix) = get(MARKET_SUFFIX) {
            constants.market_suffix = suffix.to_string();
        }
        let zero_price = match get(ZERO_PRICE_POLICY) {
            Some(value) => parse_zero_price_policy(ZERO_PRICE_POLICY, value)?,
            None => ZeroPricePolicy::default(),
        };

        let ftp = match get(FTP_SERVER) {
            Some(server) => {
                let port = match get(FTP_PORT) {
                    Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                        key: FTP_PORT.to_string(),
                        value: value.to_string(),
                    })?,
                    None => DEFAULT_FTP_PORT,
                };
                Some(FtpCredentials::new(
                    server,
                    port,
                    get(FTP_USERNAME).unwrap_or_default(),
                    get(FTP_PASSWORD).unwrap_or_default(),
                ))
            }
            None => None,
        };

        let bucket = match (get(BUCKET_NAME), get(BUCKET_FOLDER)) {
            (Some(name), Some(folder)) => Some(BucketTarget {
                name: name.to_string(),
                folder: folder.to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            options: FeedOptions::new(PricingOptions::new(
                base_currency,
                target_currency,
                exchange_rate,
            ))
            .with_constants(constants)
            .with_zero_price(zero_price),
            output_dir: PathBuf::from(get(OUTPUT_DIR).unwrap_or(DEFAULT_OUTPUT_DIR)),
            staging_dir: PathBuf::from(get(STAGING_DIR).unwrap_or(DEFAULT_STAGING_DIR)),
            ftp,
            source_dir: get(SOURCE_DIR).map(PathBuf::from),
            bucket,
            sink_dir: get(SINK_DIR).map(PathBuf::from),
        })
    }

    /// Builds a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Replaces the target currency; `key` names the setting in errors.
    pub fn set_target_currency(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.options.pricing.target_currency = parse_currency(key, value)?;
        Ok(())
    }

    /// Replaces the exchange rate; `key` names the setting in errors.
    pub fn set_exchange_rate(&mut self, key: &str, rate: f64) -> Result<(), ConfigError> {
        self.options.pricing.exchange_rate = validate_exchange_rate(key, rate)?;
        Ok(())
    }

    /// Settings as printable key/value pairs, secrets redacted.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let pricing = &self.options.pricing;
        let unset = || "-".to_string();
        let ftp = self.ftp.as_ref();
        vec![
            (BASE_CURRENCY, pricing.base_currency.clone()),
            (TARGET_CURRENCY, pricing.target_currency.clone()),
            (EXCHANGE_RATE, pricing.exchange_rate.to_string()),
            (MARKET_SUFFIX, self.options.constants.market_suffix.clone()),
            (
                ZERO_PRICE_POLICY,
                zero_price_policy_name(self.options.zero_price).to_string(),
            ),
            (OUTPUT_DIR, self.output_dir.display().to_string()),
            (STAGING_DIR, self.staging_dir.display().to_string()),
            (FTP_SERVER, ftp.map_or_else(unset, |c| c.server.clone())),
            (FTP_PORT, ftp.map_or_else(unset, |c| c.port.to_string())),
            (FTP_USERNAME, ftp.map_or_else(unset, |c| c.username.clone())),
            (
                FTP_PASSWORD,
                ftp.filter(|c| !c.password().is_empty())
                    .map_or_else(unset, |_| REDACTED_VALUE.to_string()),
            ),
            (
                SOURCE_DIR,
                self.source_dir
                    .as_ref()
                    .map_or_else(unset, |p| p.display().to_string()),
            ),
            (
                BUCKET_NAME,
                self.bucket.as_ref().map_or_else(unset, |b| b.name.clone()),
            ),
            (
                BUCKET_FOLDER,
                self.bucket.as_ref().map_or_else(unset, |b| b.folder.clone()),
            ),
            (
                SINK_DIR,
                self.sink_dir
                    .as_ref()
                    .map_or_else(unset, |p| p.display().to_string()),
            ),
        ]
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_currency(key: &str, value: &str) -> Result<String, ConfigError> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ConfigError::InvalidCurrency {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn parse_exchange_rate(key: &str, value: &str) -> Result<f64, ConfigError> {
    let rate = value
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })?;
    validate_exchange_rate(key, rate)
}

fn validate_exchange_rate(key: &str, rate: f64) -> Result<f64, ConfigError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidExchangeRate {
            key: key.to_string(),
            value: rate,
        })
    }
}

fn parse_zero_price_policy(key: &str, value: &str) -> Result<ZeroPricePolicy, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "emit" => Ok(ZeroPricePolicy::Emit),
        "drop" => Ok(ZeroPricePolicy::Drop),
        _ => Err(ConfigError::InvalidZeroPricePolicy {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn zero_price_policy_name(policy: ZeroPricePolicy) -> &'static str {
    match policy {
        ZeroPricePolicy::Emit => "emit",
        ZeroPricePolicy::Drop => "drop",
    }
}
