//! Engine configuration.
//!
//! Settings come from a JSON file (`CONFIG_PATH`, default `config.json`),
//! fall back to built-in defaults when the file is absent, and accept a few
//! environment overrides on top.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::models::Weights;

const DEFAULT_CONFIG_PATH: &str = "config.json";
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Deployment environment from `APP_ENV` (default `sandbox`).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

/// Signal generator tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub min_confidence: f64,
    /// Informational; the momentum rule's composite cut-off is fixed at ±30.
    pub momentum_threshold: f64,
    /// Informational; the mean-reversion rule's composite cut-off is fixed at ±40.
    pub mean_reversion_threshold: f64,
    /// ATR multiple used for stop and target distances.
    pub volatility_factor: f64,
    /// Lookback requested from the market-data provider per cycle.
    pub lookback_days: u32,
    pub fetch_timeout_secs: u64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            momentum_threshold: 60.0,
            mean_reversion_threshold: 70.0,
            volatility_factor: 2.0,
            lookback_days: 365,
            fetch_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub max_position_size: f64,
    /// Heaviest sector weight before concentration is rated high.
    pub max_sector_concentration: f64,
    /// Absolute pair correlation listed as highly correlated in reports.
    pub max_correlation: f64,
    /// Annualised volatility above which the report recommends de-risking.
    pub volatility_limit: f64,
    pub risk_free_rate: f64,
    /// Volatility ceiling handed to the optimizer.
    pub risk_tolerance: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_position_size: 0.20,
            max_sector_concentration: 0.40,
            max_correlation: 0.70,
            volatility_limit: 0.25,
            risk_free_rate: 0.02,
            risk_tolerance: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub tickers: Vec<String>,
    pub weights: Weights,
    pub total_value: f64,
    pub benchmark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub signals: SignalConfig,
    pub risk: RiskConfig,
    pub portfolio: PortfolioConfig,
}

impl EngineConfig {
    /// Load from `CONFIG_PATH` and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_path(&path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).map_err(|source| ConfigError::Parse {
                path: shown,
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %shown, "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: shown,
                source,
            }),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// `MIN_CONFIDENCE` and `RISK_FREE_RATE` take precedence over the file.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_f64("MIN_CONFIDENCE")? {
            self.signals.min_confidence = value;
        }
        if let Some(value) = env_f64("RISK_FREE_RATE")? {
            self.risk.risk_free_rate = value;
        }
        Ok(())
    }

    /// Human-readable problems with the configuration; empty when valid.
    ///
    /// An empty weight map means no portfolio is configured and is not
    /// checked for its sum.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let weights = &self.portfolio.weights;
        if !weights.is_empty() {
            let total: f64 = weights.values().sum();
            if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                issues.push(format!("Portfolio weights sum to {:.3}, not 1.0", total));
            }
        }

        let tickers: BTreeSet<&str> = self.portfolio.tickers.iter().map(String::as_str).collect();
        let weighted: BTreeSet<&str> = weights.keys().map(String::as_str).collect();
        if tickers != weighted {
            issues.push("Portfolio tickers don't match weight keys".to_string());
        }

        let max_position = self.risk.max_position_size;
        if max_position <= 0.0 || max_position > 1.0 {
            issues.push("Invalid max_position_size".to_string());
        }

        let min_confidence = self.signals.min_confidence;
        if min_confidence <= 0.0 || min_confidence > 1.0 {
            issues.push("Invalid min_confidence".to_string());
        }

        issues
    }
}

fn env_f64(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { name, value }),
        Err(_) => Ok(None),
    }
}
