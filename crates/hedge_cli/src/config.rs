//! Configuration management
//!
//! Settings come from a TOML file (every section optional), then environment
//! variables, then command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [simulation]
//! num_simulations = 10000
//! num_timesteps = 31
//! seed = 42
//! model = "black-scholes"
//!
//! [market]
//! spot = 100.0
//! volatility = 0.2
//!
//! [risk]
//! measure = "cvar"
//! alpha = 0.9
//! ```

use std::path::Path;
use std::str::FromStr;

use hedge_models::analytical::BlackScholesCallOption;
use hedge_models::generators::heston::HestonParams;
use hedge_models::generators::{
    BlackScholesGenerator, HestonGenerator, PathGenerator, SimulationConfig,
};
use hedge_risk::{RiskMeasure, RiskObjective};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable overriding `simulation.seed`.
pub const ENV_SEED: &str = "DEEP_HEDGE_SEED";
/// Environment variable overriding `simulation.num_simulations`.
pub const ENV_NUM_SIMULATIONS: &str = "DEEP_HEDGE_NUM_SIMULATIONS";
/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "DEEP_HEDGE_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// The file is not valid TOML for this schema
    #[error("Failed to parse TOML: {0}")]
    Parse(String),

    /// An environment override could not be parsed
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A value is outside its domain
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the setting
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Log levels accepted in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Price path model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Geometric Brownian motion
    #[default]
    BlackScholes,
    /// Heston stochastic volatility
    Heston,
}

/// Risk measure selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    /// Conditional Value-at-Risk, uses `alpha` and `w`
    #[default]
    Cvar,
    /// Entropic risk measure, uses `lambda`
    Entropy,
}

/// `[simulation]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub num_simulations: usize,
    /// Price observations per path, including t = 0
    pub num_timesteps: usize,
    pub seed: u64,
    pub model: ModelKind,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            num_timesteps: 31,
            seed: 42,
            model: ModelKind::BlackScholes,
        }
    }
}

/// `[market]` section
///
/// `v0`, `theta`, `kappa`, `xi` and `rho` are only read by the Heston model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    pub spot: f64,
    pub rate: f64,
    pub dividend: f64,
    pub volatility: f64,
    pub maturity: f64,
    pub v0: f64,
    pub theta: f64,
    pub kappa: f64,
    pub xi: f64,
    pub rho: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        let heston = HestonParams::default();
        Self {
            spot: 100.0,
            rate: 0.0,
            dividend: 0.0,
            volatility: 0.2,
            maturity: 1.0,
            v0: heston.v0,
            theta: heston.theta,
            kappa: heston.kappa,
            xi: heston.xi,
            rho: heston.rho,
        }
    }
}

/// `[option]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSection {
    pub strike: f64,
    /// Premium received; the Black-Scholes price when absent
    pub premium: Option<f64>,
}

impl Default for OptionSection {
    fn default() -> Self {
        Self {
            strike: 100.0,
            premium: None,
        }
    }
}

/// `[strategy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySection {
    pub hidden_nodes: usize,
}

impl Default for StrategySection {
    fn default() -> Self {
        Self { hidden_nodes: 16 }
    }
}

/// `[risk]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSection {
    pub measure: MeasureKind,
    pub alpha: f64,
    pub lambda: f64,
    pub w: f64,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            measure: MeasureKind::Cvar,
            alpha: 0.9,
            lambda: 1.0,
            w: 0.0,
        }
    }
}

/// Complete `deep-hedge` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HedgeConfig {
    pub log_level: LogLevel,
    pub simulation: SimulationSection,
    pub market: MarketSection,
    pub option: OptionSection,
    pub strategy: StrategySection,
    pub risk: RiskSection,
}

impl HedgeConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HedgeConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is missing,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment variables, read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.simulation.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_SEED, seed)))?;
        }
        if let Some(n) = lookup(ENV_NUM_SIMULATIONS) {
            self.simulation.num_simulations = n
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_NUM_SIMULATIONS, n)))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(level.trim())?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_config()?;
        self.risk_objective()?;
        self.generator(self.simulation.model)?;

        if !(self.option.strike > 0.0 && self.option.strike.is_finite()) {
            return Err(ConfigError::invalid(
                "option.strike",
                format!("{} must be positive", self.option.strike),
            ));
        }
        if let Some(premium) = self.option.premium {
            if !premium.is_finite() {
                return Err(ConfigError::invalid("option.premium", "must be finite"));
            }
        }
        if self.strategy.hidden_nodes == 0 {
            return Err(ConfigError::invalid(
                "strategy.hidden_nodes",
                "must be at least 1",
            ));
        }
        self.option_contract()?;
        Ok(())
    }

    /// Simulation size and seed
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::builder()
            .num_simulations(self.simulation.num_simulations)
            .num_timesteps(self.simulation.num_timesteps)
            .seed(self.simulation.seed)
            .build()
            .map_err(|e| ConfigError::invalid("simulation", e))
    }

    /// Configured risk measure with its initial `w`
    pub fn risk_objective(&self) -> Result<RiskObjective, ConfigError> {
        let measure = match self.risk.measure {
            MeasureKind::Cvar => RiskMeasure::cvar(self.risk.alpha)
                .map_err(|e| ConfigError::invalid("risk.alpha", e))?,
            MeasureKind::Entropy => RiskMeasure::entropy(self.risk.lambda)
                .map_err(|e| ConfigError::invalid("risk.lambda", e))?,
        };
        RiskObjective::new(measure, self.risk.w).map_err(|e| ConfigError::invalid("risk.w", e))
    }

    /// Path generator for `model` with the `[market]` parameters
    pub fn generator(&self, model: ModelKind) -> Result<Box<dyn PathGenerator>, ConfigError> {
        let m = &self.market;
        match model {
            ModelKind::BlackScholes => {
                BlackScholesGenerator::new(m.spot, m.rate, m.dividend, m.volatility, m.maturity)
                    .map(|g| Box::new(g) as Box<dyn PathGenerator>)
                    .map_err(|e| ConfigError::invalid("market", e))
            }
            ModelKind::Heston => HestonGenerator::new(HestonParams {
                spot: m.spot,
                rate: m.rate,
                dividend: m.dividend,
                maturity: m.maturity,
                v0: m.v0,
                theta: m.theta,
                kappa: m.kappa,
                xi: m.xi,
                rho: m.rho,
            })
            .map(|g| Box::new(g) as Box<dyn PathGenerator>)
            .map_err(|e| ConfigError::invalid("market", e)),
        }
    }

    /// The hedged call under Black-Scholes with the `[market]` parameters
    pub fn option_contract(&self) -> Result<BlackScholesCallOption<f64>, ConfigError> {
        let m = &self.market;
        BlackScholesCallOption::new(
            m.spot,
            self.option.strike,
            m.rate,
            m.dividend,
            m.maturity,
            m.volatility,
        )
        .map_err(|e| ConfigError::invalid("market", e))
    }

    /// Configured premium, or the Black-Scholes price of the call
    pub fn premium(&self) -> Result<f64, ConfigError> {
        match self.option.premium {
            Some(premium) => Ok(premium),
            None => {
                let price = self.option_contract()?.price();
                info!(premium = price, "Using Black-Scholes price as premium");
                Ok(price)
            }
        }
    }
}
