//! deep-hedge - Command Line Operations for Deep Hedging
//!
//! # Commands
//!
//! - `deep-hedge price` - Black-Scholes price and Greeks of the hedged call
//! - `deep-hedge simulate` - Simulate price paths and summarise them
//! - `deep-hedge evaluate` - Risk of a neural hedge against a delta hedge
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the core, model,
//! risk and strategy crates behind a single binary. Settings are read from
//! a TOML file (see [`config`]), then `DEEP_HEDGE_*` environment variables,
//! then flags.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::price::PriceArgs;
use config::{HedgeConfig, ModelKind};

/// Deep hedging of European calls
#[derive(Parser)]
#[command(name = "deep-hedge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "deep_hedge.toml")]
    config: String,

    /// Override the random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Black-Scholes price and Greeks of the configured call
    Price {
        /// Spot price
        #[arg(long)]
        spot: Option<f64>,

        /// Strike
        #[arg(short = 'k', long)]
        strike: Option<f64>,

        /// Risk-free rate
        #[arg(short, long)]
        rate: Option<f64>,

        /// Continuous dividend yield
        #[arg(short = 'q', long)]
        dividend: Option<f64>,

        /// Volatility
        #[arg(long)]
        volatility: Option<f64>,

        /// Maturity in years
        #[arg(short = 't', long)]
        maturity: Option<f64>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Simulate price paths and summarise the terminal distribution
    Simulate {
        /// Path model, overriding the configuration
        #[arg(short, long, value_enum)]
        model: Option<ModelKind>,

        /// Number of simulated paths
        #[arg(short, long)]
        num_paths: Option<usize>,
    },

    /// Evaluate an untrained neural hedge and a delta hedge
    Evaluate {
        /// Number of simulated paths
        #[arg(short, long)]
        num_paths: Option<usize>,

        /// Also compute the exact objective gradient.
        ///
        /// Costs one pass over every path per network parameter; without
        /// --num-paths the path count is capped at 1000.
        #[arg(short, long)]
        gradient: bool,
    },
}

fn init_tracing(config: &HedgeConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HedgeConfig::load(Path::new(&cli.config))
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }

    match cli.command {
        Commands::Price {
            spot,
            strike,
            rate,
            dividend,
            volatility,
            maturity,
            format,
        } => {
            let args = PriceArgs {
                spot,
                strike,
                rate,
                dividend,
                volatility,
                maturity,
            };
            commands::price::run(&config, &args, &format).context("price failed")
        }
        Commands::Simulate { model, num_paths } => {
            if let Some(n) = num_paths {
                config.simulation.num_simulations = n;
            }
            commands::simulate::run(&config, model).context("simulation failed")
        }
        Commands::Evaluate {
            num_paths,
            gradient,
        } => {
            commands::evaluate::apply_path_count(&mut config, num_paths, gradient);
            commands::evaluate::run(&config, gradient).context("evaluation failed")
        }
    }
}
