//! Spectral - Data broker exposure scanner CLI
//!
//! The `spectral` command searches broker sites for a person's data and
//! prints a scored privacy-risk report.
//!
//! ## Commands
//!
//! - `assess`: Run an exposure scan and print the assessment
//! - `brokers`: List the broker registry

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spectral_broker::{BrokerLoader, BrokerRegistry};
use spectral_core::AppConfig;
use spectral_scanner::{ExposureScanner, Subject};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "spectral")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find and score your personal data exposure on data broker sites", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan broker sites for a person and print the risk assessment
    Assess {
        /// Full name to search for
        #[arg(short, long)]
        name: String,

        /// City and state, e.g. "Austin, TX"
        #[arg(long)]
        city_state: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Print the full scan report as JSON
        #[arg(long)]
        json: bool,

        /// Per-call provider timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Broker registry TOML file or directory
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Skip the primary search API even if credentials are configured
        #[arg(long)]
        no_primary: bool,
    },

    /// List known data broker sites
    Brokers {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,

        /// Broker registry TOML file or directory
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.log_json, level);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Assess {
            name,
            city_state,
            email,
            phone,
            json,
            timeout_secs,
            registry,
            no_primary,
        } => {
            if let Some(secs) = timeout_secs {
                config.search.timeout_secs = secs;
            }
            if no_primary {
                config.search.google_api_key = None;
            }
            config.validate()?;

            let subject = Subject::new(
                &name,
                city_state.as_deref(),
                email.as_deref(),
                phone.as_deref(),
            )?;
            let registry = load_registry(&config, registry.as_deref())?;

            cmd_assess(&config, registry, subject, json).await
        }
        Commands::Brokers { json, registry } => {
            let registry = load_registry(&config, registry.as_deref())?;
            cmd_brokers(&registry, json)
        }
    }
}

fn init_tracing(json: bool, level: Level) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if level == Level::DEBUG {
        "debug".to_string()
    } else {
        format!("{},spectral=debug", level.as_str().to_lowercase())
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return AppConfig::load_with_env().context("Failed to load configuration");
    };

    let mut config = AppConfig::load_from(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

fn load_registry(config: &AppConfig, override_path: Option<&Path>) -> Result<BrokerRegistry> {
    let Some(path) = override_path.or(config.registry.definitions_path.as_deref()) else {
        return Ok(BrokerRegistry::builtin());
    };

    let loader = BrokerLoader::new(path)?;
    BrokerRegistry::load_from(&loader)
        .with_context(|| format!("Failed to load broker registry from {}", path.display()))
}

async fn cmd_assess(
    config: &AppConfig,
    registry: BrokerRegistry,
    subject: Subject,
    json: bool,
) -> Result<()> {
    let scanner = ExposureScanner::from_config(config, registry)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing with results collected so far");
            on_interrupt.cancel();
        }
    });

    let report = scanner.scan(subject, &cancel).await;
    info!(scan_id = %report.scan_id, "scan finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report(&report));
    }

    Ok(())
}

fn cmd_brokers(registry: &BrokerRegistry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry.all())?);
    } else {
        print!("{}", render::brokers(registry));
    }

    Ok(())
}
