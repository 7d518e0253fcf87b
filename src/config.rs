use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{NewsvendorConfig, QueueConfig};

#[derive(Parser, Debug)]
#[command(name = "queue-sim", version, about = "Single-server queue and newsvendor simulations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a single-server queue
    Queue(QueueArgs),
    /// Simulate the newsvendor problem
    Newsvendor(NewsvendorArgs),
    /// Print the random-number to time mapping tables
    Bands,
    /// Print the resolved queue configuration without running it
    ShowConfig(QueueInput),
    /// Print the resolved newsvendor parameters and demand distribution
    ShowNewsvendor(NewsvendorInput),
}

/// Everything that shapes a queue run, shared by `queue` and `show-config`.
#[derive(Args, Debug, Clone, Default)]
pub struct QueueInput {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub customers: Option<usize>,
    #[arg(long, help = "Random numbers for inter-arrival times (1..1000), comma or newline separated")]
    pub rn_iat: Option<String>,
    #[arg(long, help = "Random numbers for service times (1..100), comma or newline separated")]
    pub rn_st: Option<String>,
    #[arg(long, help = "Seed for generated random numbers; omit to draw from OS entropy")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct QueueArgs {
    #[command(flatten)]
    pub input: QueueInput,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct NewsvendorInput {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub days: Option<usize>,
    #[arg(long)]
    pub order_quantity: Option<u32>,
    #[arg(long)]
    pub selling_price: Option<f64>,
    #[arg(long)]
    pub cost_price: Option<f64>,
    #[arg(long)]
    pub salvage_price: Option<f64>,
    #[arg(long, help = "Do not subtract lost profit from daily profit")]
    pub no_lost_profit: bool,
    #[arg(long, help = "Seed for the daily draws (default 42)")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct NewsvendorArgs {
    #[command(flatten)]
    pub input: NewsvendorInput,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

/// Help and version requests print and exit successfully; every other parse
/// failure becomes `Error::Cli`.
pub fn parse_args() -> Result<Cli> {
    Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => Error::Cli(e.to_string()),
    })
}

fn resolve_format(format: FormatArg, summary: bool) -> FormatArg {
    if summary {
        FormatArg::Summary
    } else {
        format
    }
}

pub fn build_queue_config(args: QueueArgs) -> Result<(QueueConfig, FormatArg)> {
    let config = resolve_queue_config(args.input)?;
    Ok((config, resolve_format(args.format, args.summary)))
}

/// Loads the config file, if any, then applies the CLI overrides.
pub fn resolve_queue_config(args: QueueInput) -> Result<QueueConfig> {
    let mut config = match &args.config {
        Some(path) => load_config::<QueueConfig>(path)?,
        None => {
            let customers = args.customers.ok_or_else(|| {
                Error::Cli("--customers is required unless --config is given".to_string())
            })?;
            QueueConfig {
                customers,
                ..QueueConfig::default()
            }
        }
    };

    if let Some(customers) = args.customers {
        config.customers = customers;
    }
    if let Some(input) = &args.rn_iat {
        config.rn_iat = parse_random_numbers(input)?;
    }
    if let Some(input) = &args.rn_st {
        config.rn_st = parse_random_numbers(input)?;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

pub fn build_newsvendor_config(args: NewsvendorArgs) -> Result<(NewsvendorConfig, FormatArg)> {
    let config = resolve_newsvendor_config(args.input)?;
    Ok((config, resolve_format(args.format, args.summary)))
}

pub fn resolve_newsvendor_config(args: NewsvendorInput) -> Result<NewsvendorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config::<NewsvendorConfig>(path)?,
        None => NewsvendorConfig::default(),
    };

    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(order_quantity) = args.order_quantity {
        config.order_quantity = order_quantity;
    }
    if let Some(price) = args.selling_price {
        config.selling_price = price;
    }
    if let Some(price) = args.cost_price {
        config.cost_price = price;
    }
    if let Some(price) = args.salvage_price {
        config.salvage_price = price;
    }
    if args.no_lost_profit {
        config.include_lost_profit = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

/// Parses a comma or newline separated list of draws. A blank list means
/// "generate these draws" and yields `None`.
pub fn parse_random_numbers(input: &str) -> Result<Option<Vec<u32>>> {
    let values = input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| Error::InvalidRandomNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(values))
    }
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}
