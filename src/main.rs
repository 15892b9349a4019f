//! Rivel - dairy ration prediction
//!
//! Command-line and HTTP front ends for the prediction engine.
//!
//! # Usage
//!
//! ```bash
//! # Predict with the farm defaults (spring pasture)
//! rivel predict
//!
//! # Custom ration
//! rivel predict --weight 520 --milk 28 --intake "Ryegrass Pasture (Spring)=11" --intake PKE=2
//!
//! # Serve the JSON API
//! rivel serve --addr 0.0.0.0:8080
//! ```
//!
//! # Environment Variables
//!
//! - `RIVEL_CONFIG`: Path to a TOML config file (default: ./rivel.toml)
//! - `RIVEL_CORS_ORIGINS`: Comma-separated origins allowed to call the API
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rivel::api::handlers::PredictResponse;
use rivel::api::{create_app, ApiState};
use rivel::config::RivelConfig;
use rivel::input::{default_intakes, intakes_from_named, parse_named_intake, FarmInputs};
use rivel::prediction_engine::{extra_revenue, predict, summarize};
use rivel::types::{FeedLibrary, ModelVariant, Season};
use rivel::load_feed_library;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rivel")]
#[command(about = "Dairy ration calculator: milk solids, live-weight gain, feed cost and methane")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides RIVEL_CONFIG and ./rivel.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict daily outcomes for one cow
    Predict {
        /// Cow live weight (kg)
        #[arg(long)]
        weight: Option<f64>,

        /// Current milk yield (kg/cow/day)
        #[arg(long)]
        milk: Option<f64>,

        /// Herd size, for the revenue estimate
        #[arg(long)]
        herd: Option<u32>,

        /// Season (spring, summer, autumn, winter)
        #[arg(long)]
        season: Option<Season>,

        /// Model variant (standard, composition)
        #[arg(long)]
        variant: Option<ModelVariant>,

        /// Feed intake as NAME=KG, repeatable. Without any, season defaults are used.
        #[arg(long = "intake", value_name = "NAME=KG")]
        intakes: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the feed library
    Feeds {
        #[arg(long)]
        variant: Option<ModelVariant>,

        #[arg(long)]
        json: bool,
    },

    /// Show the default intakes for a season
    Defaults {
        #[arg(long)]
        season: Option<Season>,

        #[arg(long)]
        variant: Option<ModelVariant>,
    },

    /// Serve the JSON API
    Serve {
        /// Bind address (default from config: 127.0.0.1:8080)
        #[arg(short, long)]
        addr: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(path: Option<&PathBuf>) -> Result<RivelConfig> {
    match path {
        Some(p) => RivelConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(RivelConfig::load()),
    }
}

/// Config with the CLI's variant applied on top.
fn with_variant(mut config: RivelConfig, variant: Option<ModelVariant>) -> RivelConfig {
    if let Some(v) = variant {
        config.model.variant = v;
    }
    config
}

#[allow(clippy::too_many_arguments)]
fn run_predict(
    config: &RivelConfig,
    weight: Option<f64>,
    milk: Option<f64>,
    herd: Option<u32>,
    season: Option<Season>,
    named: &[String],
    json: bool,
) -> Result<()> {
    let preset = config.preset();
    let library = load_feed_library(preset.variant);
    let season = season.unwrap_or(config.farm.season);

    let intakes = if named.is_empty() {
        default_intakes(&library, season)
    } else {
        let pairs = named
            .iter()
            .map(|raw| parse_named_intake(raw))
            .collect::<Result<Vec<_>, _>>()?;
        intakes_from_named(&library, pairs.iter().map(|(n, kg)| (n.as_str(), *kg)))?
    };

    let inputs = FarmInputs {
        cow_weight_kg: weight.unwrap_or(config.farm.cow_weight_kg),
        current_milk_kg_day: milk.unwrap_or(config.farm.current_milk_kg_day),
        herd_size: herd.unwrap_or(config.farm.herd_size),
        season,
        intakes,
    };
    inputs.validate(&library).context("Invalid farm inputs")?;

    let Some(detail) = predict(&inputs.animal(), &library, &inputs.intakes, &preset) else {
        if json {
            println!("null");
        } else {
            println!("No feed entered (total DMI is zero), nothing to predict.");
        }
        return Ok(());
    };

    let summary = summarize(&detail);
    let response = PredictResponse {
        extra_revenue: extra_revenue(summary.milk_solids_kg, inputs.herd_size, &config.economics),
        summary,
        detail,
        herd_size: inputs.herd_size,
        season,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let s = &response.summary;
    println!("Milk Solids:      {} kg/cow/day", s.milk_solids_kg);
    println!(
        "Extra Revenue:    {}/day @ ${:.2}/kg MS ({} cows)",
        format_dollars(response.extra_revenue),
        config.economics.milk_solids_price_per_kg,
        inputs.herd_size
    );
    println!("Live-weight gain: {} kg/day", s.lwg_kg);
    println!("Feed cost:        ${}/cow", s.feed_cost);
    println!("Milk yield:       {} kg/cow/day ({} limited)", s.milk_yield_kg, detail.limiting_factor);
    println!(
        "Total DMI: {} kg · Methane: {} g/cow · Season: {}",
        s.dmi_kg, s.methane_g, season
    );
    Ok(())
}

/// `+$4,104` / `-$1,250`
fn format_dollars(amount: f64) -> String {
    let sign = if amount < 0.0 { '-' } else { '+' };
    let digits = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

fn print_feeds(library: &FeedLibrary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(library)?);
        return Ok(());
    }

    println!("Feed library ({})", library.variant());
    println!("{:<28} {:>8} {:>8} {:>8}", "Feed", "ME MJ", "CP g", "NZD/kg");
    for feed in library {
        println!(
            "{:<28} {:>8.1} {:>8.0} {:>8.2}",
            feed.name,
            feed.metabolizable_energy_mj_per_kg,
            feed.crude_protein_g_per_kg,
            feed.cost_per_kg
        );
    }
    Ok(())
}

async fn serve(config: &RivelConfig, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let state = ApiState::from_config(config);
    info!(variant = %state.preset.variant, feeds = state.library.len(), "Feed library ready");

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received Ctrl+C, shutting down");
        })
        .await
        .context("HTTP server failed")?;
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Predict {
            weight,
            milk,
            herd,
            season,
            variant,
            intakes,
            json,
        } => run_predict(&with_variant(config, variant), weight, milk, herd, season, &intakes, json),
        Command::Feeds { variant, json } => {
            let preset = with_variant(config, variant).preset();
            print_feeds(&load_feed_library(preset.variant), json)
        }
        Command::Defaults { season, variant } => {
            let config = with_variant(config, variant);
            let library = load_feed_library(config.preset().variant);
            let season = season.unwrap_or(config.farm.season);
            println!("Default intakes for {season} (kg DM/cow/day)");
            for (feed, kg) in library.iter().zip(default_intakes(&library, season)) {
                println!("  {:<28} {:>5.1}", feed.name, kg);
            }
            Ok(())
        }
        Command::Serve { addr } => serve(&config, addr).await,
        Command::Config { write } => match write {
            Some(path) => config
                .save_to_file(&path)
                .with_context(|| format!("Failed to write {}", path.display())),
            None => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
        },
    }
}
