//! Snow Atlas CLI
//!
//! Offline command-line access to the dashboard views:
//! - Map, report and report card of a dataset file
//! - Continent, country and metric listings
//! - Default config generation

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use snowatlas::config::{generate_default_config, Config};
use snowatlas::dataset::{Dataset, DatasetLoader, Encoding, Flag};
use snowatlas::query::MapFilter;
use snowatlas::views::{
    card_view, country_options, map_view, report_view, ReportInputs, ViewUpdate,
};

#[derive(Parser)]
#[command(name = "snowatlas-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Explore a ski resort dataset from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset CSV (default: from configuration)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Dataset encoding: latin1 or utf8
    #[arg(short, long, global = true)]
    pub encoding: Option<Encoding>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resorts below a price ceiling with matching features
    Map {
        /// Price ceiling (exclusive)
        #[arg(short, long)]
        price: Option<f64>,
        /// Night skiing: Yes or No
        #[arg(long)]
        night_ski: Option<Flag>,
        /// Summer skiing: Yes or No
        #[arg(long)]
        summer_ski: Option<Flag>,
        /// Snowpark: Yes or No
        #[arg(long)]
        snowpark: Option<Flag>,
    },

    /// List continents
    Continents,

    /// List the countries of a continent
    Countries {
        continent: String,
    },

    /// List metrics a report can be sorted by
    Metrics,

    /// Resorts of a country sorted by a metric
    Report {
        country: String,
        /// Metric column (e.g. "Total slopes" or total_slopes)
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Per-country ranks of a resort
    Card {
        /// Resort name (default: configured default resort)
        resort: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let command = match cli.command {
        Commands::Config { output } => return write_default_config(output),
        other => other,
    };

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    let mut config = loaded.config;
    if let Some(data) = &cli.data {
        config.dataset.path = data.clone();
    }
    if let Some(encoding) = cli.encoding {
        config.dataset.encoding = encoding;
    }

    // Defaults apply only to the inputs a subcommand was not given
    let dataset = DatasetLoader::new()
        .with_encoding(config.dataset.encoding)
        .load_path(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset {:?}", config.dataset.path))?;
    let dataset = &dataset;
    let defaults = &config.dashboard;
    let json = cli.format == OutputFormat::Json;

    match command {
        Commands::Map {
            price,
            night_ski,
            summer_ski,
            snowpark,
        } => {
            let filter = MapFilter::new(
                price.unwrap_or(defaults.price.default),
                night_ski.unwrap_or(defaults.default_night_skiing),
                summer_ski.unwrap_or(defaults.default_summer_skiing),
                snowpark.unwrap_or(defaults.default_snowpark),
            );
            let view = map_view(dataset, &filter, &defaults.map)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.title);
                println!();
                if let Some(message) = &view.figure.empty_message {
                    println!("{}", message);
                } else {
                    println!("{:<24} {:>10} {:>10} {:>8}", "Resort", "Lat", "Lon", "Slopes");
                    println!("{}", "-".repeat(55));
                    for point in &view.figure.points {
                        println!(
                            "{:<24} {:>10.4} {:>10.4} {:>8}",
                            point.label, point.lat, point.lon, point.weight
                        );
                    }
                }
            }
        }

        Commands::Continents => {
            if json {
                println!("{}", serde_json::to_string_pretty(dataset.continents())?);
            } else {
                for continent in dataset.continents() {
                    let countries = dataset.countries_in(continent).len();
                    println!("{:<24} {} countries", continent, countries);
                }
            }
        }

        Commands::Countries { continent } => {
            let options = country_options(dataset, &continent);
            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else if options.countries.is_empty() {
                println!("No countries found for {}", continent);
            } else {
                for country in &options.countries {
                    println!("{:<24} {} resorts", country, dataset.country_size(country));
                }
            }
        }

        Commands::Metrics => {
            if json {
                println!("{}", serde_json::to_string_pretty(dataset.metrics())?);
            } else {
                for metric in dataset.metrics() {
                    println!("{}", metric);
                }
            }
        }

        Commands::Report { country, metric } => {
            let metric = metric.unwrap_or_else(|| defaults.default_metric.clone());
            let inputs = ReportInputs::new(Some(country.as_str()), metric);

            let view = match report_view(dataset, &inputs)? {
                ViewUpdate::Changed(view) => view,
                ViewUpdate::Unchanged => bail!("A country is required"),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.title);
                println!();
                if let Some(message) = &view.chart.empty_message {
                    println!("{}", message);
                }
                for (i, bar) in view.chart.bars.iter().enumerate() {
                    let value = bar
                        .value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("{:>3}. {:<24} {:>10}", i + 1, bar.category, value);
                }
            }
        }

        Commands::Card { resort } => {
            let card = card_view(dataset, resort.as_deref(), &defaults.default_resort)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                print_card(dataset, &card.resort);
                println!("  {}", card.elevation);
                println!("  {}", card.price);
                println!("  {}", card.slopes);
                println!("  {}", card.cannons);
            }
        }

        Commands::Config { output } => return write_default_config(output),
    }

    Ok(())
}

fn write_default_config(output: Option<PathBuf>) -> Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Header line of a report card
fn print_card(dataset: &Dataset, name: &str) {
    match dataset.get(name) {
        Some(resort) => println!(
            "{} ({}, ranked among {} resorts)",
            resort.name,
            resort.country,
            dataset.country_size(&resort.country)
        ),
        None => println!("{}", name),
    }
}
