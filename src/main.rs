//! `ecospace` command line entry point

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use ecospace::{
    EcoSpaceConfig, EcoSpaceError, ForecastGenerator, ForecastSeries, Location, RandomSource,
    SeededRandom, ThreadRandom, classify, generate_snapshot, logging,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// EcoSpace - Air quality categories and synthetic seven-day forecasts
#[derive(Debug, Parser)]
#[command(name = "ecospace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the category, colour and guidance for an AQI value
    Classify {
        /// AQI value
        #[arg(allow_hyphen_values = true)]
        aqi: f64,
    },

    /// Generate a seven-day forecast
    Forecast {
        /// Fixed base AQI instead of a random one
        #[arg(long, allow_hyphen_values = true)]
        base_aqi: Option<f64>,

        /// Seed for reproducible output
        #[arg(long, env = "ECOSPACE_SEED")]
        seed: Option<u64>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate current conditions and forecast for a location
    Snapshot {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Display name of the location
        #[arg(long)]
        name: Option<String>,

        /// Seed for reproducible output
        #[arg(long, env = "ECOSPACE_SEED")]
        seed: Option<u64>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<EcoSpaceError>() {
                Some(eco_err) => eprintln!("Error: {}", eco_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EcoSpaceConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = cli.command else {
        print_welcome(&config, cli.config.as_ref(), cli.verbose);
        return Ok(());
    };

    match command {
        Command::Classify { aqi } => {
            print_category(aqi);
        }
        Command::Forecast {
            base_aqi,
            seed,
            format,
        } => {
            let mut source = random_source(seed.or(config.forecast.seed));
            let base_aqi = base_aqi.or(config.forecast.base_aqi);
            info!("Generating forecast (base AQI: {:?})", base_aqi);

            let series = ForecastGenerator::generate(&mut source, base_aqi)?;
            let today = Utc::now().date_naive();
            match output_format(format, &config)? {
                OutputFormat::Json => print_json(&series.dated(today))?,
                OutputFormat::Text => print_forecast(&series, today),
            }
        }
        Command::Snapshot {
            lat,
            lng,
            name,
            seed,
            format,
        } => {
            let name = name.unwrap_or_else(|| config.defaults.location_name.clone());
            let location = Location::new(lat, lng, name)?;
            let mut source = random_source(seed.or(config.forecast.seed));
            info!("Generating snapshot for {}", location.format_coordinates());

            let snapshot = generate_snapshot(&mut source, location, Utc::now())?;
            match output_format(format, &config)? {
                OutputFormat::Json => print_json(&snapshot)?,
                OutputFormat::Text => print_snapshot(&snapshot),
            }
        }
    }

    Ok(())
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            debug!("Using seeded random source ({})", seed);
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom::new()),
    }
}

fn output_format(flag: Option<OutputFormat>, config: &EcoSpaceConfig) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    OutputFormat::from_str(&config.defaults.output_format, true)
        .map_err(|e| EcoSpaceError::config(e).into())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn print_welcome(config: &EcoSpaceConfig, config_path: Option<&PathBuf>, verbose: bool) {
    println!("EcoSpace {}", ecospace::VERSION);
    println!("Synthetic air quality data, no setup required.");
    println!();
    println!("Try:");
    println!("  ecospace classify 87");
    println!("  ecospace forecast --seed 42");
    println!("  ecospace snapshot --lat 51.5074 --lng -0.1278 --name London");

    if verbose {
        println!();
        match config_path {
            Some(path) => println!("Using config from: {}", path.display()),
            None => match EcoSpaceConfig::get_config_path() {
                Some(path) => println!("Using config from: {}", path.display()),
                None => println!("Using config from: defaults"),
            },
        }
        println!("Log level: {}", config.logging.level);
        println!("Output format: {}", config.defaults.output_format);
    }
}

fn print_category(aqi: f64) {
    let category = classify(aqi);
    println!("AQI {aqi}: {} ({})", category.label, category.color);
    println!("Range: {}", category.format_range());
    println!("{}", category.description);
}

fn print_forecast(series: &ForecastSeries, today: NaiveDate) {
    println!("7-Day Air Quality Forecast");
    println!(
        "{:<12} {:>5}  {:<32} {:>13}  {:>10}",
        "Date", "AQI", "Category", "PM2.5", "Confidence"
    );
    for (point, row) in series.iter().zip(series.dated(today)) {
        println!(
            "{:<12} {:>5}  {:<32} {:>13}  {:>9}%",
            row.date.format("%a %b %d").to_string(),
            row.aqi,
            point.category().label,
            point.format_pm25(),
            row.confidence
        );
    }

    let trend = series.trend();
    println!();
    println!(
        "Current AQI {} -> day 7 AQI {}: {}",
        series.today().rounded_aqi(),
        series.last_day().rounded_aqi(),
        trend.description()
    );
}

fn print_snapshot(snapshot: &ecospace::AirQualitySnapshot) {
    let category = snapshot.category();
    println!(
        "{} ({})",
        snapshot.location.name,
        snapshot.location.format_coordinates()
    );
    println!("AQI {}: {} ({})", snapshot.aqi, category.label, category.color);
    println!("{}", category.description);
    println!();

    let p = &snapshot.pollutants;
    println!("PM2.5 {:.1}  PM10 {:.1}  O3 {:.1}", p.pm25, p.pm10, p.o3);
    println!("NO2 {:.1}  SO2 {:.1}  CO {:.1}", p.no2, p.so2, p.co);

    let w = &snapshot.weather;
    println!(
        "Temperature {}  Humidity {}%  Wind {}  Visibility {:.1} km",
        w.format_temperature(),
        w.humidity_percent,
        w.format_wind(),
        w.visibility_km
    );
    println!();

    println!("Forecast:");
    for row in &snapshot.forecast {
        println!(
            "  {}  AQI {:>3}  {:<32} PM2.5 {:.1}",
            row.date,
            row.aqi,
            classify(f64::from(row.aqi)).label,
            row.pm25
        );
    }
    println!();
    println!("Data source: {}", snapshot.data_source);
}
