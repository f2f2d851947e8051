//! # Imperial CLI
//!
//! Command-line front end for `imperial_core`: parse feet-inch notation to
//! decimal feet, format decimal feet back, or run an interactive prompt.
//!
//! ```text
//! imperial parse "12'-6 1/2\""
//! imperial format 25.222 --denominator 32
//! imperial --config team.json interactive
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use imperial_core::{format_from_feet, load_settings, parse_to_feet, NotationSettings, UnitsError};

#[derive(Parser, Debug)]
#[command(name = "imperial")]
#[command(about = "Convert between decimal feet and feet-inch-fraction notation")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file with default denominators
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse notation such as 2'-1 7/32" into decimal feet
    Parse(ParseArgs),

    /// Format decimal feet as notation
    Format(FormatArgs),

    /// Read one value per line and echo both forms
    Interactive,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Text to parse
    #[arg(allow_hyphen_values = true)]
    text: String,

    /// Resolution in fractions of an inch (defaults to the settings value)
    #[arg(short, long)]
    denominator: Option<i32>,

    /// Print structured JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct FormatArgs {
    /// Decimal feet
    #[arg(allow_negative_numbers = true)]
    feet: f64,

    /// Resolution in fractions of an inch (defaults to the settings value)
    #[arg(short, long)]
    denominator: Option<i32>,

    /// Print structured JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Conversion {
    feet: f64,
    notation: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => NotationSettings::default(),
    };
    debug!(?settings, "effective settings");

    match cli.command {
        Commands::Parse(args) => run_parse(&args, &settings),
        Commands::Format(args) => run_format(&args, &settings),
        Commands::Interactive => run_interactive(&settings),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_parse(args: &ParseArgs, settings: &NotationSettings) -> Result<()> {
    let denominator = args.denominator.unwrap_or(settings.parse_denominator);
    let outcome = parse_to_feet(&args.text, denominator).and_then(|feet| {
        let notation = format_from_feet(feet, settings.format_denominator)?;
        Ok(Conversion { feet, notation })
    });
    report(outcome, args.json, |c| c.feet.to_string())
}

fn run_format(args: &FormatArgs, settings: &NotationSettings) -> Result<()> {
    let denominator = args.denominator.unwrap_or(settings.format_denominator);
    let outcome = format_from_feet(args.feet, denominator).map(|notation| Conversion {
        feet: args.feet,
        notation,
    });
    report(outcome, args.json, |c| c.notation.clone())
}

/// Print the conversion, or the structured error when `json` is set.
fn report(
    outcome: Result<Conversion, UnitsError>,
    json: bool,
    plain: impl Fn(&Conversion) -> String,
) -> Result<()> {
    match (outcome, json) {
        (Ok(conversion), true) => {
            println!("{}", serde_json::to_string_pretty(&conversion)?);
            Ok(())
        }
        (Ok(conversion), false) => {
            println!("{}", plain(&conversion));
            Ok(())
        }
        (Err(e), true) => {
            println!("{}", serde_json::to_string_pretty(&e)?);
            Err(e.into())
        }
        (Err(e), false) => Err(e.into()),
    }
}

fn run_interactive(settings: &NotationSettings) -> Result<()> {
    println!("Imperial - feet/inch converter");
    println!("==============================");
    println!("Enter notation (e.g. 12'-6 1/2\") or decimal feet. Empty line quits.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next() else { break };
        let line = line.context("reading stdin")?;
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        match convert_line(input, settings) {
            Ok(conversion) => println!("  {} ft = {}", conversion.feet, conversion.notation),
            Err(e) => println!("  [ERROR] {}", e),
        }
    }
    Ok(())
}

/// A bare number is decimal feet; anything else is notation.
fn convert_line(input: &str, settings: &NotationSettings) -> Result<Conversion, UnitsError> {
    let feet = match input.parse::<f64>() {
        Ok(feet) => feet,
        Err(_) => settings.parse(input)?,
    };
    Ok(Conversion {
        feet,
        notation: settings.format(feet)?,
    })
}
