mod gateway;

use anyhow::Context;
use astropersona::chart::{BirthData, ChartAssembler};
use astropersona::horoscope::natal_horoscope_prompt;
use astropersona::interpretation::Interpreter;
use astropersona_config::AppSettings;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Settings file (default: configs/astropersona.toml, searched from the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replay positions from a snapshot JSON file instead of the Swiss Ephemeris.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the natal chart as JSON.
    Chart(BirthArgs),
    /// Print the chart and its interpretation tags as JSON.
    Interpret(BirthArgs),
    /// Print the narrative prompt that would be sent to the text generator.
    Prompt(BirthArgs),
}

#[derive(Args, Debug, Clone)]
struct BirthArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Birth time, HH:MM. Defaults to the configured default time.
    #[arg(long)]
    time: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Timezone label, recorded but not applied.
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

impl BirthArgs {
    fn birth_data(&self) -> anyhow::Result<BirthData> {
        BirthData::parse(&self.date, self.time.as_deref(), self.lat, self.lon, &self.timezone)
            .with_context(|| format!("Invalid birth data for {}", self.date))
    }
}

#[derive(Serialize)]
struct InterpretOutput<'a> {
    chart: &'a astropersona::NatalChart,
    interpretation: astropersona::Interpretation,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<AppSettings> {
    match path {
        Some(p) => astropersona_config::load_settings_from(p),
        None => match astropersona_config::load_settings() {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("{e}; using built-in defaults");
                Ok(AppSettings {
                    ephemeris_path: astropersona_config::resolve_ephemeris_path(
                        None,
                        std::env::var(astropersona_config::EPHEMERIS_PATH_ENV).ok().as_deref(),
                    ),
                    chart: Default::default(),
                })
            }
        },
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;
    let ephemeris = gateway::open(cli.snapshot.as_deref(), settings.ephemeris_path.clone())?;
    let assembler = ChartAssembler::with_settings(ephemeris, settings.chart.clone());

    let birth_args = match &cli.command {
        Command::Chart(args) | Command::Interpret(args) | Command::Prompt(args) => args,
    };
    let birth = birth_args.birth_data()?;
    if birth.timezone() != "UTC" {
        log::warn!(
            "Timezone {} is not applied; the birth time is used as UT",
            birth.timezone()
        );
    }

    let chart = assembler
        .calculate_chart(&birth)
        .with_context(|| format!("Chart calculation failed for {}", birth_args.date))?;

    match &cli.command {
        Command::Chart(_) => println!("{}", serde_json::to_string_pretty(&chart)?),
        Command::Interpret(_) => {
            let output = InterpretOutput {
                chart: &chart,
                interpretation: Interpreter::standard().interpret(&chart),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Prompt(_) => println!("{}", natal_horoscope_prompt(&chart)?),
    }

    Ok(())
}
