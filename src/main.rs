mod demo;
mod render;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use abitur_risk::config::AppConfig;
use abitur_risk::error::AppError;
use abitur_risk::profile::{load_profile, profile_from_csv};
use abitur_risk::telemetry;
use abitur_risk::{Jurisdiction, JurisdictionProfile, RiskEngine, UserInputProfile};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use demo::Scenario;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "abitur-guard",
    about = "Check an Abitur student profile against the graduation rules of its state",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a profile from a JSON file or a subject CSV export
    Evaluate(EvaluateArgs),
    /// Evaluate one of the built-in sample students
    Demo {
        #[arg(value_enum, default_value_t = Scenario::Disaster)]
        scenario: Scenario,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Full profile as JSON, including jurisdiction and rules
    #[arg(long, required_unless_present = "subjects_csv", conflicts_with = "subjects_csv")]
    profile: Option<PathBuf>,
    /// Subject export as CSV; jurisdiction and year come from flags or configuration
    #[arg(long)]
    subjects_csv: Option<PathBuf>,
    /// Jurisdiction for CSV input (nrw or bavaria)
    #[arg(long, value_parser = parse_jurisdiction)]
    jurisdiction: Option<Jurisdiction>,
    /// Graduation year for CSV input (defaults to the current year)
    #[arg(long)]
    graduation_year: Option<u16>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    match cli.command {
        Command::Evaluate(args) => {
            let json = args.json;
            let profile = read_profile(args, &config)?;
            report(&profile, json)
        }
        Command::Demo { scenario, json } => report(&scenario.profile(), json),
    }
}

fn read_profile(args: EvaluateArgs, config: &AppConfig) -> Result<UserInputProfile, AppError> {
    if let Some(path) = args.profile {
        return Ok(load_profile(&path)?);
    }

    let Some(path) = args.subjects_csv else {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "either --profile or --subjects-csv is required",
        )));
    };

    let jurisdiction = match args.jurisdiction.unwrap_or(config.evaluation.jurisdiction) {
        Jurisdiction::Bavaria => JurisdictionProfile::Bavaria,
        _ => JurisdictionProfile::Nrw,
    };
    let graduation_year = args
        .graduation_year
        .or(config.evaluation.graduation_year)
        .unwrap_or_else(current_year);

    let file = File::open(&path)?;
    Ok(profile_from_csv(
        jurisdiction,
        graduation_year,
        BufReader::new(file),
    )?)
}

fn report(profile: &UserInputProfile, json: bool) -> Result<(), AppError> {
    let report = RiskEngine::standard().evaluate(profile);
    info!(
        overall = report.overall_severity.label(),
        findings = report.findings.len(),
        "profile evaluated"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render::write_report(&mut out, profile, &report)?;
    }
    Ok(())
}

fn parse_jurisdiction(raw: &str) -> Result<Jurisdiction, String> {
    match Jurisdiction::parse(raw) {
        Some(Jurisdiction::General) => {
            Err("general rules need a JSON profile; use --profile".to_string())
        }
        Some(jurisdiction) => Ok(jurisdiction),
        None => Err(format!("unknown jurisdiction `{raw}`; expected nrw or bavaria")),
    }
}

fn current_year() -> u16 {
    u16::try_from(chrono::Local::now().year()).unwrap_or(u16::MAX)
}
