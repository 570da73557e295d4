use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "cforge",
    about = "Conjugation stoichiometry and TEM sizing for colloidal nanoparticles",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log verbosity on stderr (overridden by RUST_LOG)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        global = true
    )]
    pub log_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reagent amounts for conjugating spherical nanoparticles
    #[command(visible_alias = "s")]
    Sphere(SphereArgs),

    /// Reagent amounts for conjugating hemispherically capped nanorods
    #[command(visible_alias = "r")]
    Rod(RodArgs),

    /// Calibrate TEM pixel measurements and summarize particle sizes
    #[command(visible_alias = "t")]
    Tem(TemArgs),
}

impl Command {
    pub fn quiet(&self) -> bool {
        match self {
            Command::Sphere(args) => args.report.quiet,
            Command::Rod(args) => args.report.quiet,
            Command::Tem(args) => args.quiet,
        }
    }
}

#[derive(Args)]
pub struct SphereArgs {
    /// Particle diameter (nm)
    #[arg(value_name = "DIAMETER", value_parser = positive_f64)]
    pub diameter: f64,

    /// Particle stock concentration (nM)
    #[arg(value_name = "CONCENTRATION", value_parser = positive_f64)]
    pub concentration: f64,

    /// Total particle surface to functionalize (cm²)
    #[arg(value_name = "TARGET_AREA", value_parser = positive_f64)]
    pub target_area: f64,

    /// DNA stock concentration (µM), overriding the reagent parameters
    #[arg(value_name = "DNA_CONC", value_parser = positive_f64)]
    pub dna_conc: Option<f64>,

    #[command(flatten)]
    pub conjugation: ConjugationOptions,

    #[command(flatten)]
    pub report: ReportOptions,
}

#[derive(Args)]
pub struct RodArgs {
    /// Tip-to-tip rod length (nm)
    #[arg(value_name = "LENGTH", value_parser = positive_f64)]
    pub length: f64,

    /// Rod width (nm)
    #[arg(value_name = "WIDTH", value_parser = positive_f64)]
    pub width: f64,

    /// Particle stock concentration (nM)
    #[arg(value_name = "CONCENTRATION", value_parser = positive_f64)]
    pub concentration: f64,

    /// Total particle surface to functionalize (cm²)
    #[arg(value_name = "TARGET_AREA", value_parser = positive_f64)]
    pub target_area: f64,

    /// DNA stock concentration (µM), overriding the reagent parameters
    #[arg(value_name = "DNA_CONC", value_parser = positive_f64)]
    pub dna_conc: Option<f64>,

    #[command(flatten)]
    pub conjugation: ConjugationOptions,

    #[command(flatten)]
    pub report: ReportOptions,
}

/// Conjugation options shared by sphere and rod commands.
#[derive(Args)]
#[command(next_help_heading = "Conjugation")]
pub struct ConjugationOptions {
    /// Coating shell thickness per side (nm) [default: 10 sphere, 8 rod]
    #[arg(long, value_name = "NM", value_parser = non_negative_f64)]
    pub shell: Option<f64>,

    /// Reagents to dose
    #[arg(long, value_name = "SET", default_value = "full")]
    pub reagents: ReagentPreset,

    /// Custom reagent parameters (TOML file)
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,
}

/// Report options shared by sphere and rod commands.
#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct ReportOptions {
    /// Show areas, particle counts, molecule counts, and excess factors
    #[arg(short, long)]
    pub verbose: bool,

    /// Print plain tab-separated volumes only (for scripting)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Args)]
pub struct TemArgs {
    /// Measurement table (CSV, semicolon, or tab separated; '-' for stdin)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Summary output file; measurements and calibrated rows are written next
    /// to it with `_measurements` and `_data` suffixes (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Reject tables with an odd number of measurement rows
    #[arg(long)]
    pub strict_pairing: bool,

    /// Print a text histogram of each parameter
    #[arg(long)]
    pub histogram: bool,

    /// Number of histogram bins
    #[arg(
        long,
        value_name = "N",
        default_value = "10",
        value_parser = clap::value_parser!(u16).range(1..=40)
    )]
    pub bins: u16,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ReagentPreset {
    /// DNA, PEG, streptavidin, and crosslinker
    #[default]
    Full,
    /// DNA grafting with PEG backfill
    #[value(name = "dna-peg", alias = "dna")]
    DnaPeg,
    /// Particle solution only
    #[value(alias = "none")]
    Particles,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn positive_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("must be a positive finite number (got {s})"))
    }
}

fn non_negative_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("must be zero or a positive finite number (got {s})"))
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
