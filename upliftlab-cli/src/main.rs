//! UpliftLab CLI: assemble presentation parameters for a results column.
//!
//! Commands:
//! - `assemble`: read a column document (JSON) and print the renderer parameters
//! - `thresholds`: print the confidence thresholds resolved from settings

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use upliftlab_core::{diagnostics, ColumnAssembler, ColumnInput, Settings};

#[derive(Parser)]
#[command(
    name = "upliftlab",
    about = "UpliftLab CLI: presentation rules for experiment results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble graph parameters for every metric row in a column.
    Assemble {
        /// Path to the column document (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Settings file (TOML). Defaults apply when omitted.
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Assemble rows sequentially instead of on the thread pool.
        #[arg(long, default_value_t = false)]
        serial: bool,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Print the confidence thresholds resolved from settings.
    Thresholds {
        /// Settings file (TOML). Defaults apply when omitted.
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    diagnostics::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            input,
            settings,
            serial,
            pretty,
        } => run_assemble(&input, settings.as_deref(), serial, pretty),
        Commands::Thresholds { settings } => run_thresholds(settings.as_deref()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn run_assemble(input: &Path, settings: Option<&Path>, serial: bool, pretty: bool) -> Result<()> {
    let settings = load_settings(settings)?;
    let column = ColumnInput::from_file(input)?;

    let assembler = ColumnAssembler::new(settings.oracle()).with_parallelism(!serial);
    let params = assembler.assemble_input(&column, &settings.thresholds());

    let json = if pretty {
        serde_json::to_string_pretty(&params)?
    } else {
        serde_json::to_string(&params)?
    };
    println!("{json}");

    let suppressed = params.iter().filter(|p| p.axis_only).count();
    if suppressed > 0 {
        eprintln!(
            "{suppressed} of {} rows suppressed (not enough data or suspicious change)",
            params.len()
        );
    }

    Ok(())
}

fn run_thresholds(settings: Option<&Path>) -> Result<()> {
    let settings = load_settings(settings)?;
    let thresholds = settings.thresholds();
    println!("confidence level: {}", settings.confidence.level);
    println!("ciLower: {:.4}", thresholds.ci_lower);
    println!("ciUpper: {:.4}", thresholds.ci_upper);
    Ok(())
}
