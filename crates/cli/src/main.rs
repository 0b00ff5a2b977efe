// matcheck CLI - config-driven baseline↔downstream reconciliation runs

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use matcheck_cli::exit_codes::{EXIT_FINDINGS, EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use matcheck_cli::{export, load_input, CliError};
use matcheck_recon::ReconcileConfig;

#[derive(Parser)]
#[command(name = "matcheck")]
#[command(about = "Baseline-to-downstream materials reconciliation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation from a TOML config file
    #[command(after_help = "\
Examples:
  matcheck run recon.toml
  matcheck run recon.toml --json
  matcheck run recon.toml --output result.json
  matcheck run recon.toml --export results.csv --export-unmatched missing.csv")]
    Run {
        /// Path to the reconciliation config file
        config: PathBuf,

        /// Output the full result document as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON result document to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the outcome table as CSV
        #[arg(long)]
        export: Option<PathBuf>,

        /// Write the unmatched subset as CSV
        #[arg(long)]
        export_unmatched: Option<PathBuf>,
    },

    /// Validate a config without running
    #[command(after_help = "\
Examples:
  matcheck validate recon.toml")]
    Validate {
        /// Path to the reconciliation config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output, export, export_unmatched } => {
            cmd_run(config, json, output, export, export_unmatched)
        }
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
    export_unmatched_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let input = load_input(&config, base_dir)?;
    let result = matcheck_recon::run(&config, &input)
        .map_err(|e| CliError::new(EXIT_RUNTIME, e.to_string()))?;

    if json_output || output_file.is_some() {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::new(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
        if let Some(ref path) = output_file {
            std::fs::write(path, &json_str).map_err(|e| {
                CliError::new(EXIT_RUNTIME, format!("cannot write {}: {e}", path.display()))
            })?;
            eprintln!("wrote {}", path.display());
        }
        if json_output {
            println!("{json_str}");
        }
    }

    if let Some(ref path) = export_file {
        write_csv(path, &result.outcomes)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(ref path) = export_unmatched_file {
        write_csv(path, &result.unmatched)?;
        eprintln!("wrote {}", path.display());
    }

    // Human summary to stderr; stdout stays pipeable
    let s = &result.summary;
    eprintln!(
        "{} baseline rows — {} unmatched, {} component-excluded, {} vendor mismatches, {} baseline-higher, {} ok",
        s.total, s.unmatched, s.component_excluded, s.vendor_not_found, s.baseline_higher, s.consumption_ok,
    );

    if s.unmatched > 0 || s.vendor_not_found > 0 || s.baseline_higher > 0 {
        return Err(CliError::new(EXIT_FINDINGS, "discrepancies found"));
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!("config OK: '{}', threshold {}", config.name, config.threshold);
    Ok(())
}

fn read_config(path: &Path) -> Result<ReconcileConfig, CliError> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot read config: {e}")))?;
    ReconcileConfig::from_toml(&config_str)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))
}

fn write_csv(path: &Path, outcomes: &[matcheck_recon::MatchOutcome]) -> Result<(), CliError> {
    let file = File::create(path)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot create {}: {e}", path.display())))?;
    export::write_outcomes(file, outcomes)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot write {}: {e}", path.display())))
}
