//! Library surface of the `matcheck` CLI: error type, input loading, CSV export.

pub mod exit_codes;
pub mod export;

use std::path::Path;

use matcheck_recon::config::SideConfig;
use matcheck_recon::engine::load_records;
use matcheck_recon::model::{ReconcileInput, Record};
use matcheck_recon::ReconcileConfig;

use exit_codes::EXIT_RUNTIME;

pub struct CliError {
    pub code: u8,
    pub message: String,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Load both sides' CSV files, resolving paths relative to the config
/// file's directory.
pub fn load_input(config: &ReconcileConfig, base_dir: &Path) -> Result<ReconcileInput, CliError> {
    Ok(ReconcileInput {
        baseline: load_side(base_dir, &config.baseline, "baseline")?,
        downstream: load_side(base_dir, &config.downstream, "downstream")?,
    })
}

fn load_side(base_dir: &Path, side: &SideConfig, name: &str) -> Result<Vec<Record>, CliError> {
    let path = base_dir.join(&side.file);
    let data = std::fs::read_to_string(&path)
        .map_err(|e| CliError::new(EXIT_RUNTIME, format!("cannot read {}: {e}", path.display())))?;
    load_records(&data, &side.columns, name).map_err(|e| CliError::new(EXIT_RUNTIME, e.to_string()))
}
