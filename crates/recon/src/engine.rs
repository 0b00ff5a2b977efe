use std::collections::HashMap;

use crate::config::{FieldMapping, ReconcileConfig};
use crate::error::ReconcileError;
use crate::evaluate::evaluate;
use crate::matcher::DownstreamIndex;
use crate::model::{
    MatchOutcome, MatchStatus, ReconcileInput, ReconcileMeta, ReconcileResult, Record,
};
use crate::summary::summarize;

/// Run one reconciliation. Returns per-record outcomes (baseline input
/// order), the unmatched subset, and summary counters.
///
/// The downstream index is built once and read-only for the whole run;
/// outcomes are independent of each other. Per-record anomalies end up in
/// outcome state — the only error path is the config precondition gate.
pub fn run(
    config: &ReconcileConfig,
    input: &ReconcileInput,
) -> Result<ReconcileResult, ReconcileError> {
    config.validate()?;

    let index = DownstreamIndex::build(&input.downstream, &config.downstream.columns.material);

    let mut outcomes: Vec<MatchOutcome> = Vec::with_capacity(input.baseline.len());
    for record in &input.baseline {
        outcomes.push(evaluate(record, &index, config));
    }

    let unmatched: Vec<MatchOutcome> = outcomes
        .iter()
        .filter(|o| matches!(o.status, MatchStatus::Unmatched { .. }))
        .cloned()
        .collect();

    let summary = summarize(&outcomes, config.options.dedup_by_key);

    Ok(ReconcileResult {
        meta: ReconcileMeta {
            config_name: config.name.clone(),
            threshold: config.threshold,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        outcomes,
        unmatched,
    })
}

/// Parse CSV text into records, trimming headers and cells.
///
/// Required mapped columns (material, vendor, consumption) are checked
/// against the header row up front; a miss is a hard error before any
/// record is produced. Optional mapped columns that are absent fall back
/// to absent-field semantics row by row.
pub fn load_records(
    csv_data: &str,
    columns: &FieldMapping,
    side: &str,
) -> Result<Vec<Record>, ReconcileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconcileError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for column in [&columns.material, &columns.vendor, &columns.consumption] {
        if !headers.iter().any(|h| h == column) {
            return Err(ReconcileError::MissingColumn {
                side: side.into(),
                column: column.clone(),
            });
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ReconcileError::Io(e.to_string()))?;
        let mut fields = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = row.get(i) {
                fields.insert(header.clone(), value.trim().to_string());
            }
        }
        records.push(Record { fields });
    }

    Ok(records)
}
