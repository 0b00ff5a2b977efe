//! Per-record business rules: component exclusion, vendor verification,
//! consumption comparison, similarity annotations.
//!
//! Every anomaly becomes outcome state; nothing here returns an error.

use crate::config::{FieldMapping, ReconcileConfig};
use crate::matcher::{DownstreamIndex, MatchResult};
use crate::model::{
    ConsumptionVerdict, DownstreamFields, MatchOutcome, MatchStatus, Quantity, Record,
    VendorVerdict,
};
use crate::normalize::{normalize_consumption, parse_quantity};
use crate::similarity::{quantity_similarity, string_similarity};

/// Component codes with a hyphen or a leading '3' are out of validation
/// scope by business rule.
pub fn component_excluded(component: &str) -> bool {
    !component.is_empty() && (component.contains('-') || component.trim_start().starts_with('3'))
}

/// Evaluate one baseline record against the downstream index.
///
/// Rule order: component exclusion (skips matching entirely), unmatched
/// short-circuit, vendor verification, consumption comparison, similarity
/// annotations. Vendor misses do not stop consumption evaluation.
pub fn evaluate(
    record: &Record,
    index: &DownstreamIndex<'_>,
    config: &ReconcileConfig,
) -> MatchOutcome {
    let cols = &config.baseline.columns;

    let material = record.field(&cols.material).to_string();
    let description = optional_field(record, cols.description.as_deref());
    let component = optional_field(record, cols.component.as_deref());
    let vendor = record.field(&cols.vendor).to_string();
    let color = optional_field(record, cols.color.as_deref());
    let consumption = side_quantity(record, cols, config.options.normalize_divisor);

    let mut outcome = MatchOutcome {
        material,
        description,
        component,
        vendor,
        color,
        consumption,
        status: MatchStatus::Skipped,
        component_excluded: false,
        downstream: None,
        vendor_verdict: VendorVerdict::NotApplicable,
        consumption_verdict: ConsumptionVerdict::NotApplicable,
        material_similarity: 0.0,
        color_similarity: 0.0,
        notes: Vec::new(),
    };

    // 1. Component exclusion — matching is never attempted.
    if component_excluded(&outcome.component) {
        outcome.component_excluded = true;
        outcome
            .notes
            .push("Component excluded (contains '-' or starts with '3')".into());
        return outcome;
    }

    // 2. Downstream resolution.
    let matched = match index.find(&outcome.material, config.threshold) {
        MatchResult::Exact { row } => {
            outcome.status = MatchStatus::Exact;
            row
        }
        MatchResult::Fuzzy { row, score } => {
            outcome.status = MatchStatus::Fuzzy { score };
            outcome.notes.push(format!("Fuzzy material match (score {score})"));
            row
        }
        MatchResult::Unmatched { best_score } => {
            outcome.status = MatchStatus::Unmatched { best_score };
            outcome.notes.push(match best_score {
                Some(score) => {
                    format!("Material not found downstream (best fuzzy score {score})")
                }
                None => "Downstream material list is empty".into(),
            });
            return outcome;
        }
    };

    let dcols = &config.downstream.columns;
    let downstream = DownstreamFields {
        material: matched.field(&dcols.material).to_string(),
        vendor: matched.field(&dcols.vendor).to_string(),
        color: optional_field(matched, dcols.color.as_deref()),
        consumption: side_quantity(matched, dcols, config.options.normalize_divisor),
    };

    // 3. Vendor verification — a miss is recorded, not a short-circuit.
    outcome.vendor_verdict = if !outcome.vendor.is_empty()
        && !downstream.vendor.is_empty()
        && outcome.vendor == downstream.vendor
    {
        VendorVerdict::Exact
    } else if !downstream.vendor.is_empty() && outcome.description.contains(&downstream.vendor) {
        VendorVerdict::FoundInDescription
    } else {
        outcome
            .notes
            .push("Vendor not found in vendor field or material description".into());
        VendorVerdict::NotFound
    };

    // 4. Consumption comparison — a missing side is never coerced to zero.
    outcome.consumption_verdict =
        match (outcome.consumption.as_f64(), downstream.consumption.as_f64()) {
            (Some(baseline), Some(down)) => {
                let difference = down - baseline;
                let score = quantity_similarity(outcome.consumption, downstream.consumption);
                if baseline > down {
                    ConsumptionVerdict::BaselineHigher { difference, score }
                } else {
                    ConsumptionVerdict::Ok { difference, score }
                }
            }
            _ => {
                outcome.notes.push("Missing consumption value".into());
                ConsumptionVerdict::MissingValue
            }
        };

    // 5. Similarity annotations — 0 when either side is blank.
    outcome.material_similarity = annotation_similarity(&outcome.material, &downstream.material);
    outcome.color_similarity = annotation_similarity(&outcome.color, &downstream.color);

    outcome.downstream = Some(downstream);
    outcome
}

fn optional_field(record: &Record, column: Option<&str>) -> String {
    column.map(|c| record.field(c)).unwrap_or("").to_string()
}

fn side_quantity(record: &Record, cols: &FieldMapping, normalize_divisor: bool) -> Quantity {
    let quantity = parse_quantity(record.field(&cols.consumption));
    if !normalize_divisor {
        return quantity;
    }
    let divisor = cols
        .divisor
        .as_deref()
        .map(|c| parse_quantity(record.field(c)))
        .unwrap_or(Quantity::Missing);
    normalize_consumption(quantity, divisor)
}

fn annotation_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        0.0
    } else {
        string_similarity(a, b)
    }
}
