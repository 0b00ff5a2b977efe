//! Outcome table → CSV.
//!
//! This is the presentation boundary: the engine exposes classifications,
//! this module fixes the column convention downstream tooling styles and
//! highlights. No styling happens here.

use std::io::Write;

use matcheck_recon::model::{ConsumptionVerdict, MatchOutcome, MatchStatus, Quantity, VendorVerdict};

pub const COLUMNS: [&str; 20] = [
    "material",
    "material_description",
    "component",
    "vendor",
    "color",
    "consumption",
    "match_status",
    "match_score",
    "component_flag",
    "vendor_check",
    "downstream_material",
    "downstream_vendor",
    "downstream_color",
    "downstream_consumption",
    "consumption_diff",
    "consumption_flag",
    "consumption_similarity",
    "material_similarity",
    "color_similarity",
    "notes",
];

pub fn write_outcomes<W: Write>(writer: W, outcomes: &[MatchOutcome]) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(COLUMNS)?;
    for outcome in outcomes {
        w.write_record(outcome_row(outcome))?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn outcome_row(o: &MatchOutcome) -> Vec<String> {
    let (d_material, d_vendor, d_color, d_consumption) = match &o.downstream {
        Some(d) => (
            d.material.clone(),
            d.vendor.clone(),
            d.color.clone(),
            fmt_quantity(d.consumption),
        ),
        None => (String::new(), String::new(), String::new(), String::new()),
    };

    let (diff, cons_score) = match o.consumption_verdict {
        ConsumptionVerdict::Ok { difference, score }
        | ConsumptionVerdict::BaselineHigher { difference, score } => {
            (format!("{difference}"), format!("{score}"))
        }
        ConsumptionVerdict::MissingValue | ConsumptionVerdict::NotApplicable => {
            (String::new(), String::new())
        }
    };

    vec![
        o.material.clone(),
        o.description.clone(),
        o.component.clone(),
        o.vendor.clone(),
        o.color.clone(),
        fmt_quantity(o.consumption),
        o.status.to_string(),
        match_score(&o.status),
        component_flag(o),
        vendor_check(o.vendor_verdict),
        d_material,
        d_vendor,
        d_color,
        d_consumption,
        diff,
        consumption_flag(&o.consumption_verdict),
        cons_score,
        format!("{}", o.material_similarity),
        format!("{}", o.color_similarity),
        o.notes.join(" | "),
    ]
}

fn fmt_quantity(q: Quantity) -> String {
    match q {
        Quantity::Value(v) => format!("{v}"),
        Quantity::Missing => String::new(),
    }
}

fn match_score(status: &MatchStatus) -> String {
    match status {
        MatchStatus::Fuzzy { score } => format!("{score}"),
        MatchStatus::Unmatched { best_score: Some(score) } => format!("{score}"),
        _ => String::new(),
    }
}

fn component_flag(o: &MatchOutcome) -> String {
    if o.component_excluded {
        "Component excluded (contains '-' or starts with '3')".into()
    } else {
        String::new()
    }
}

fn vendor_check(verdict: VendorVerdict) -> String {
    match verdict {
        VendorVerdict::Exact => "Vendor OK (exact match)".into(),
        VendorVerdict::FoundInDescription => "Vendor OK (found in material description)".into(),
        VendorVerdict::NotFound => "Vendor Not Found".into(),
        VendorVerdict::NotApplicable => String::new(),
    }
}

fn consumption_flag(verdict: &ConsumptionVerdict) -> String {
    match verdict {
        ConsumptionVerdict::Ok { .. } => "OK".into(),
        ConsumptionVerdict::BaselineHigher { .. } => "Baseline consumption is higher".into(),
        ConsumptionVerdict::MissingValue => "Missing consumption value".into(),
        ConsumptionVerdict::NotApplicable => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcheck_recon::model::DownstreamFields;

    fn matched_outcome() -> MatchOutcome {
        MatchOutcome {
            material: "FAB-1001".into(),
            description: "Woven poly mesh".into(),
            component: "AB".into(),
            vendor: "VN-STITCH".into(),
            color: "Arctic Blue".into(),
            consumption: Quantity::Value(10.0),
            status: MatchStatus::Exact,
            component_excluded: false,
            downstream: Some(DownstreamFields {
                material: "FAB-1001".into(),
                vendor: "VN-STITCH".into(),
                color: "Arctic Blue".into(),
                consumption: Quantity::Value(12.0),
            }),
            vendor_verdict: VendorVerdict::Exact,
            consumption_verdict: ConsumptionVerdict::Ok { difference: 2.0, score: 83.33 },
            material_similarity: 100.0,
            color_similarity: 100.0,
            notes: Vec::new(),
        }
    }

    fn excluded_outcome() -> MatchOutcome {
        MatchOutcome {
            material: "FAB-1002".into(),
            description: String::new(),
            component: "3XY".into(),
            vendor: "ACME".into(),
            color: String::new(),
            consumption: Quantity::Value(4.0),
            status: MatchStatus::Skipped,
            component_excluded: true,
            downstream: None,
            vendor_verdict: VendorVerdict::NotApplicable,
            consumption_verdict: ConsumptionVerdict::NotApplicable,
            material_similarity: 0.0,
            color_similarity: 0.0,
            notes: vec!["Component excluded (contains '-' or starts with '3')".into()],
        }
    }

    fn rows(outcomes: &[MatchOutcome]) -> Vec<Vec<String>> {
        let mut buf = Vec::new();
        write_outcomes(&mut buf, outcomes).unwrap();
        let mut reader = csv::Reader::from_reader(buf.as_slice());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_matches_column_convention() {
        let mut buf = Vec::new();
        write_outcomes(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
    }

    #[test]
    fn matched_row_cells() {
        let rows = rows(&[matched_outcome()]);
        let row = &rows[0];
        assert_eq!(row[0], "FAB-1001");
        assert_eq!(row[5], "10");
        assert_eq!(row[6], "exact");
        assert_eq!(row[7], ""); // no score column for exact hits
        assert_eq!(row[9], "Vendor OK (exact match)");
        assert_eq!(row[13], "12");
        assert_eq!(row[14], "2");
        assert_eq!(row[15], "OK");
        assert_eq!(row[16], "83.33");
    }

    #[test]
    fn excluded_row_leaves_downstream_cells_blank() {
        let rows = rows(&[excluded_outcome()]);
        let row = &rows[0];
        assert_eq!(row[6], "skipped");
        assert_eq!(row[8], "Component excluded (contains '-' or starts with '3')");
        for i in [9, 10, 11, 12, 13, 14, 15, 16] {
            assert_eq!(row[i], "", "column {} should be blank", COLUMNS[i]);
        }
    }

    #[test]
    fn unmatched_row_carries_best_score() {
        let mut outcome = excluded_outcome();
        outcome.component_excluded = false;
        outcome.component = "EF".into();
        outcome.status = MatchStatus::Unmatched { best_score: Some(38.0) };
        let rows = rows(&[outcome]);
        assert_eq!(rows[0][6], "unmatched");
        assert_eq!(rows[0][7], "38");
    }
}
