//! Config-to-export pipeline, exercised against files on disk the way the
//! binary drives it.

use matcheck_cli::{export, load_input};
use matcheck_recon::model::MatchStatus;
use matcheck_recon::ReconcileConfig;

const CONFIG: &str = r#"
name = "Pipeline Test"
threshold = 85

[baseline]
file = "baseline.csv"

[baseline.columns]
material    = "Material"
component   = "Component"
description = "Material Description"
vendor      = "Vendor Reference"
color       = "Color"
consumption = "Comp.Qty."

[downstream]
file = "downstream.csv"

[downstream.columns]
material    = "Item No"
vendor      = "Supplier"
color       = "Colour"
consumption = "Qty(Cons.)"
"#;

const BASELINE_CSV: &str = "\
Material,Component,Material Description,Vendor Reference,Color,Comp.Qty.
FAB-1001,AB,Woven poly mesh,VN-STITCH,Arctic Blue,10
FAB-1002,3XY,Nylon rip-stop,ACME,Jet Black,4
ZIP-9000,EF,Coil zipper tape,QQ,,3
";

const DOWNSTREAM_CSV: &str = "\
Item No,Supplier,Colour,Qty(Cons.)
FAB-1001,VN-STITCH,Arctic Blue,12
";

#[test]
fn run_and_export_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recon.toml"), CONFIG).unwrap();
    std::fs::write(dir.path().join("baseline.csv"), BASELINE_CSV).unwrap();
    std::fs::write(dir.path().join("downstream.csv"), DOWNSTREAM_CSV).unwrap();

    let config_str = std::fs::read_to_string(dir.path().join("recon.toml")).unwrap();
    let config = ReconcileConfig::from_toml(&config_str).unwrap();
    let input = load_input(&config, dir.path()).unwrap_or_else(|e| panic!("{}", e.message));

    let result = matcheck_recon::run(&config, &input).unwrap();
    assert_eq!(result.summary.total, 3);
    assert_eq!(result.summary.unmatched, 1);
    assert_eq!(result.summary.component_excluded, 1);

    let mut buf = Vec::new();
    export::write_outcomes(&mut buf, &result.outcomes).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4); // header + one row per baseline record
    assert!(lines[1].starts_with("FAB-1001,"));
    assert!(lines[2].contains("Component excluded"));

    let mut missing = Vec::new();
    export::write_outcomes(&mut missing, &result.unmatched).unwrap();
    let missing = String::from_utf8(missing).unwrap();
    assert_eq!(missing.lines().count(), 2);
    assert!(missing.lines().nth(1).unwrap().starts_with("ZIP-9000,"));
}

#[test]
fn load_input_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("baseline.csv"), BASELINE_CSV).unwrap();
    // downstream.csv deliberately absent
    let config = ReconcileConfig::from_toml(CONFIG).unwrap();

    let err = match load_input(&config, dir.path()) {
        Err(e) => e,
        Ok(_) => panic!("expected missing-file error"),
    };
    assert!(err.message.contains("downstream.csv"));
}

#[test]
fn unmatched_export_is_input_ordered_subset() {
    let config = ReconcileConfig::from_toml(CONFIG).unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("baseline.csv"), BASELINE_CSV).unwrap();
    std::fs::write(dir.path().join("downstream.csv"), DOWNSTREAM_CSV).unwrap();
    let input = load_input(&config, dir.path()).unwrap_or_else(|e| panic!("{}", e.message));

    let result = matcheck_recon::run(&config, &input).unwrap();
    for outcome in &result.unmatched {
        assert!(matches!(outcome.status, MatchStatus::Unmatched { .. }));
    }
}
