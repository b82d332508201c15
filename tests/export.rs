use std::io::Write;

use astrogator::config::RulesConfig;
use astrogator::export::{plan_json, write_path_csv, write_summary_csv, writer_for_path};
use astrogator::system::{BodyNode, SystemSnapshot};
use astrogator::transit::{
    ArrivalTarget, ManeuverParams, PlanMode, ShipModel, TransitPlan, TransitRequest, plan_transits,
};

fn sample_plans() -> Vec<TransitPlan> {
    let nodes: Vec<BodyNode> = serde_yaml::from_str(
        r#"
- id: star
  name: Star
  kind: star
  mass_kg: 1.9885e30
  radius_km: 695700.0
  surface_temperature_k: 5772.0
- id: a
  name: A
  kind: planet
  parent_id: star
  mass_kg: 5.972e24
  radius_km: 6371.0
  orbit:
    host_id: star
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 1.496e8
      eccentricity: 0.0
- id: b
  name: B
  kind: planet
  parent_id: star
  mass_kg: 5.972e24
  radius_km: 6371.0
  orbit:
    host_id: star
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 2.0944e8
      eccentricity: 0.0
"#,
    )
    .expect("nodes parse");
    let snapshot = SystemSnapshot::from_nodes(nodes);
    let request = TransitRequest {
        origin_id: "a".to_string(),
        target_id: "b".to_string(),
        departure_time_s: 0.0,
        ship: ShipModel {
            wet_mass_kg: 3.0e6,
            dry_mass_kg: 2.4e6,
            thrust_n: 1.5e6,
            isp_s: 50_000.0,
            fuel_available_kg: 6.0e5,
            aerobrake_capable: false,
        },
        params: ManeuverParams::default(),
        arrival: ArrivalTarget::Intercept,
        chain_state: None,
    };
    plan_transits(&snapshot, &request, PlanMode::Survey, &RulesConfig::default()).expect("plans")
}

#[test]
fn summary_csv_has_one_row_per_plan() {
    let plans = sample_plans();
    let mut buffer = Vec::new();
    write_summary_csv(&mut buffer, &plans).expect("write summary");

    let text = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), plans.len() + 1, "header plus one row per plan");
    assert!(lines[0].contains("archetype"));
    assert!(lines[1].starts_with("a,b,Economy"));
}

#[test]
fn path_csv_rows_match_sampled_points() {
    let plans = sample_plans();
    let plan = &plans[0];
    let mut buffer = Vec::new();
    write_path_csv(&mut buffer, plan).expect("write path");

    let text = String::from_utf8(buffer).expect("utf8");
    let points: usize = plan.segments.iter().map(|s| s.points.len()).sum();
    assert_eq!(text.lines().count(), points + 1);
}

#[test]
fn plan_json_round_trips_key_fields() {
    let plans = sample_plans();
    let json = plan_json(&plans[0]).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
    assert_eq!(value["origin_id"], "a");
    assert_eq!(value["target_id"], "b");
    assert!(value["segments"].as_array().map(|s| !s.is_empty()).unwrap_or(false));
}

#[test]
fn writer_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("out/deep/summary.csv");
    {
        let mut writer = writer_for_path(&nested).expect("writer");
        writer.write_all(b"x\n").expect("write");
    }
    assert!(nested.is_file());
}
