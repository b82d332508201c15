//! Export helpers for plan artifacts (CSV paths, JSON summaries).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use astro_transit::TransitPlan;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// CSV row for one sampled path point.
#[derive(Debug, Clone, Serialize)]
pub struct PathRecord<'a> {
    pub archetype: &'a str,
    pub segment: &'a str,
    pub time_s: f64,
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
    pub speed_m_s: f64,
}

/// Write every sampled point of a plan as CSV rows.
pub fn write_path_csv<W: Write>(writer: W, plan: &TransitPlan) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let archetype = plan.archetype.label();
    for segment in &plan.segments {
        let segment_label = format!("{:?}", segment.kind);
        for point in &segment.points {
            csv_writer.serialize(PathRecord {
                archetype,
                segment: &segment_label,
                time_s: point.time_s,
                x_km: point.position_km[0],
                y_km: point.position_km[1],
                z_km: point.position_km[2],
                speed_m_s: point.speed_m_s,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// CSV row summarizing one candidate plan.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord<'a> {
    pub origin: &'a str,
    pub target: &'a str,
    pub archetype: &'a str,
    pub total_time_days: f64,
    pub total_delta_v_m_s: f64,
    pub fuel_used_kg: f64,
    pub arrival_speed_m_s: f64,
    pub max_accel_g: f64,
    pub insufficient_fuel: bool,
    pub hidden: bool,
}

/// Write one summary row per candidate plan.
pub fn write_summary_csv<W: Write>(writer: W, plans: &[TransitPlan]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for plan in plans {
        csv_writer.serialize(SummaryRecord {
            origin: &plan.origin_id,
            target: &plan.target_id,
            archetype: plan.archetype.label(),
            total_time_days: plan.total_time_s / 86_400.0,
            total_delta_v_m_s: plan.total_delta_v_m_s,
            fuel_used_kg: plan.fuel_used_kg,
            arrival_speed_m_s: plan.arrival_speed_m_s,
            max_accel_g: plan.max_accel_g,
            insufficient_fuel: plan.insufficient_fuel,
            hidden: plan.hidden_reason.is_some(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize a plan (segments included) as pretty JSON for the UI layer.
pub fn plan_json(plan: &TransitPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}
