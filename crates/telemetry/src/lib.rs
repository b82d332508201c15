//! Mission-progress telemetry over one or more planned legs.
//!
//! A global 0–1 progress fraction maps across heterogeneous-duration legs
//! (completed and previewed alike) to the correct leg and segment, yielding
//! time-indexed position, acceleration, and proximity-derived hazards.
//! The timeline anchors at the first departure unless an earlier mission
//! start is supplied, in which case leading fractions sample the
//! pre-departure hold.

use serde::Serialize;

use astro_core::vector::{self, Vector3};
use astro_config::RulesConfig;
use astro_system::SystemSnapshot;
use astro_transit::{SegmentKind, TransitPlan};
use astro_zones::hazard_radii_km;

/// Where in the mission a sample falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleState {
    /// Before the first departure, or holding between legs.
    Waiting,
    Transit {
        leg_index: usize,
        segment_kind: SegmentKind,
    },
    Arrived,
}

/// Proximity and load hazard levels; 1.0 marks the configured reference
/// threshold, values above it mean the threshold is exceeded.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct HazardLevels {
    pub radiation: f64,
    pub thermal: f64,
    pub structural_g: f64,
}

/// One telemetry sample along the mission timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryPoint {
    pub fraction: f64,
    pub time_s: f64,
    pub state: SampleState,
    pub position_km: Option<Vector3>,
    pub speed_m_s: f64,
    pub accel_g: f64,
    pub hazards: HazardLevels,
}

/// Map a global progress fraction to a mission sample (hazards not yet
/// attached; see [`flight_telemetry`]). The timeline is anchored at the
/// first departure.
pub fn sample_at(plans: &[TransitPlan], fraction: f64) -> TelemetryPoint {
    sample_at_anchored(plans, fraction, None)
}

/// Like [`sample_at`], but when `mission_start_s` precedes the first
/// departure the timeline is anchored there, so early fractions sample the
/// pre-departure hold at the origin point.
pub fn sample_at_anchored(
    plans: &[TransitPlan],
    fraction: f64,
    mission_start_s: Option<f64>,
) -> TelemetryPoint {
    let fraction = fraction.clamp(0.0, 1.0);
    let Some(first) = plans.first() else {
        return TelemetryPoint {
            fraction,
            time_s: mission_start_s.unwrap_or(0.0),
            state: SampleState::Waiting,
            position_km: None,
            speed_m_s: 0.0,
            accel_g: 0.0,
            hazards: HazardLevels::default(),
        };
    };
    let departure = first.start_time_s;
    let start = mission_start_s.map_or(departure, |t| t.min(departure));
    let end = plans
        .iter()
        .map(|p| p.start_time_s + p.total_time_s)
        .fold(start, f64::max);
    let time = start + (end - start) * fraction;

    // Locate the leg covering this instant; gaps (including a pre-departure
    // hold) park at the last known position.
    let mut holding_position = first
        .segments
        .first()
        .and_then(|s| s.points.first())
        .map(|p| p.position_km);
    for (leg_index, plan) in plans.iter().enumerate() {
        let leg_end = plan.start_time_s + plan.total_time_s;
        if time < plan.start_time_s {
            return TelemetryPoint {
                fraction,
                time_s: time,
                state: SampleState::Waiting,
                position_km: holding_position,
                speed_m_s: 0.0,
                accel_g: 0.0,
                hazards: HazardLevels::default(),
            };
        }
        if time <= leg_end {
            return sample_leg(plan, leg_index, fraction, time);
        }
        holding_position = Some(plan.final_state.position_km);
    }

    TelemetryPoint {
        fraction,
        time_s: time,
        state: SampleState::Arrived,
        position_km: holding_position,
        speed_m_s: 0.0,
        accel_g: 0.0,
        hazards: HazardLevels::default(),
    }
}

fn sample_leg(plan: &TransitPlan, leg_index: usize, fraction: f64, time: f64) -> TelemetryPoint {
    for segment in &plan.segments {
        if time > segment.end_time_s {
            continue;
        }
        let accel_g = match segment.kind {
            SegmentKind::Coast => 0.0,
            _ => plan.max_accel_g,
        };
        let (position, speed) = interpolate_points(segment, time);
        return TelemetryPoint {
            fraction,
            time_s: time,
            state: SampleState::Transit {
                leg_index,
                segment_kind: segment.kind,
            },
            position_km: position,
            speed_m_s: speed,
            accel_g,
            hazards: HazardLevels::default(),
        };
    }

    TelemetryPoint {
        fraction,
        time_s: time,
        state: SampleState::Arrived,
        position_km: Some(plan.final_state.position_km),
        speed_m_s: plan.arrival_speed_m_s,
        accel_g: 0.0,
        hazards: HazardLevels::default(),
    }
}

fn interpolate_points(
    segment: &astro_transit::Segment,
    time: f64,
) -> (Option<Vector3>, f64) {
    let points = &segment.points;
    if points.is_empty() {
        return (None, 0.0);
    }
    let mut prev = &points[0];
    for point in points.iter().skip(1) {
        if time <= point.time_s {
            let span = point.time_s - prev.time_s;
            let t = if span > 0.0 { (time - prev.time_s) / span } else { 0.0 };
            let position = vector::lerp(&prev.position_km, &point.position_km, t);
            let speed = prev.speed_m_s + (point.speed_m_s - prev.speed_m_s) * t;
            return (Some(position), speed);
        }
        prev = point;
    }
    (Some(prev.position_km), prev.speed_m_s)
}

/// Sampled telemetry for a whole mission, hazards included.
pub fn flight_telemetry(
    snapshot: &SystemSnapshot,
    plans: &[TransitPlan],
    rules: &RulesConfig,
) -> Vec<TelemetryPoint> {
    let count = rules.telemetry.sample_count.max(2);
    let star_radii = plans
        .first()
        .and_then(|p| snapshot.primary_star(&p.target_id).ok().flatten())
        .map(|star| (star.id.clone(), hazard_radii_km(star, &rules.zones)));

    (0..count)
        .map(|i| {
            let fraction = i as f64 / (count - 1) as f64;
            let mut point = sample_at(plans, fraction);
            point.hazards = hazard_levels(snapshot, &point, star_radii.as_ref(), rules);
            point
        })
        .collect()
}

fn hazard_levels(
    snapshot: &SystemSnapshot,
    point: &TelemetryPoint,
    star_radii: Option<&(String, (f64, f64))>,
    rules: &RulesConfig,
) -> HazardLevels {
    let structural = point.accel_g / rules.transit.high_g_threshold_g.max(1e-9);

    let (radiation, thermal) = match (point.position_km, star_radii) {
        (Some(position), Some((star_id, (kill_km, danger_km)))) => {
            let distance = snapshot
                .absolute_state(star_id, point.time_s)
                .map(|s| vector::norm(&vector::sub(&position, &s.position_km)))
                .unwrap_or(f64::INFINITY);
            if distance > 0.0 && distance.is_finite() {
                // Inverse-square falloff indexed to the zone radii.
                let radiation = (kill_km / distance).powi(2)
                    * rules.telemetry.radiation_reference_fraction;
                let thermal = (danger_km / distance).powi(2)
                    * rules.telemetry.thermal_reference_fraction;
                (radiation, thermal)
            } else {
                (0.0, 0.0)
            }
        }
        _ => (0.0, 0.0),
    };

    HazardLevels {
        radiation,
        thermal,
        structural_g: structural,
    }
}
