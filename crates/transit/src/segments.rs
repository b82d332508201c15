//! Segment materialization: locally-linearized kinematic sampling along the
//! departure→arrival chord.
//!
//! Transit trajectories are deliberately approximated as powered
//! near-straight-line intercepts, not two-body conic arcs; the chord runs
//! from the origin at departure to the target at arrival.

use astro_core::vector::{self, Vector3};

use crate::arrival::ArrivalCost;
use crate::plan::{PathPoint, Segment, SegmentKind};
use crate::solver::{BurnProfile, coverage_m};

/// Chord geometry shared by every segment of a leg.
#[derive(Debug, Clone, Copy)]
pub struct ChordFrame {
    pub origin_position_km: Vector3,
    pub unit_chord: Vector3,
    pub chord_length_km: f64,
}

pub struct SegmentInputs<'a> {
    pub frame: ChordFrame,
    pub profile: &'a BurnProfile,
    pub accel_m_s2: f64,
    pub v0_m_s: f64,
    pub start_time_s: f64,
    pub total_time_s: f64,
    pub arrival: &'a ArrivalCost,
    pub samples_per_segment: usize,
    pub aerobrake_segment_fraction: f64,
}

/// Emit the ordered, time-contiguous segment list for a solved leg.
pub fn materialize(inputs: &SegmentInputs<'_>) -> Vec<Segment> {
    let total = inputs.total_time_s;
    let ta = inputs.profile.accel_fraction * total;
    let tb = inputs.profile.brake_fraction * total;
    let tc = (total - ta - tb).max(0.0);
    let a = inputs.accel_m_s2;

    // The kinematic coverage and the chord disagree by the bisection
    // tolerance; scale sampled distances so the last point lands on the
    // target exactly (chained legs depart from it verbatim).
    let covered = coverage_m(inputs.profile, inputs.v0_m_s, a, total);
    let scale_km_per_m = if covered > 0.0 {
        inputs.frame.chord_length_km / covered
    } else {
        0.0
    };

    let arrival_propulsive = inputs.arrival.propulsive_dv_m_s();
    let aerobraked = inputs.arrival.aerobraked_dv_m_s;

    let mut spans: Vec<(SegmentKind, f64, f64, f64)> = Vec::new();
    if ta > 0.0 {
        spans.push((SegmentKind::Accelerate, 0.0, ta, a * ta));
    }
    if tc > 0.0 {
        spans.push((SegmentKind::Coast, ta, ta + tc, 0.0));
    }
    if tb > 0.0 {
        if aerobraked > 0.0 && inputs.aerobrake_segment_fraction > 0.0 {
            let t_aero = tb * inputs.aerobrake_segment_fraction.clamp(0.0, 1.0);
            let t_split = total - t_aero;
            spans.push((
                SegmentKind::Brake,
                ta + tc,
                t_split,
                a * (tb - t_aero) + arrival_propulsive,
            ));
            // Speed shed in the atmosphere costs no propellant; only the
            // engine share is billed as delta-v.
            spans.push((SegmentKind::Aerobrake, t_split, total, a * t_aero));
        } else {
            spans.push((SegmentKind::Brake, ta + tc, total, a * tb + arrival_propulsive));
        }
    } else if arrival_propulsive > 0.0 || aerobraked > 0.0 {
        // No brake phase in the profile; carry the arrival burn as an
        // instantaneous terminal segment so the timeline stays covered.
        let kind = if aerobraked > 0.0 {
            SegmentKind::Aerobrake
        } else {
            SegmentKind::Brake
        };
        spans.push((kind, total, total, arrival_propulsive));
    }

    spans
        .into_iter()
        .map(|(kind, t_begin, t_end, delta_v)| Segment {
            kind,
            start_time_s: inputs.start_time_s + t_begin,
            end_time_s: inputs.start_time_s + t_end,
            delta_v_m_s: delta_v,
            points: sample_span(inputs, t_begin, t_end, scale_km_per_m),
        })
        .collect()
}

/// Distance travelled (m) and speed (m/s) at profile-relative time `t`.
fn kinematics_at(inputs: &SegmentInputs<'_>, t: f64) -> (f64, f64) {
    let total = inputs.total_time_s;
    let ta = inputs.profile.accel_fraction * total;
    let tb = inputs.profile.brake_fraction * total;
    let tc = (total - ta - tb).max(0.0);
    let a = inputs.accel_m_s2;
    let v0 = inputs.v0_m_s;

    let v1 = v0 + a * ta;
    if t <= ta {
        return (v0 * t + 0.5 * a * t * t, v0 + a * t);
    }
    let d_accel = v0 * ta + 0.5 * a * ta * ta;
    if t <= ta + tc {
        let tau = t - ta;
        return (d_accel + v1 * tau, v1);
    }
    let d_coast = d_accel + v1 * tc;
    let tau = (t - ta - tc).min(tb);
    (d_coast + v1 * tau - 0.5 * a * tau * tau, v1 - a * tau)
}

fn sample_span(
    inputs: &SegmentInputs<'_>,
    t_begin: f64,
    t_end: f64,
    scale_km_per_m: f64,
) -> Vec<PathPoint> {
    let n = inputs.samples_per_segment.max(2);
    let span = t_end - t_begin;
    (0..n)
        .map(|i| {
            let frac = i as f64 / (n - 1) as f64;
            let t = t_begin + span * frac;
            let (distance_m, speed) = kinematics_at(inputs, t);
            let along_km = distance_m * scale_km_per_m;
            PathPoint {
                time_s: inputs.start_time_s + t,
                position_km: vector::add(
                    &inputs.frame.origin_position_km,
                    &vector::scale(&inputs.frame.unit_chord, along_km),
                ),
                speed_m_s: speed.abs(),
            }
        })
        .collect()
}
