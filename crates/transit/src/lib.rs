//! Multi-archetype transit planning between bodies of a system snapshot.
//!
//! One shared solver serves every archetype; a preset only changes the burn
//! fractions fed into it. Every entry point is a pure function of
//! `(snapshot, request, rules)` so callers can re-solve speculatively on
//! each slider drag without corrupting committed state.

use thiserror::Error;

use astro_core::constants::G0;
use astro_core::units::{kms_to_ms, ms_to_kms};
use astro_core::vector;
use astro_config::RulesConfig;
use astro_orbits::{OrbitError, StateVector};
use astro_performance::fuel_for_delta_v_kg;
use astro_system::{SystemError, SystemSnapshot};

pub mod arrival;
pub mod geometry;
pub mod hazards;
pub mod plan;
pub mod segments;
pub mod solver;

pub use plan::{
    Archetype, ArrivalTarget, ChainState, LagrangePoint, ManeuverParams, PathPoint, PlanMode,
    Segment, SegmentKind, ShipModel, TransitPlan, TransitRequest,
};

/// Planner entry failures. Feasibility problems (fuel, delta-v ceiling) are
/// annotations on the returned plans, never errors.
#[derive(Debug, Error)]
pub enum TransitError {
    #[error("origin and target are the same body '{0}'")]
    IdenticalEndpoints(String),
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("invalid orbit for body '{id}': {source}")]
    InvalidElements {
        id: String,
        #[source]
        source: OrbitError,
    },
    #[error("no archetype produced a transfer from '{origin}' to '{target}'")]
    NoSolution { origin: String, target: String },
}

/// Plan one leg under the requested mode, returning every candidate,
/// visible and hidden alike, in archetype order.
pub fn plan_transits(
    snapshot: &SystemSnapshot,
    request: &TransitRequest,
    mode: PlanMode,
    rules: &RulesConfig,
) -> Result<Vec<TransitPlan>, TransitError> {
    if request.origin_id == request.target_id {
        return Err(TransitError::IdenticalEndpoints(request.origin_id.clone()));
    }
    validate_endpoint(snapshot, &request.origin_id)?;
    validate_endpoint(snapshot, &request.target_id)?;

    let archetypes = match mode {
        PlanMode::Survey => vec![Archetype::Economy, Archetype::Fast, Archetype::Custom],
        PlanMode::Single(single) => vec![single],
    };

    let mut plans = Vec::new();
    for archetype in archetypes {
        if let Some(plan) = solve_leg(snapshot, request, archetype, rules)? {
            plans.push(plan);
        }
    }

    if plans.is_empty() {
        return Err(TransitError::NoSolution {
            origin: request.origin_id.clone(),
            target: request.target_id.clone(),
        });
    }
    Ok(plans)
}

fn validate_endpoint(snapshot: &SystemSnapshot, id: &str) -> Result<(), TransitError> {
    let node = snapshot.node(id)?;
    if let Some(orbit) = &node.orbit {
        orbit.validate().map_err(|source| TransitError::InvalidElements {
            id: id.to_string(),
            source,
        })?;
    }
    Ok(())
}

/// Burn fractions for an archetype.
fn profile_for(
    archetype: Archetype,
    params: &ManeuverParams,
    rules: &RulesConfig,
) -> solver::BurnProfile {
    let t = &rules.transit;
    match archetype {
        Archetype::Economy => {
            solver::BurnProfile::clamped(t.economy_burn_fraction, t.economy_burn_fraction)
        }
        Archetype::Fast => solver::BurnProfile::clamped(0.5, 0.5),
        Archetype::Custom => solver::BurnProfile::clamped(
            params.accel_fraction.unwrap_or(t.custom_accel_fraction),
            params.brake_fraction.unwrap_or(t.custom_brake_fraction),
        ),
    }
}

/// Solve a single archetype. `Ok(None)` means this preset found no transfer
/// inside the time bounds; other presets may still succeed.
fn solve_leg(
    snapshot: &SystemSnapshot,
    request: &TransitRequest,
    archetype: Archetype,
    rules: &RulesConfig,
) -> Result<Option<TransitPlan>, TransitError> {
    let t0 = request.departure_time_s;
    let ship = &request.ship;
    let params = &request.params;
    let profile = profile_for(archetype, params, rules);

    if ship.thrust_n <= 0.0 || ship.wet_mass_kg <= 0.0 {
        return Ok(None);
    }

    let departure = geometry::departure_state(
        snapshot,
        &request.origin_id,
        t0,
        request.chain_state.as_ref(),
    )?;
    // Probe the arrival resolution once so lookup errors surface as errors
    // rather than being swallowed inside the solver closures.
    let _ = geometry::arrival_point(snapshot, &request.target_id, t0, &request.arrival)?;

    let arrival_at = |t: f64| -> StateVector {
        geometry::arrival_point(snapshot, &request.target_id, t, &request.arrival)
            .unwrap_or_else(|_| StateVector::zero())
    };

    let chord_m = |transfer_s: f64| -> f64 {
        let target = arrival_at(t0 + transfer_s);
        kms_to_ms(vector::norm(&vector::sub(
            &target.position_km,
            &departure.position_km,
        )))
    };
    let closing_speed = |transfer_s: f64| -> f64 {
        let target = arrival_at(t0 + transfer_s);
        let chord = vector::sub(&target.position_km, &departure.position_km);
        let unit = vector::unit(&chord);
        let relative = vector::sub(&departure.velocity_km_s, &target.velocity_km_s);
        kms_to_ms(vector::dot(&relative, &unit))
    };

    // Averaged-mass self-consistency: thrust/mass changes as propellant
    // burns, so the acceleration, transfer time, and fuel are re-evaluated
    // against the mid-burn mass a fixed number of times.
    let tr = &rules.transit;
    let max_accel = params.max_accel_g.max(0.0) * G0;
    let mut average_mass = ship.wet_mass_kg;
    let mut solution = None;
    let mut accel_m_s2 = 0.0;
    let mut arrival_cost = None;
    let mut fuel_used = 0.0;

    for _ in 0..tr.mass_iterations.max(1) {
        accel_m_s2 = (ship.thrust_n / average_mass).min(max_accel);
        if accel_m_s2 <= 0.0 {
            return Ok(None);
        }

        let Some(found) = solver::solve_transfer_time(
            &profile,
            accel_m_s2,
            chord_m,
            closing_speed,
            tr.min_transfer_time_s,
            tr.max_transfer_time_s,
            tr.time_tolerance_s,
            tr.max_bisection_iterations,
        ) else {
            return Ok(None);
        };

        let v0 = closing_speed(found.total_time_s);
        let vf = solver::final_speed_m_s(&profile, v0, accel_m_s2, found.total_time_s);
        let cost = arrival::arrival_cost(
            snapshot,
            &request.target_id,
            &request.arrival,
            params,
            ship,
            vf,
            rules,
        )?;

        let burn_dv = solver::burn_delta_v_m_s(&profile, accel_m_s2, found.total_time_s);
        let propulsive_dv = burn_dv + cost.propulsive_dv_m_s();
        fuel_used = fuel_for_delta_v_kg(ship.wet_mass_kg, ship.isp_s, propulsive_dv);

        solution = Some(found);
        arrival_cost = Some(cost);
        average_mass = (ship.wet_mass_kg - fuel_used * 0.5).max(ship.dry_mass_kg.max(1.0));
    }

    let (Some(found), Some(cost)) = (solution, arrival_cost) else {
        return Ok(None);
    };
    let total_time = found.total_time_s;

    // Final geometry at the solved arrival time.
    let target = arrival_at(t0 + total_time);
    let chord_vec = vector::sub(&target.position_km, &departure.position_km);
    let chord_km = vector::norm(&chord_vec);
    let unit_chord = vector::unit(&chord_vec);
    let v0 = closing_speed(total_time);
    let vf = solver::final_speed_m_s(&profile, v0, accel_m_s2, total_time);

    let segs = segments::materialize(&segments::SegmentInputs {
        frame: segments::ChordFrame {
            origin_position_km: departure.position_km,
            unit_chord,
            chord_length_km: chord_km,
        },
        profile: &profile,
        accel_m_s2,
        v0_m_s: v0,
        start_time_s: t0,
        total_time_s: total_time,
        arrival: &cost,
        samples_per_segment: tr.samples_per_segment,
        aerobrake_segment_fraction: tr.aerobrake_segment_fraction,
    });

    let total_delta_v: f64 = segs.iter().map(|s| s.delta_v_m_s).sum();
    let max_accel_g = accel_m_s2 / G0;
    let tags = hazards::annotate(snapshot, &request.target_id, &segs, max_accel_g, rules);

    let hidden_reason = (total_delta_v > tr.delta_v_ceiling_m_s).then(|| {
        format!(
            "delta-v {:.0} m/s exceeds the {:.0} m/s practical ceiling",
            total_delta_v, tr.delta_v_ceiling_m_s
        )
    });

    // Chained legs depart from the final sampled point verbatim.
    let arrival_position = segs
        .last()
        .and_then(|s| s.points.last())
        .map(|p| p.position_km)
        .unwrap_or(target.position_km);
    let residual_km_s = ms_to_kms(vf.signum() * cost.arrival_speed_m_s);
    let final_state = ChainState {
        time_s: t0 + total_time,
        position_km: arrival_position,
        velocity_km_s: vector::add(
            &target.velocity_km_s,
            &vector::scale(&unit_chord, residual_km_s),
        ),
        fuel_remaining_kg: (ship.fuel_available_kg - fuel_used).max(0.0),
    };

    Ok(Some(TransitPlan {
        origin_id: request.origin_id.clone(),
        target_id: request.target_id.clone(),
        archetype,
        start_time_s: t0,
        total_time_s: total_time,
        total_delta_v_m_s: total_delta_v,
        fuel_used_kg: fuel_used,
        arrival_speed_m_s: cost.arrival_speed_m_s,
        max_accel_g,
        segments: segs,
        tags,
        hidden_reason,
        insufficient_fuel: fuel_used > ship.fuel_available_kg,
        converged: found.converged,
        final_state,
    }))
}
