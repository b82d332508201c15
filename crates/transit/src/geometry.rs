//! Endpoint geometry: departure/arrival states from the body graph or a
//! carried-over chain state, plus Lagrange-offset intercept points.

use astro_core::vector::{self, Vector3};
use astro_orbits::StateVector;
use astro_system::{SystemError, SystemSnapshot};

use crate::plan::{ArrivalTarget, ChainState, LagrangePoint};

/// Departure state for a leg: the chained state when present, otherwise the
/// origin body's propagated absolute state.
pub fn departure_state(
    snapshot: &SystemSnapshot,
    origin_id: &str,
    departure_time_s: f64,
    chain: Option<&ChainState>,
) -> Result<StateVector, SystemError> {
    if let Some(state) = chain {
        return Ok(StateVector {
            position_km: state.position_km,
            velocity_km_s: state.velocity_km_s,
        });
    }
    snapshot.absolute_state(origin_id, departure_time_s)
}

/// Arrival-point state at time `t`: the target body's absolute state, offset
/// ±60° along its orbit for Lagrange placements.
pub fn arrival_point(
    snapshot: &SystemSnapshot,
    target_id: &str,
    t_s: f64,
    arrival: &ArrivalTarget,
) -> Result<StateVector, SystemError> {
    let state = snapshot.absolute_state(target_id, t_s)?;
    let ArrivalTarget::Lagrange(point) = arrival else {
        return Ok(state);
    };

    let node = snapshot.node(target_id)?;
    let Some(parent_id) = node.parent_id.as_deref() else {
        // Root bodies have no orbit to offset along.
        return Ok(state);
    };
    let host = snapshot.absolute_state(parent_id, t_s)?;

    let rel_pos = vector::sub(&state.position_km, &host.position_km);
    let rel_vel = vector::sub(&state.velocity_km_s, &host.velocity_km_s);

    // L4 leads the body along its track, L5 trails it.
    let angle = match point {
        LagrangePoint::L4 => std::f64::consts::FRAC_PI_3,
        LagrangePoint::L5 => -std::f64::consts::FRAC_PI_3,
    };
    let normal = vector::unit(&vector::cross(&rel_pos, &rel_vel));
    if vector::norm(&normal) == 0.0 {
        return Ok(state);
    }

    Ok(StateVector {
        position_km: vector::add(&host.position_km, &rotate_about(&rel_pos, &normal, angle)),
        velocity_km_s: vector::add(&host.velocity_km_s, &rotate_about(&rel_vel, &normal, angle)),
    })
}

/// Rodrigues rotation of `v` about the unit `axis` by `angle`.
fn rotate_about(v: &Vector3, axis: &Vector3, angle: f64) -> Vector3 {
    let (sin_a, cos_a) = angle.sin_cos();
    let cross = vector::cross(axis, v);
    let dot = vector::dot(axis, v);
    vector::add(
        &vector::add(&vector::scale(v, cos_a), &vector::scale(&cross, sin_a)),
        &vector::scale(axis, dot * (1.0 - cos_a)),
    )
}
