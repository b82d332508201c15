//! Two-body propagation of orbital elements to a host-centered state.

use std::f64::consts::TAU;

use astro_core::vector::Vector3;

use crate::kepler::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, solve_kepler};
use crate::{Orbit, StateVector};

/// Orbital period in seconds, or zero when the inputs are degenerate.
pub fn orbital_period(semi_major_axis_km: f64, mu_km3_s2: f64) -> f64 {
    if semi_major_axis_km <= 0.0 || mu_km3_s2 <= 0.0 {
        return 0.0;
    }
    TAU * (semi_major_axis_km.powi(3) / mu_km3_s2).sqrt()
}

/// Propagate an orbit to time `t_s`, returning the host-centered state.
///
/// Degenerate inputs (`μ ≤ 0` or `a ≤ 0`) return the host position unchanged
/// rather than dividing by zero. A fixed angular rate, when set, replaces
/// Keplerian mean motion with rigid rotation at radius `a` (surface lock).
pub fn propagate(orbit: &Orbit, t_s: f64) -> StateVector {
    let el = &orbit.elements;
    let a = el.semi_major_axis_km;
    let mu = orbit.mu_km3_s2;

    if a <= 0.0 {
        return StateVector::zero();
    }

    let dt = t_s - orbit.epoch_s;

    if let Some(rate) = el.fixed_angular_rate_rad_s {
        let angle = el.mean_anomaly_epoch_rad + rate * dt;
        let (sin_th, cos_th) = angle.sin_cos();
        // Circular motion in the orbital plane at the lock radius.
        return rotate_to_host(
            el,
            [a * cos_th, a * sin_th, 0.0],
            [-a * rate * sin_th, a * rate * cos_th, 0.0],
        );
    }

    if mu <= 0.0 {
        return StateVector::zero();
    }

    let e = el.eccentricity.clamp(0.0, 0.999_999);
    let mean_motion = (mu / a.powi(3)).sqrt();
    let mean_anomaly = el.mean_anomaly_epoch_rad + mean_motion * dt;

    let solution = solve_kepler(mean_anomaly, e, DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS);
    let big_e = solution.eccentric_anomaly_rad;
    let (sin_e, cos_e) = big_e.sin_cos();

    let radius = a * (1.0 - e * cos_e);
    let sqrt_one_minus_e2 = (1.0 - e * e).sqrt();

    // Perifocal frame: x toward periapsis, y along motion at periapsis.
    let position = [a * (cos_e - e), a * sqrt_one_minus_e2 * sin_e, 0.0];

    // dE/dt from the differentiated Kepler equation.
    let e_dot = if radius > 0.0 { mean_motion * a / radius } else { 0.0 };
    let velocity = [
        -a * sin_e * e_dot,
        a * sqrt_one_minus_e2 * cos_e * e_dot,
        0.0,
    ];

    rotate_to_host(el, position, velocity)
}

/// Rotate perifocal coordinates into the host frame via Rz(Ω)·Rx(i)·Rz(ω).
fn rotate_to_host(
    el: &crate::OrbitalElements,
    perifocal_pos: Vector3,
    perifocal_vel: Vector3,
) -> StateVector {
    let (sin_w, cos_w) = el.arg_periapsis_rad.sin_cos();
    let (sin_i, cos_i) = el.inclination_rad.sin_cos();
    let (sin_o, cos_o) = el.ascending_node_rad.sin_cos();

    let r11 = cos_o * cos_w - sin_o * sin_w * cos_i;
    let r12 = -cos_o * sin_w - sin_o * cos_w * cos_i;
    let r21 = sin_o * cos_w + cos_o * sin_w * cos_i;
    let r22 = -sin_o * sin_w + cos_o * cos_w * cos_i;
    let r31 = sin_w * sin_i;
    let r32 = cos_w * sin_i;

    let rotate = |v: &Vector3| -> Vector3 {
        [
            r11 * v[0] + r12 * v[1],
            r21 * v[0] + r22 * v[1],
            r31 * v[0] + r32 * v[1],
        ]
    };

    StateVector {
        position_km: rotate(&perifocal_pos),
        velocity_km_s: rotate(&perifocal_vel),
    }
}
