//! Newton–Raphson solver for Kepler's equation `E - e·sin E = M`.

use std::f64::consts::{PI, TAU};

/// Default convergence tolerance on the Kepler residual (radians).
pub const DEFAULT_TOLERANCE: f64 = 1.0e-9;
/// Default iteration cap for the Newton–Raphson loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Outcome of a Kepler solve. Non-convergence is reported, never thrown:
/// callers dragging a slider through transient states want the best iterate.
#[derive(Debug, Clone, Copy)]
pub struct KeplerSolution {
    pub eccentric_anomaly_rad: f64,
    pub iterations: usize,
    pub converged: bool,
    pub residual: f64,
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// `mean_anomaly_rad` may be any real angle; `eccentricity` is assumed to be
/// in `[0, 1)`. The iteration count is capped, and the last iterate is
/// returned with `converged: false` when the residual tolerance is not met.
pub fn solve_kepler(
    mean_anomaly_rad: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: usize,
) -> KeplerSolution {
    let m = normalize_angle(mean_anomaly_rad);

    // Standard starting guess: M for mild eccentricity, ±π otherwise, which
    // keeps Newton steps stable near e → 1.
    let mut e_anom = if eccentricity < 0.8 {
        m
    } else if m >= 0.0 {
        PI
    } else {
        -PI
    };

    let mut iterations = 0;
    let mut residual = e_anom - eccentricity * e_anom.sin() - m;

    while residual.abs() > tolerance && iterations < max_iterations {
        let derivative = 1.0 - eccentricity * e_anom.cos();
        if derivative.abs() < 1.0e-12 {
            break;
        }
        e_anom -= residual / derivative;
        residual = e_anom - eccentricity * e_anom.sin() - m;
        iterations += 1;
    }

    KeplerSolution {
        eccentric_anomaly_rad: e_anom,
        iterations,
        converged: residual.abs() <= tolerance,
        residual,
    }
}

/// Wrap an angle into `(-π, π]`.
pub fn normalize_angle(angle_rad: f64) -> f64 {
    let wrapped = angle_rad.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
