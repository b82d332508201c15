//! Patched-conic manoeuvre estimators and the coplanar Hohmann cross-check.

/// Circular orbit speed at the given radius (km/s), zero when degenerate.
pub fn circular_speed(mu_km3_s2: f64, radius_km: f64) -> f64 {
    if mu_km3_s2 <= 0.0 || radius_km <= 0.0 {
        return 0.0;
    }
    (mu_km3_s2 / radius_km).sqrt()
}

/// Patched-conic escape delta-v from a circular parking orbit.
pub fn escape_delta_v(mu_km3_s2: f64, parking_radius_km: f64, vinf_km_s: f64) -> f64 {
    if mu_km3_s2 <= 0.0 || parking_radius_km <= 0.0 {
        return vinf_km_s.max(0.0);
    }
    let circular = (mu_km3_s2 / parking_radius_km).sqrt();
    let hyperbolic = (vinf_km_s * vinf_km_s + 2.0 * mu_km3_s2 / parking_radius_km).sqrt();
    (hyperbolic - circular).max(0.0)
}

/// Patched-conic capture delta-v into a circular parking orbit.
pub fn capture_delta_v(mu_km3_s2: f64, parking_radius_km: f64, vinf_km_s: f64) -> f64 {
    if mu_km3_s2 <= 0.0 || parking_radius_km <= 0.0 {
        return vinf_km_s.max(0.0);
    }
    let circular = (mu_km3_s2 / parking_radius_km).sqrt();
    let hyperbolic = (vinf_km_s * vinf_km_s + 2.0 * mu_km3_s2 / parking_radius_km).sqrt();
    (hyperbolic - circular).max(0.0)
}

/// Result for a Hohmann transfer between circular, coplanar orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    pub dv1_km_s: f64,      // signed: negative for inward (retro) burn
    pub dv2_km_s: f64,      // signed: negative for retro capture when arriving inward
    pub dv_total_km_s: f64, // |dv1| + |dv2|
    pub tof_seconds: f64,
}

/// Classical Hohmann transfer between two circular coplanar orbits.
///
/// Kept as an analytic order-of-magnitude cross-check against the powered
/// kinematic planner; the planner itself never flies conic arcs.
pub fn hohmann(r1_km: f64, r2_km: f64, mu_km3_s2: f64) -> HohmannResult {
    assert!(r1_km > 0.0 && r2_km > 0.0 && mu_km3_s2 > 0.0);

    let v1 = (mu_km3_s2 / r1_km).sqrt();
    let v2 = (mu_km3_s2 / r2_km).sqrt();
    let a_t = 0.5 * (r1_km + r2_km);
    let tof = std::f64::consts::PI * (a_t.powi(3) / mu_km3_s2).sqrt();

    // Transfer periapsis speed (at r1) and apoapsis speed (at r2)
    let v_t1 = (mu_km3_s2 * (2.0 / r1_km - 1.0 / a_t)).sqrt();
    let v_t2 = (mu_km3_s2 * (2.0 / r2_km - 1.0 / a_t)).sqrt();

    let dv1 = v_t1 - v1;
    let dv2 = v2 - v_t2;
    let dv_total = dv1.abs() + dv2.abs();

    HohmannResult {
        dv1_km_s: dv1,
        dv2_km_s: dv2,
        dv_total_km_s: dv_total,
        tof_seconds: tof,
    }
}
