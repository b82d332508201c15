//! Pure kinematic burn-profile math and the bounded transfer-time bisection.
//!
//! The trajectory model is a powered near-straight-line intercept: accelerate
//! along the chord, coast, brake. Distances are metres, speeds m/s. The
//! solver is deliberately separate from orchestration so property tests can
//! target it directly.

/// Accelerate/brake time fractions of the total transfer.
#[derive(Debug, Clone, Copy)]
pub struct BurnProfile {
    pub accel_fraction: f64,
    pub brake_fraction: f64,
}

impl BurnProfile {
    /// Clamp fractions into a physically valid split (non-negative coast).
    pub fn clamped(accel_fraction: f64, brake_fraction: f64) -> Self {
        let fa = accel_fraction.clamp(0.0, 1.0);
        let fb = brake_fraction.clamp(0.0, 1.0 - fa);
        Self {
            accel_fraction: fa,
            brake_fraction: fb,
        }
    }

    pub fn coast_fraction(&self) -> f64 {
        (1.0 - self.accel_fraction - self.brake_fraction).max(0.0)
    }
}

/// Distance covered (m) along the chord by the profile over `total_time_s`,
/// starting at closing speed `v0_m_s` with burn acceleration `accel_m_s2`.
pub fn coverage_m(profile: &BurnProfile, v0_m_s: f64, accel_m_s2: f64, total_time_s: f64) -> f64 {
    let ta = profile.accel_fraction * total_time_s;
    let tb = profile.brake_fraction * total_time_s;
    let tc = (total_time_s - ta - tb).max(0.0);

    let v1 = v0_m_s + accel_m_s2 * ta;
    let d_accel = v0_m_s * ta + 0.5 * accel_m_s2 * ta * ta;
    let d_coast = v1 * tc;
    let d_brake = v1 * tb - 0.5 * accel_m_s2 * tb * tb;

    d_accel + d_coast + d_brake
}

/// Closing speed at arrival (m/s) for the profile.
pub fn final_speed_m_s(
    profile: &BurnProfile,
    v0_m_s: f64,
    accel_m_s2: f64,
    total_time_s: f64,
) -> f64 {
    v0_m_s + accel_m_s2 * total_time_s * (profile.accel_fraction - profile.brake_fraction)
}

/// Burned delta-v (m/s) for the profile: acceleration applied over both burn
/// phases.
pub fn burn_delta_v_m_s(profile: &BurnProfile, accel_m_s2: f64, total_time_s: f64) -> f64 {
    accel_m_s2 * total_time_s * (profile.accel_fraction + profile.brake_fraction)
}

/// Outcome of a transfer-time search.
#[derive(Debug, Clone, Copy)]
pub struct TransferSolution {
    pub total_time_s: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// Solve for the transfer time where the profile's coverage matches the
/// chord distance, by bisection against a (possibly time-varying) chord.
///
/// `chord_m(T)` returns the required distance when arriving after `T`
/// seconds; the target keeps moving, so the chord is re-resolved per
/// candidate. `initial_speed_m_s(T)` likewise returns the closing speed along
/// that chord. Iterations are bounded; non-convergence returns the midpoint
/// flagged `converged: false`.
pub fn solve_transfer_time<C, V>(
    profile: &BurnProfile,
    accel_m_s2: f64,
    chord_m: C,
    initial_speed_m_s: V,
    min_time_s: f64,
    max_time_s: f64,
    tolerance_s: f64,
    max_iterations: usize,
) -> Option<TransferSolution>
where
    C: Fn(f64) -> f64,
    V: Fn(f64) -> f64,
{
    if accel_m_s2 <= 0.0 || min_time_s <= 0.0 || max_time_s <= min_time_s {
        return None;
    }

    let shortfall = |t: f64| {
        let v0 = initial_speed_m_s(t);
        coverage_m(profile, v0, accel_m_s2, t) - chord_m(t)
    };

    // Bracket the root by doubling from the lower bound.
    let mut lo = min_time_s;
    if shortfall(lo) > 0.0 {
        // Already overshooting at the minimum time; the minimum is the answer.
        return Some(TransferSolution {
            total_time_s: lo,
            converged: true,
            iterations: 0,
        });
    }
    let mut hi = (min_time_s * 2.0).min(max_time_s);
    let mut bracketed = false;
    for _ in 0..64 {
        if shortfall(hi) >= 0.0 {
            bracketed = true;
            break;
        }
        if hi >= max_time_s {
            break;
        }
        lo = hi;
        hi = (hi * 2.0).min(max_time_s);
    }
    if !bracketed {
        return None;
    }

    let mut iterations = 0;
    while hi - lo > tolerance_s && iterations < max_iterations {
        let mid = 0.5 * (lo + hi);
        if shortfall(mid) >= 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        iterations += 1;
    }

    Some(TransferSolution {
        total_time_s: 0.5 * (lo + hi),
        converged: hi - lo <= tolerance_s,
        iterations,
    })
}
