//! Arrival refinement: intercept braking, parking-band insertion, and the
//! aerobrake allowance.

use astro_core::units::{kms_to_ms, ms_to_kms};
use astro_config::RulesConfig;
use astro_orbits::maneuvers::capture_delta_v;
use astro_system::{SystemError, SystemSnapshot};
use astro_zones::orbital_boundaries;

use crate::plan::{ArrivalTarget, ManeuverParams, ShipModel};

/// Delta-v breakdown at the target end of a leg.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalCost {
    /// Burn cancelling residual closing speed down to the intercept speed.
    pub cancel_dv_m_s: f64,
    /// Orbital-insertion burn for parking-band placements.
    pub insertion_dv_m_s: f64,
    /// Portion of the arrival delta-v shed by atmosphere instead of fuel.
    pub aerobraked_dv_m_s: f64,
    /// Speed relative to the target after all arrival manoeuvres.
    pub arrival_speed_m_s: f64,
}

impl ArrivalCost {
    /// Arrival delta-v that costs propellant.
    pub fn propulsive_dv_m_s(&self) -> f64 {
        (self.cancel_dv_m_s + self.insertion_dv_m_s - self.aerobraked_dv_m_s).max(0.0)
    }
}

/// Cost the arrival for a leg whose profile leaves `closing_speed_m_s`
/// relative to the target.
pub fn arrival_cost(
    snapshot: &SystemSnapshot,
    target_id: &str,
    arrival: &ArrivalTarget,
    params: &ManeuverParams,
    ship: &ShipModel,
    closing_speed_m_s: f64,
    rules: &RulesConfig,
) -> Result<ArrivalCost, SystemError> {
    let residual = closing_speed_m_s.abs();

    let (cancel_dv, after_cancel) = if params.brake_at_arrival {
        let keep = params.intercept_speed_m_s.unwrap_or(0.0).max(0.0);
        ((residual - keep).max(0.0), residual.min(keep))
    } else {
        (0.0, residual)
    };

    let target = snapshot.node(target_id)?;
    let insertion_dv = match arrival {
        ArrivalTarget::Intercept | ArrivalTarget::Lagrange(_) => 0.0,
        ArrivalTarget::ParkingBand(band) => {
            let host = target
                .parent_id
                .as_deref()
                .and_then(|id| snapshot.nodes.get(id));
            let boundaries = orbital_boundaries(target, host, &rules.boundaries);
            let radius = boundaries.band_radius_km(*band);
            // Residual speed acts as hyperbolic excess at the target.
            kms_to_ms(capture_delta_v(
                target.mu_km3_s2(),
                radius,
                ms_to_kms(after_cancel),
            ))
        }
    };

    let has_atmosphere = target
        .atmosphere
        .as_ref()
        .map(|a| a.exists)
        .unwrap_or(false);
    let aerobraked = if params.allow_aerobrake && ship.aerobrake_capable && has_atmosphere {
        let escape_m_s = if target.mu_km3_s2() > 0.0 && target.radius_km > 0.0 {
            kms_to_ms((2.0 * target.mu_km3_s2() / target.radius_km).sqrt())
        } else {
            0.0
        };
        let limit = rules
            .performance
            .max_aerobrake_delta_v_m_s
            .min(escape_m_s * rules.performance.aerobrake_entry_speed_factor);
        limit.min(cancel_dv + insertion_dv)
    } else {
        0.0
    };

    Ok(ArrivalCost {
        cancel_dv_m_s: cancel_dv,
        insertion_dv_m_s: insertion_dv,
        aerobraked_dv_m_s: aerobraked,
        arrival_speed_m_s: after_cancel,
    })
}
