//! Construct performance rollups: mass, thrust, Isp, delta-v, and
//! landing/takeoff feasibility.
//!
//! Catalog gaps never fail the computation: an engine or fuel id missing from
//! its catalog simply contributes zero, so a half-edited construct still
//! produces a spec sheet.

use serde::Serialize;

use astro_core::constants::G0;
use astro_core::guard::div_or_zero;
use astro_core::units::kms_to_ms;
use astro_config::{Catalog, ConstructConfig, RulesConfig};
use astro_system::BodyNode;
use astro_zones::orbital_boundaries;

pub mod rocket;

pub use rocket::{delta_v_m_s, fuel_for_delta_v_kg};

/// Aggregated engine figures across every mount on a construct.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineTotals {
    pub vacuum_thrust_n: f64,
    pub atmosphere_thrust_n: f64,
    pub mass_kg: f64,
    pub power_draw_kw: f64,
    /// Thrust-weighted harmonic mean Isp (combined impulse over combined
    /// mass flow), so mixed engine types yield a consistent delta-v.
    pub combined_isp_s: f64,
}

/// Roll up engine mounts against the catalog. Unknown ids contribute zero.
pub fn engine_totals(construct: &ConstructConfig, catalog: &Catalog) -> EngineTotals {
    let mut thrust = 0.0;
    let mut atmo_thrust = 0.0;
    let mut mass = 0.0;
    let mut power = 0.0;
    let mut mass_flow = 0.0; // Σ F / (Isp·g0)

    for mount in &construct.engines {
        let Some(def) = catalog.engines.get(&mount.engine_id) else {
            continue;
        };
        let count = f64::from(mount.count);
        thrust += def.thrust_n * count;
        atmo_thrust += def.thrust_n * def.atmosphere_efficiency * count;
        mass += def.mass_kg * count;
        power += def.power_draw_kw * count;
        if def.isp_s > 0.0 {
            mass_flow += def.thrust_n * count / (def.isp_s * G0);
        }
    }

    EngineTotals {
        vacuum_thrust_n: thrust,
        atmosphere_thrust_n: atmo_thrust,
        mass_kg: mass,
        power_draw_kw: power,
        combined_isp_s: div_or_zero(thrust, mass_flow * G0),
    }
}

/// Loaded propellant mass across tanks (kg). Gauges are clamped to capacity;
/// fuels missing from the catalog weigh nothing.
pub fn fuel_mass_kg(construct: &ConstructConfig, catalog: &Catalog) -> f64 {
    construct
        .tanks
        .iter()
        .map(|tank| {
            let density = catalog
                .fuels
                .get(&tank.fuel_id)
                .map(|f| f.density_kg_per_unit)
                .unwrap_or(0.0);
            tank.current_units.min(tank.capacity_units).max(0.0) * density
        })
        .sum()
}

/// Full performance sheet for a construct, optionally in the context of a
/// host body (surface TWR, takeoff/landing figures need one).
#[derive(Debug, Clone, Serialize)]
pub struct ConstructSpecs {
    pub dry_mass_kg: f64,
    pub fuel_mass_kg: f64,
    pub total_mass_kg: f64,
    pub max_vacuum_accel_g: f64,
    pub total_delta_v_m_s: f64,
    pub combined_isp_s: f64,
    pub surface_twr: f64,
    pub can_liftoff: bool,
    pub takeoff_fuel_kg: f64,
    pub propulsive_landing_fuel_kg: f64,
    pub aerobrake_landing_fuel_kg: f64,
    pub round_trip_fuel_kg: f64,
    pub aerobrake_limit_m_s: f64,
    pub power_surplus_kw: f64,
    pub endurance_s: f64,
}

/// Compute the full spec sheet for a construct.
pub fn construct_specs(
    construct: &ConstructConfig,
    catalog: &Catalog,
    host: Option<&BodyNode>,
    rules: &RulesConfig,
) -> ConstructSpecs {
    let engines = engine_totals(construct, catalog);
    let fuel = fuel_mass_kg(construct, catalog);

    let dry = construct.hull_mass_kg
        + construct.module_mass_kg
        + construct.crew_provisions_kg
        + engines.mass_kg;
    let total = dry + fuel + construct.cargo_mass_kg;
    let dry_with_cargo = dry + construct.cargo_mass_kg;

    let total_delta_v = delta_v_m_s(engines.combined_isp_s, total, dry_with_cargo);
    let max_vacuum_g = div_or_zero(engines.vacuum_thrust_n, total * G0);

    let (surface_twr, takeoff_dv, aerobrake_limit) = match host {
        Some(body) => surface_context(construct, body, &engines, total, rules),
        None => (0.0, 0.0, 0.0),
    };
    let can_liftoff = surface_twr > 1.0 + rules.performance.twr_margin;

    // Fuel legs accumulate mass reduction: the landing burn flies a ship
    // already lightened by the takeoff burn.
    let isp = engines.combined_isp_s;
    let takeoff_fuel = fuel_for_delta_v_kg(total, isp, takeoff_dv);
    let propulsive_landing_fuel = fuel_for_delta_v_kg(total, isp, takeoff_dv);
    let aerobrake_dv = (takeoff_dv - aerobrake_limit).max(0.0);
    let aerobrake_landing_fuel = if aerobrake_limit > 0.0 {
        fuel_for_delta_v_kg(total, isp, aerobrake_dv)
    } else {
        propulsive_landing_fuel
    };
    let descent_dv = if aerobrake_limit > 0.0 { aerobrake_dv } else { takeoff_dv };
    let round_trip_fuel =
        takeoff_fuel + fuel_for_delta_v_kg(total - takeoff_fuel, isp, descent_dv);

    let endurance_s = if construct.crew_count > 0 {
        div_or_zero(
            construct.crew_provisions_kg,
            f64::from(construct.crew_count) * rules.performance.provisions_kg_per_crew_day,
        ) * astro_core::constants::SECONDS_PER_DAY
    } else {
        0.0
    };

    ConstructSpecs {
        dry_mass_kg: dry,
        fuel_mass_kg: fuel,
        total_mass_kg: total,
        max_vacuum_accel_g: max_vacuum_g,
        total_delta_v_m_s: total_delta_v,
        combined_isp_s: isp,
        surface_twr,
        can_liftoff,
        takeoff_fuel_kg: takeoff_fuel,
        propulsive_landing_fuel_kg: propulsive_landing_fuel,
        aerobrake_landing_fuel_kg: aerobrake_landing_fuel,
        round_trip_fuel_kg: round_trip_fuel,
        aerobrake_limit_m_s: aerobrake_limit,
        power_surplus_kw: construct.power_generation_kw - engines.power_draw_kw,
        endurance_s,
    }
}

/// Surface TWR, takeoff delta-v, and the aerobrake allowance for a host.
fn surface_context(
    construct: &ConstructConfig,
    body: &BodyNode,
    engines: &EngineTotals,
    total_mass_kg: f64,
    rules: &RulesConfig,
) -> (f64, f64, f64) {
    let mu = body.mu_km3_s2();
    let radius = body.radius_km;
    if mu <= 0.0 || radius <= 0.0 {
        return (0.0, 0.0, 0.0);
    }

    // Local gravity in m/s²: μ/r² is km/s² with km³ and km².
    let surface_gravity = kms_to_ms(mu / (radius * radius));
    let has_atmosphere = body
        .atmosphere
        .as_ref()
        .map(|a| a.exists)
        .unwrap_or(false);
    let effective_thrust = if has_atmosphere {
        engines.atmosphere_thrust_n
    } else {
        engines.vacuum_thrust_n
    };
    let twr = div_or_zero(effective_thrust, total_mass_kg * surface_gravity);

    let boundaries = orbital_boundaries(body, None, &rules.boundaries);
    let circular_m_s = kms_to_ms((mu / boundaries.min_leo_km).sqrt());
    let takeoff_dv = circular_m_s * rules.performance.takeoff_gravity_loss_factor;

    let aerobrake_limit = if construct.aerobrake_capable && has_atmosphere {
        let escape_m_s = kms_to_ms((2.0 * mu / radius).sqrt());
        rules
            .performance
            .max_aerobrake_delta_v_m_s
            .min(escape_m_s * rules.performance.aerobrake_entry_speed_factor)
    } else {
        0.0
    };

    (twr, takeoff_dv, aerobrake_limit)
}
