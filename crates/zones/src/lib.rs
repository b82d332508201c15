//! Orbital altitude bands around bodies and flux-indexed zone radii around
//! stars.
//!
//! Band edges are geometric (log-spaced) because the usable altitude range
//! spans orders of magnitude; zone radii scale with √luminosity so compact
//! hosts with tiny photospheres but real radiation output stay well-defined.

use std::f64::consts::TAU;

use serde::Serialize;

use astro_core::units::au_to_km;
use astro_config::{BoundaryRules, ZoneRules};
use astro_system::BodyNode;

/// Altitude-band radii around a body, host-centered, non-decreasing in the
/// field order below. Adjacent bands collapse to equal values when the region
/// is too small; they never invert.
#[derive(Debug, Clone, Serialize)]
pub struct OrbitalBoundaries {
    /// Surface radius; `None` for belts/rings with no meaningful surface.
    pub surface_km: Option<f64>,
    pub min_leo_km: f64,
    pub leo_meo_km: f64,
    pub meo_heo_km: f64,
    pub heo_upper_km: f64,
    pub geostationary_km: f64,
    /// True when the geostationary radius was substituted with an SOI
    /// fraction (non-rotating body, or synchronous radius outside the SOI).
    pub is_geo_fallback: bool,
}

/// Zone radii around a star, strictly ordered outward.
#[derive(Debug, Clone, Serialize)]
pub struct StellarZones {
    pub roche_limit_km: f64,
    pub rock_line_km: f64,
    pub kill_zone_km: f64,
    pub danger_zone_km: f64,
    pub habitable_inner_km: f64,
    pub habitable_outer_km: f64,
    pub soot_line_km: f64,
    pub frost_line_km: f64,
    pub co2_line_km: f64,
    pub co_line_km: f64,
    pub system_limit_km: f64,
}

/// Hill sphere radius: `a·(m/3M)^{1/3}`, zero when inputs are degenerate.
pub fn hill_sphere(orbit_radius_km: f64, mass_kg: f64, host_mass_kg: f64) -> f64 {
    if orbit_radius_km <= 0.0 || mass_kg <= 0.0 || host_mass_kg <= 0.0 {
        return 0.0;
    }
    orbit_radius_km * (mass_kg / (3.0 * host_mass_kg)).cbrt()
}

/// Sphere of influence for a body, falling back to a configured multiple of
/// its radius when it has no host to carve a Hill sphere against.
pub fn sphere_of_influence(
    body: &BodyNode,
    host: Option<&BodyNode>,
    rules: &BoundaryRules,
) -> f64 {
    let from_host = host.and_then(|h| {
        let a = body.orbit.as_ref()?.elements.semi_major_axis_km;
        let r = hill_sphere(a, body.gravitating_mass_kg(), h.gravitating_mass_kg());
        (r > 0.0).then_some(r)
    });
    from_host.unwrap_or(body.radius_km.max(1.0) * rules.unparented_soi_radius_factor)
}

/// Derive the altitude bands for a body.
pub fn orbital_boundaries(
    body: &BodyNode,
    host: Option<&BodyNode>,
    rules: &BoundaryRules,
) -> OrbitalBoundaries {
    let surface = (body.radius_km > 0.0).then_some(body.radius_km);
    let surface_radius = body.radius_km.max(0.0);

    // Atmosphere pushes the minimum stable altitude up with its scale height.
    let min_altitude = match &body.atmosphere {
        Some(atmo) if atmo.exists => rules
            .min_leo_altitude_km
            .max(atmo.scale_height_km * rules.atmosphere_leo_scale_heights),
        _ => rules.min_leo_altitude_km,
    };
    let min_leo = surface_radius + min_altitude;

    let soi = sphere_of_influence(body, host, rules);
    let heo_upper = (soi * rules.heo_soi_fraction).max(min_leo);

    // Geometric partition of [min_leo, heo_upper] into LEO/MEO/HEO.
    let ratio = heo_upper / min_leo;
    let leo_meo = min_leo * ratio.powf(1.0 / 3.0);
    let meo_heo = min_leo * ratio.powf(2.0 / 3.0);

    let (geostationary, is_geo_fallback) = geostationary_radius(body, soi, rules);

    OrbitalBoundaries {
        surface_km: surface,
        min_leo_km: min_leo,
        leo_meo_km: leo_meo,
        meo_heo_km: meo_heo,
        heo_upper_km: heo_upper,
        geostationary_km: geostationary,
        is_geo_fallback,
    }
}

/// Synchronous-orbit radius `(μT²/4π²)^{1/3}`, or an SOI-fraction fallback.
fn geostationary_radius(body: &BodyNode, soi_km: f64, rules: &BoundaryRules) -> (f64, bool) {
    let mu = body.mu_km3_s2();
    let period = body.rotation_period_s;
    if mu > 0.0 && period > 1.0 {
        let radius = (mu * period * period / (TAU * TAU)).cbrt();
        if radius > body.radius_km && radius <= soi_km {
            return (radius, false);
        }
    }
    (soi_km * rules.geo_fallback_soi_fraction, true)
}

impl OrbitalBoundaries {
    /// Radius for a named parking band (midpoint of the band in log space).
    pub fn band_radius_km(&self, band: ParkingBand) -> f64 {
        match band {
            ParkingBand::Low => (self.min_leo_km * self.leo_meo_km).sqrt(),
            ParkingBand::Medium => (self.leo_meo_km * self.meo_heo_km).sqrt(),
            ParkingBand::High => (self.meo_heo_km * self.heo_upper_km).sqrt(),
            ParkingBand::Geostationary => self.geostationary_km,
        }
    }
}

/// Parking-orbit band selector used by arrival placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingBand {
    Low,
    Medium,
    High,
    Geostationary,
}

/// Derive the zone radii for a star.
///
/// Luminosity comes from the body's blackbody scaling or its explicit
/// override; every line except the Roche limit scales as √L. A final
/// monotone pass collapses lines that would otherwise invert for dim or
/// exotic hosts.
pub fn stellar_zones(star: &BodyNode, rules: &ZoneRules) -> StellarZones {
    let luminosity = star.luminosity_solar().max(0.0);
    let sqrt_l = luminosity.sqrt();

    let roche = star.radius_km.max(0.0) * rules.roche_stellar_radius_factor;
    let rock = au_to_km(rules.rock_line_au * sqrt_l);
    let kill = au_to_km(rules.kill_zone_au * sqrt_l);
    let danger = au_to_km(rules.danger_zone_au * sqrt_l);
    // Flux thresholds: distance where the stellar flux drops to the limit.
    let habitable_inner = au_to_km(flux_distance_au(luminosity, rules.habitable_inner_flux));
    let habitable_outer = au_to_km(flux_distance_au(luminosity, rules.habitable_outer_flux));
    let soot = au_to_km(rules.soot_line_au * sqrt_l);
    let frost = au_to_km(rules.frost_line_au * sqrt_l);
    let co2 = au_to_km(rules.co2_line_au * sqrt_l);
    let co = au_to_km(rules.co_line_au * sqrt_l);
    let limit = au_to_km(rules.system_limit_au * sqrt_l.max(0.1));

    // Enforce the outward ordering; adjacent zones may collapse equal.
    let rock = rock.max(roche);
    let kill = kill.max(rock);
    let danger = danger.max(kill);
    let habitable_inner = habitable_inner.max(danger);
    let habitable_outer = habitable_outer.max(habitable_inner);
    let soot = soot.max(habitable_outer);
    let frost = frost.max(soot);
    let co2 = co2.max(frost);
    let co = co.max(co2);
    let limit = limit.max(co);

    StellarZones {
        roche_limit_km: roche,
        rock_line_km: rock,
        kill_zone_km: kill,
        danger_zone_km: danger,
        habitable_inner_km: habitable_inner,
        habitable_outer_km: habitable_outer,
        soot_line_km: soot,
        frost_line_km: frost,
        co2_line_km: co2,
        co_line_km: co,
        system_limit_km: limit,
    }
}

/// Distance (AU) at which a star of the given luminosity delivers the given
/// flux relative to Earth's insolation.
fn flux_distance_au(luminosity_solar: f64, flux_threshold: f64) -> f64 {
    if flux_threshold <= 0.0 {
        return 0.0;
    }
    (luminosity_solar / flux_threshold).sqrt()
}

/// Convenience: the kill/danger radii used by hazard annotation, in km.
pub fn hazard_radii_km(star: &BodyNode, rules: &ZoneRules) -> (f64, f64) {
    let zones = stellar_zones(star, rules);
    (zones.kill_zone_km, zones.danger_zone_km)
}
