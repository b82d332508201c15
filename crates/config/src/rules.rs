//! Rule-pack threshold tables with playable defaults.

use serde::Deserialize;

/// Stellar zone thresholds. Lines are reference distances (AU) at one solar
/// luminosity, scaled by √L at evaluation time; the habitable band uses flux
/// thresholds directly.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ZoneRules {
    /// Roche limit as a multiple of the stellar radius (fluid satellite).
    pub roche_stellar_radius_factor: f64,
    pub rock_line_au: f64,
    pub kill_zone_au: f64,
    pub danger_zone_au: f64,
    /// Stellar flux (relative to Earth's) at the habitable inner edge.
    pub habitable_inner_flux: f64,
    /// Stellar flux at the habitable outer edge.
    pub habitable_outer_flux: f64,
    pub soot_line_au: f64,
    pub frost_line_au: f64,
    pub co2_line_au: f64,
    pub co_line_au: f64,
    pub system_limit_au: f64,
}

impl Default for ZoneRules {
    fn default() -> Self {
        Self {
            roche_stellar_radius_factor: 2.44,
            rock_line_au: 0.1,
            kill_zone_au: 0.2,
            danger_zone_au: 0.4,
            habitable_inner_flux: 1.1,
            habitable_outer_flux: 0.36,
            soot_line_au: 2.2,
            frost_line_au: 2.7,
            co2_line_au: 10.0,
            co_line_au: 30.0,
            system_limit_au: 80.0,
        }
    }
}

/// Orbital altitude-band thresholds.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoundaryRules {
    /// Minimum low-orbit altitude over bare rock (km).
    pub min_leo_altitude_km: f64,
    /// Minimum low-orbit altitude in scale heights when an atmosphere exists.
    pub atmosphere_leo_scale_heights: f64,
    /// HEO upper bound as a fraction of the sphere of influence.
    pub heo_soi_fraction: f64,
    /// Substitute geostationary radius (SOI fraction) when the true value is
    /// unusable.
    pub geo_fallback_soi_fraction: f64,
    /// Stand-in SOI for unparented bodies, in body radii.
    pub unparented_soi_radius_factor: f64,
}

impl Default for BoundaryRules {
    fn default() -> Self {
        Self {
            min_leo_altitude_km: 100.0,
            atmosphere_leo_scale_heights: 12.0,
            heo_soi_fraction: 0.2,
            geo_fallback_soi_fraction: 0.05,
            unparented_soi_radius_factor: 10_000.0,
        }
    }
}

/// Construct performance margins and landing heuristics.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PerformanceRules {
    /// Multiplier over circular speed at min-LEO covering gravity/steering
    /// losses during ascent.
    pub takeoff_gravity_loss_factor: f64,
    /// Required TWR margin above 1.0 for surface departure.
    pub twr_margin: f64,
    /// Maximum arrival speed an aerobrake pass can shed (m/s).
    pub max_aerobrake_delta_v_m_s: f64,
    /// Aerobrake entry-speed cap as a multiple of surface escape speed.
    pub aerobrake_entry_speed_factor: f64,
    pub provisions_kg_per_crew_day: f64,
}

impl Default for PerformanceRules {
    fn default() -> Self {
        Self {
            takeoff_gravity_loss_factor: 1.15,
            twr_margin: 0.2,
            max_aerobrake_delta_v_m_s: 7_000.0,
            aerobrake_entry_speed_factor: 1.2,
            provisions_kg_per_crew_day: 5.0,
        }
    }
}

/// Transit solver tolerances, archetype presets, and feasibility thresholds.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TransitRules {
    /// Plans above this delta-v are annotated hidden, never deleted (m/s).
    pub delta_v_ceiling_m_s: f64,
    /// Sustained acceleration above this earns a High-G hazard tag.
    pub high_g_threshold_g: f64,
    /// Bisection convergence tolerance on transfer time (s).
    pub time_tolerance_s: f64,
    pub max_bisection_iterations: usize,
    /// Averaged-mass outer iterations (thrust/mass self-consistency).
    pub mass_iterations: usize,
    pub samples_per_segment: usize,
    pub min_transfer_time_s: f64,
    pub max_transfer_time_s: f64,
    /// Trailing fraction of the brake phase flown as an aerobrake segment.
    pub aerobrake_segment_fraction: f64,
    /// Burn fraction (each side) for the Economy preset.
    pub economy_burn_fraction: f64,
    /// Default accelerate/brake split for the Custom preset.
    pub custom_accel_fraction: f64,
    pub custom_brake_fraction: f64,
}

impl Default for TransitRules {
    fn default() -> Self {
        Self {
            delta_v_ceiling_m_s: 100_000.0,
            high_g_threshold_g: 3.0,
            time_tolerance_s: 1.0,
            max_bisection_iterations: 96,
            mass_iterations: 6,
            samples_per_segment: 16,
            min_transfer_time_s: 600.0,
            // Fifty years; anything longer is not a playable journey.
            max_transfer_time_s: 1.5768e9,
            aerobrake_segment_fraction: 0.25,
            economy_burn_fraction: 0.01,
            custom_accel_fraction: 0.3,
            custom_brake_fraction: 0.3,
        }
    }
}

/// Telemetry sampling density and hazard scaling.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelemetryRules {
    pub sample_count: usize,
    /// Radiation hazard reaches 1.0 at the kill-zone radius.
    pub radiation_reference_fraction: f64,
    /// Thermal hazard reaches 1.0 at the danger-zone radius.
    pub thermal_reference_fraction: f64,
}

impl Default for TelemetryRules {
    fn default() -> Self {
        Self {
            sample_count: 120,
            radiation_reference_fraction: 1.0,
            thermal_reference_fraction: 1.0,
        }
    }
}

/// Aggregate rule pack handed to every solver entry point.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RulesConfig {
    pub zones: ZoneRules,
    pub boundaries: BoundaryRules,
    pub performance: PerformanceRules,
    pub transit: TransitRules,
    pub telemetry: TelemetryRules,
}
