//! Tsiolkovsky rocket equation, forward and inverse, with zero-guards.

use astro_core::constants::G0;

/// Delta-v capacity (m/s) for the given Isp and mass ratio.
pub fn delta_v_m_s(isp_s: f64, wet_mass_kg: f64, dry_mass_kg: f64) -> f64 {
    if isp_s <= 0.0 || dry_mass_kg <= 0.0 || wet_mass_kg <= dry_mass_kg {
        return 0.0;
    }
    isp_s * G0 * (wet_mass_kg / dry_mass_kg).ln()
}

/// Propellant (kg) needed to achieve `delta_v_m_s` starting from `wet_mass_kg`.
///
/// Inverse of [`delta_v_m_s`]: `fuel = m_wet − m_wet / exp(ΔV / (Isp·g0))`.
pub fn fuel_for_delta_v_kg(wet_mass_kg: f64, isp_s: f64, delta_v_m_s: f64) -> f64 {
    if wet_mass_kg <= 0.0 || isp_s <= 0.0 || delta_v_m_s <= 0.0 {
        return 0.0;
    }
    wet_mass_kg - wet_mass_kg / (delta_v_m_s / (isp_s * G0)).exp()
}
