//! Hazard annotation for materialized plans.

use astro_core::vector;
use astro_config::RulesConfig;
use astro_system::SystemSnapshot;
use astro_zones::hazard_radii_km;

use crate::plan::Segment;

/// Tag applied when the path dips inside the primary star's danger zone.
pub const TAG_SUNDIVER: &str = "Sundiver";
/// Tag applied when sustained acceleration exceeds the safety threshold.
pub const TAG_HIGH_G: &str = "High-G";

/// Scan sampled segments for proximity and acceleration hazards.
pub fn annotate(
    snapshot: &SystemSnapshot,
    target_id: &str,
    segments: &[Segment],
    max_accel_g: f64,
    rules: &RulesConfig,
) -> Vec<String> {
    let mut tags = Vec::new();

    if let Ok(Some(star)) = snapshot.primary_star(target_id) {
        let (_, danger_km) = hazard_radii_km(star, &rules.zones);
        let sundives = segments.iter().flat_map(|s| &s.points).any(|point| {
            snapshot
                .absolute_state(&star.id, point.time_s)
                .map(|star_state| {
                    let offset = vector::sub(&point.position_km, &star_state.position_km);
                    vector::norm(&offset) < danger_km
                })
                .unwrap_or(false)
        });
        if sundives {
            tags.push(TAG_SUNDIVER.to_string());
        }
    }

    if max_accel_g > rules.transit.high_g_threshold_g {
        tags.push(TAG_HIGH_G.to_string());
    }

    tags
}
