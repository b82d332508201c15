use astrogator::config::RulesConfig;
use astrogator::core::units::{au_to_km, km_to_au};
use astrogator::system::{BodyNode, SystemSnapshot};
use astrogator::zones::{
    ParkingBand, hill_sphere, orbital_boundaries, sphere_of_influence, stellar_zones,
};

fn nodes() -> Vec<BodyNode> {
    serde_yaml::from_str(
        r#"
- id: star
  name: Star
  kind: star
  mass_kg: 1.9885e30
  radius_km: 695700.0
  surface_temperature_k: 5772.0
- id: terra
  name: Terra
  kind: planet
  parent_id: star
  mass_kg: 5.972e24
  radius_km: 6371.0
  rotation_period_s: 86164.0
  atmosphere:
    exists: true
    scale_height_km: 8.5
    surface_density_kg_m3: 1.225
  orbit:
    host_id: star
    mu_km3_s2: 1.32712e11
    elements:
      semi_major_axis_km: 1.496e8
      eccentricity: 0.0167
- id: slag
  name: Slag
  kind: planet
  parent_id: star
  mass_kg: 3.3e23
  radius_km: 2440.0
  rotation_period_s: 0.0
  orbit:
    host_id: star
    mu_km3_s2: 1.32712e11
    elements:
      semi_major_axis_km: 5.8e7
      eccentricity: 0.2
"#,
    )
    .expect("zone nodes parse")
}

#[test]
fn hill_sphere_matches_terra_scale() {
    let r = hill_sphere(1.496e8, 5.972e24, 1.9885e30);
    assert!(r > 1.4e6 && r < 1.6e6, "Hill radius {r} km out of band");
    assert_eq!(hill_sphere(0.0, 5.972e24, 1.9885e30), 0.0);
}

#[test]
fn orbital_bands_are_strictly_ordered() {
    let snapshot = SystemSnapshot::from_nodes(nodes());
    let rules = RulesConfig::default();
    let terra = snapshot.node("terra").expect("terra");
    let star = snapshot.node("star").expect("star");

    let bands = orbital_boundaries(terra, Some(star), &rules.boundaries);
    assert_eq!(bands.surface_km, Some(6371.0));
    // Atmosphere lifts the floor above the bare minimum altitude.
    assert!(bands.min_leo_km > 6371.0 + 100.0);
    assert!(bands.min_leo_km < bands.leo_meo_km);
    assert!(bands.leo_meo_km < bands.meo_heo_km);
    assert!(bands.meo_heo_km < bands.heo_upper_km);

    let soi = sphere_of_influence(terra, Some(star), &rules.boundaries);
    assert!(bands.heo_upper_km <= soi);
}

#[test]
fn band_radii_sit_inside_their_bands() {
    let snapshot = SystemSnapshot::from_nodes(nodes());
    let rules = RulesConfig::default();
    let terra = snapshot.node("terra").expect("terra");
    let star = snapshot.node("star").expect("star");
    let bands = orbital_boundaries(terra, Some(star), &rules.boundaries);

    let low = bands.band_radius_km(ParkingBand::Low);
    let medium = bands.band_radius_km(ParkingBand::Medium);
    let high = bands.band_radius_km(ParkingBand::High);
    assert!(bands.min_leo_km < low && low < bands.leo_meo_km);
    assert!(bands.leo_meo_km < medium && medium < bands.meo_heo_km);
    assert!(bands.meo_heo_km < high && high < bands.heo_upper_km);
}

#[test]
fn synchronous_radius_matches_terra_and_falls_back_when_unspun() {
    let snapshot = SystemSnapshot::from_nodes(nodes());
    let rules = RulesConfig::default();
    let star = snapshot.node("star").expect("star");

    let terra = snapshot.node("terra").expect("terra");
    let bands = orbital_boundaries(terra, Some(star), &rules.boundaries);
    assert!(!bands.is_geo_fallback);
    assert!(
        (bands.geostationary_km - 42_164.0).abs() < 200.0,
        "synchronous radius {} km",
        bands.geostationary_km
    );

    let slag = snapshot.node("slag").expect("slag");
    let slag_bands = orbital_boundaries(slag, Some(star), &rules.boundaries);
    assert!(slag_bands.is_geo_fallback);
    let soi = sphere_of_influence(slag, Some(star), &rules.boundaries);
    assert!(
        (slag_bands.geostationary_km - soi * rules.boundaries.geo_fallback_soi_fraction).abs()
            < 1e-6
    );
}

#[test]
fn stellar_zone_lines_are_monotone_outward() {
    let snapshot = SystemSnapshot::from_nodes(nodes());
    let rules = RulesConfig::default();
    let star = snapshot.node("star").expect("star");
    let z = stellar_zones(star, &rules.zones);

    let radii = [
        z.roche_limit_km,
        z.rock_line_km,
        z.kill_zone_km,
        z.danger_zone_km,
        z.habitable_inner_km,
        z.habitable_outer_km,
        z.soot_line_km,
        z.frost_line_km,
        z.co2_line_km,
        z.co_line_km,
        z.system_limit_km,
    ];
    for pair in radii.windows(2) {
        assert!(pair[0] <= pair[1], "zone ordering inverted: {pair:?}");
    }
}

#[test]
fn sunlike_habitable_zone_brackets_one_au() {
    let snapshot = SystemSnapshot::from_nodes(nodes());
    let rules = RulesConfig::default();
    let star = snapshot.node("star").expect("star");
    let z = stellar_zones(star, &rules.zones);

    let inner = km_to_au(z.habitable_inner_km);
    let outer = km_to_au(z.habitable_outer_km);
    assert!(inner < 1.0 && 1.0 < outer, "habitable [{inner}, {outer}] AU");
    // Flux thresholds 1.1 and 0.36 for L near 1.
    assert!((inner - (1.0_f64 / 1.1).sqrt()).abs() < 0.05);
    assert!((outer - (1.0_f64 / 0.36).sqrt()).abs() < 0.1);
}

#[test]
fn luminosity_override_rescales_zones() {
    let mut all = nodes();
    all[0].luminosity_solar_override = Some(0.25);
    let snapshot = SystemSnapshot::from_nodes(all);
    let rules = RulesConfig::default();
    let star = snapshot.node("star").expect("star");
    let z = stellar_zones(star, &rules.zones);

    // Frost line scales with sqrt(L): 2.7 AU becomes 1.35 AU.
    assert!((z.frost_line_km - au_to_km(1.35)).abs() / au_to_km(1.35) < 0.01);
}

#[test]
fn dim_star_zones_never_invert() {
    let mut all = nodes();
    all[0].luminosity_solar_override = Some(1.0e-4);
    let snapshot = SystemSnapshot::from_nodes(all);
    let rules = RulesConfig::default();
    let star = snapshot.node("star").expect("star");
    let z = stellar_zones(star, &rules.zones);

    // With the photosphere this large, the Roche floor dominates and the
    // clamp keeps every line at or beyond it.
    assert!(z.rock_line_km >= z.roche_limit_km);
    assert!(z.habitable_inner_km >= z.danger_zone_km);
    assert!(z.system_limit_km >= z.co_line_km);
}
