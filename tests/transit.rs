use astrogator::config::RulesConfig;
use astrogator::core::vector;
use astrogator::system::{BodyNode, SystemSnapshot};
use astrogator::transit::{
    Archetype, ArrivalTarget, LagrangePoint, ManeuverParams, PlanMode, SegmentKind, ShipModel,
    TransitRequest, plan_transits,
};
use astrogator::zones::ParkingBand;

// Orbits carry a tiny gravitational parameter so the bodies barely move
// over a transfer; geometry checks then work against near-static chords.
fn slow_system() -> SystemSnapshot {
    let nodes: Vec<BodyNode> = serde_yaml::from_str(
        r#"
- id: star
  name: Star
  kind: star
  mass_kg: 1.9885e30
  radius_km: 695700.0
  surface_temperature_k: 5772.0
- id: inner
  name: Inner
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
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 1.496e8
      eccentricity: 0.0
- id: outer
  name: Outer
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
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 2.0944e8
      eccentricity: 0.0
- id: far
  name: Far
  kind: planet
  parent_id: star
  mass_kg: 1.0e24
  radius_km: 4000.0
  rotation_period_s: 90000.0
  orbit:
    host_id: star
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 2.6928e8
      eccentricity: 0.0
- id: waypoint
  name: Waypoint
  kind: planet
  parent_id: star
  mass_kg: 1.0e24
  radius_km: 4000.0
  rotation_period_s: 90000.0
  orbit:
    host_id: star
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 2.244e8
      eccentricity: 0.0
- id: opposite
  name: Opposite
  kind: planet
  parent_id: star
  mass_kg: 1.0e24
  radius_km: 4000.0
  rotation_period_s: 90000.0
  orbit:
    host_id: star
    mu_km3_s2: 1.0e6
    elements:
      semi_major_axis_km: 1.496e8
      eccentricity: 0.0
      mean_anomaly_epoch_rad: 3.14159265358979
"#,
    )
    .expect("system nodes parse");
    SystemSnapshot::from_nodes(nodes)
}

fn freighter() -> ShipModel {
    ShipModel {
        wet_mass_kg: 3.0e6,
        dry_mass_kg: 2.4e6,
        thrust_n: 1.5e6,
        isp_s: 50_000.0,
        fuel_available_kg: 6.0e5,
        aerobrake_capable: true,
    }
}

fn request(ship: ShipModel) -> TransitRequest {
    TransitRequest {
        origin_id: "inner".to_string(),
        target_id: "outer".to_string(),
        departure_time_s: 0.0,
        ship,
        params: ManeuverParams::default(),
        arrival: ArrivalTarget::Intercept,
        chain_state: None,
    }
}

#[test]
fn survey_returns_all_archetypes_in_order() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let plans =
        plan_transits(&snapshot, &request(freighter()), PlanMode::Survey, &rules).expect("plans");

    let order: Vec<Archetype> = plans.iter().map(|p| p.archetype).collect();
    assert_eq!(
        order,
        vec![Archetype::Economy, Archetype::Fast, Archetype::Custom]
    );
}

#[test]
fn economy_preset_lands_in_a_playable_delta_v_band() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let plans =
        plan_transits(&snapshot, &request(freighter()), PlanMode::Survey, &rules).expect("plans");

    let economy = &plans[0];
    assert!(economy.converged);
    assert!(economy.hidden_reason.is_none(), "{:?}", economy.hidden_reason);
    assert!(
        economy.total_delta_v_m_s > 1_000.0 && economy.total_delta_v_m_s < 50_000.0,
        "economy delta-v {} m/s outside sanity band",
        economy.total_delta_v_m_s
    );
    assert!(!economy.insufficient_fuel);
    assert!(economy.fuel_used_kg > 0.0);
    assert!(economy.total_time_s > 0.0);
}

#[test]
fn fast_preset_exceeds_the_ceiling_but_is_kept() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let plans =
        plan_transits(&snapshot, &request(freighter()), PlanMode::Survey, &rules).expect("plans");

    let fast = &plans[1];
    assert!(fast.total_delta_v_m_s > rules.transit.delta_v_ceiling_m_s);
    assert!(fast.hidden_reason.is_some());
    // Hidden plans remain fully materialized.
    assert!(!fast.segments.is_empty());
    // A continuous burn is strictly faster than a coast-dominated one.
    assert!(fast.total_time_s < plans[0].total_time_s);
}

// A single 200 kN / Isp 4000 s torch pushing a 500 t hull across half an AU;
// the coast-dominated preset stays inside the playable band while the
// continuous burn blows through the ceiling.
#[test]
fn single_torch_liner_economy_is_playable_and_fast_is_hidden() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let mut req = request(ShipModel {
        wet_mass_kg: 5.0e5,
        dry_mass_kg: 5.0e5,
        thrust_n: 2.0e5,
        isp_s: 4_000.0,
        fuel_available_kg: 0.0,
        aerobrake_capable: false,
    });
    req.target_id = "waypoint".to_string();
    req.params.max_accel_g = 1.0;
    let plans = plan_transits(&snapshot, &req, PlanMode::Survey, &rules).expect("plans");

    let economy = &plans[0];
    assert!(economy.total_time_s > 40.0 * 86_400.0 && economy.total_time_s < 60.0 * 86_400.0);
    assert!(
        economy.total_delta_v_m_s > 1_000.0 && economy.total_delta_v_m_s < 50_000.0,
        "economy delta-v {} m/s outside sanity band",
        economy.total_delta_v_m_s
    );
    assert!(economy.hidden_reason.is_none());
    // No propellant on board, so the shortfall flag is set but the plan
    // still solves.
    assert!(economy.insufficient_fuel);

    let fast = &plans[1];
    assert!(fast.total_delta_v_m_s > rules.transit.delta_v_ceiling_m_s);
    assert!(fast.hidden_reason.is_some());
}

#[test]
fn plans_are_deterministic() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let req = request(freighter());

    let a = plan_transits(&snapshot, &req, PlanMode::Survey, &rules).expect("first");
    let b = plan_transits(&snapshot, &req, PlanMode::Survey, &rules).expect("second");
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.total_time_s, y.total_time_s);
        assert_eq!(x.total_delta_v_m_s, y.total_delta_v_m_s);
        assert_eq!(x.fuel_used_kg, y.fuel_used_kg);
    }
}

#[test]
fn segments_tile_the_leg_without_gaps() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let plans =
        plan_transits(&snapshot, &request(freighter()), PlanMode::Survey, &rules).expect("plans");

    for plan in &plans {
        let segs = &plan.segments;
        assert!(!segs.is_empty());
        assert!((segs[0].start_time_s - plan.start_time_s).abs() < 1e-6);
        for pair in segs.windows(2) {
            assert!(
                (pair[0].end_time_s - pair[1].start_time_s).abs() < 1e-6,
                "gap between segments"
            );
        }
        let end = segs.last().map(|s| s.end_time_s).unwrap_or(0.0);
        assert!((end - (plan.start_time_s + plan.total_time_s)).abs() < 1e-6);

        // Sampled path starts at the origin body and ends on the target.
        let first = segs.first().and_then(|s| s.points.first()).expect("first point");
        let depart = snapshot.absolute_state("inner", plan.start_time_s).expect("depart");
        assert!(vector::norm(&vector::sub(&first.position_km, &depart.position_km)) < 1.0);

        let last = segs.last().and_then(|s| s.points.last()).expect("last point");
        let arrive = snapshot
            .absolute_state("outer", plan.start_time_s + plan.total_time_s)
            .expect("arrive");
        assert!(vector::norm(&vector::sub(&last.position_km, &arrive.position_km)) < 1.0);
    }
}

#[test]
fn economy_plan_is_coast_dominated() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let plans = plan_transits(
        &snapshot,
        &request(freighter()),
        PlanMode::Single(Archetype::Economy),
        &rules,
    )
    .expect("plans");
    let plan = &plans[0];

    let coast_time: f64 = plan
        .segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Coast)
        .map(|s| s.end_time_s - s.start_time_s)
        .sum();
    assert!(coast_time > 0.9 * plan.total_time_s);
}

#[test]
fn identical_endpoints_are_rejected() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let mut req = request(freighter());
    req.target_id = "inner".to_string();
    assert!(plan_transits(&snapshot, &req, PlanMode::Survey, &rules).is_err());
}

#[test]
fn unknown_bodies_are_rejected() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let mut req = request(freighter());
    req.target_id = "nowhere".to_string();
    assert!(plan_transits(&snapshot, &req, PlanMode::Survey, &rules).is_err());
}

#[test]
fn fuel_shortfall_is_flagged_not_fatal() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();
    let mut ship = freighter();
    ship.fuel_available_kg = 1_000.0;
    let plans = plan_transits(
        &snapshot,
        &request(ship),
        PlanMode::Single(Archetype::Economy),
        &rules,
    )
    .expect("plans");
    let plan = &plans[0];
    assert!(plan.insufficient_fuel);
    assert_eq!(plan.final_state.fuel_remaining_kg, 0.0);
}

#[test]
fn parking_band_arrival_costs_more_than_intercept() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let intercept = plan_transits(
        &snapshot,
        &request(freighter()),
        PlanMode::Single(Archetype::Economy),
        &rules,
    )
    .expect("intercept plans");

    let mut req = request(freighter());
    req.arrival = ArrivalTarget::ParkingBand(ParkingBand::Low);
    let banded = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("band plans");

    assert!(banded[0].total_delta_v_m_s > intercept[0].total_delta_v_m_s);
}

#[test]
fn aerobrake_trades_fuel_for_an_aerobrake_segment() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let mut req = request(freighter());
    req.arrival = ArrivalTarget::ParkingBand(ParkingBand::Low);
    let plain = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("plain plans");

    req.params.allow_aerobrake = true;
    let braked = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("aerobrake plans");

    assert!(braked[0].fuel_used_kg < plain[0].fuel_used_kg);
    // Speed shed in the atmosphere burns no propellant and is not billed
    // as delta-v, so the ceiling check sees only the engine's share.
    assert!(braked[0].total_delta_v_m_s < plain[0].total_delta_v_m_s);
    let seg_sum: f64 = braked[0].segments.iter().map(|s| s.delta_v_m_s).sum();
    assert!((seg_sum - braked[0].total_delta_v_m_s).abs() < 1e-9);
    assert!(
        braked[0]
            .segments
            .iter()
            .any(|s| s.kind == SegmentKind::Aerobrake)
    );
    assert!(
        plain[0]
            .segments
            .iter()
            .all(|s| s.kind != SegmentKind::Aerobrake)
    );
}

#[test]
fn lagrange_arrival_offsets_the_intercept_point() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let mut req = request(freighter());
    req.arrival = ArrivalTarget::Lagrange(LagrangePoint::L4);
    let plans = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("plans");

    let plan = &plans[0];
    let t_arrive = plan.start_time_s + plan.total_time_s;
    let target = snapshot.absolute_state("outer", t_arrive).expect("target");
    let last = plan
        .segments
        .last()
        .and_then(|s| s.points.last())
        .expect("last point");

    // Equilateral geometry: the L4 point sits one orbital radius from the
    // body, at the same distance from the star.
    let r_target = vector::norm(&target.position_km);
    let r_point = vector::norm(&last.position_km);
    let separation = vector::norm(&vector::sub(&last.position_km, &target.position_km));
    assert!((r_point - r_target).abs() / r_target < 1e-3);
    assert!((separation - r_target).abs() / r_target < 1e-3);
}

#[test]
fn chained_leg_departs_from_the_previous_arrival_point() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let first = plan_transits(
        &snapshot,
        &request(freighter()),
        PlanMode::Single(Archetype::Economy),
        &rules,
    )
    .expect("first leg");
    let arrival = first[0].final_state.clone();

    let mut ship = freighter();
    ship.fuel_available_kg = arrival.fuel_remaining_kg;
    let second_req = TransitRequest {
        origin_id: "outer".to_string(),
        target_id: "far".to_string(),
        departure_time_s: arrival.time_s,
        ship,
        params: ManeuverParams::default(),
        arrival: ArrivalTarget::Intercept,
        chain_state: Some(arrival.clone()),
    };
    let second = plan_transits(&snapshot, &second_req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("second leg");

    let start = second[0]
        .segments
        .first()
        .and_then(|s| s.points.first())
        .expect("start point");
    let offset = vector::norm(&vector::sub(&start.position_km, &arrival.position_km));
    assert!(offset < 1e-6, "chained leg shifted {offset} km");
    assert!(second[0].start_time_s >= first[0].start_time_s + first[0].total_time_s);
}

#[test]
fn sundiving_chord_is_tagged() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let mut req = request(freighter());
    req.target_id = "opposite".to_string();
    let plans = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Economy), &rules)
        .expect("plans");
    assert!(
        plans[0].tags.iter().any(|t| t == "Sundiver"),
        "tags: {:?}",
        plans[0].tags
    );
}

#[test]
fn high_acceleration_is_tagged() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    let mut req = request(ShipModel {
        wet_mass_kg: 1.0e5,
        dry_mass_kg: 5.0e4,
        thrust_n: 5.0e6,
        isp_s: 50_000.0,
        fuel_available_kg: 5.0e4,
        aerobrake_capable: false,
    });
    req.params.max_accel_g = 5.0;
    let plans = plan_transits(&snapshot, &req, PlanMode::Single(Archetype::Fast), &rules)
        .expect("plans");

    let plan = &plans[0];
    assert!(plan.max_accel_g <= 5.0 + 1e-9);
    assert!(plan.max_accel_g > rules.transit.high_g_threshold_g);
    assert!(plan.tags.iter().any(|t| t == "High-G"), "tags: {:?}", plan.tags);
}

#[test]
fn acceleration_never_exceeds_the_crew_ceiling() {
    let snapshot = slow_system();
    let rules = RulesConfig::default();

    // Thrust-rich hull; the g limit must cap the solve.
    let mut req = request(ShipModel {
        wet_mass_kg: 1.0e5,
        dry_mass_kg: 5.0e4,
        thrust_n: 5.0e6,
        isp_s: 50_000.0,
        fuel_available_kg: 5.0e4,
        aerobrake_capable: false,
    });
    req.params.max_accel_g = 1.0;
    let plans =
        plan_transits(&snapshot, &req, PlanMode::Survey, &rules).expect("plans");
    for plan in &plans {
        assert!(plan.max_accel_g <= 1.0 + 1e-9, "{} g", plan.max_accel_g);
    }
}

#[test]
fn ship_overrides_respect_the_fuel_on_board() {
    let heavier = freighter().with_overrides(Some(3.5e6), None);
    assert_eq!(heavier.wet_mass_kg, 3.5e6);
    // More declared mass cannot conjure more propellant.
    assert_eq!(heavier.fuel_available_kg, 6.0e5);

    let stripped = freighter().with_overrides(Some(2.5e6), Some(60_000.0));
    assert_eq!(stripped.isp_s, 60_000.0);
    assert!((stripped.fuel_available_kg - 1.0e5).abs() < 1e-9);
}

mod solver_direct {
    use astrogator::transit::solver::{
        BurnProfile, coverage_m, final_speed_m_s, solve_transfer_time,
    };

    #[test]
    fn brachistochrone_time_matches_closed_form() {
        let profile = BurnProfile::clamped(0.5, 0.5);
        let d = 7.48e10; // metres
        let a = 0.5;
        let solution = solve_transfer_time(
            &profile,
            a,
            |_| d,
            |_| 0.0,
            600.0,
            1.0e9,
            1.0,
            96,
        )
        .expect("solution");
        assert!(solution.converged);
        let expected = 2.0 * (d / a).sqrt();
        assert!(
            (solution.total_time_s - expected).abs() < 5.0,
            "got {} expected {expected}",
            solution.total_time_s
        );
    }

    #[test]
    fn symmetric_profile_cancels_the_initial_speed_delta() {
        let profile = BurnProfile::clamped(0.1, 0.1);
        let vf = final_speed_m_s(&profile, 250.0, 0.5, 1.0e5);
        assert!((vf - 250.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_is_monotone_in_time() {
        let profile = BurnProfile::clamped(0.01, 0.01);
        let mut last = 0.0;
        for i in 1..20 {
            let t = 1.0e4 * i as f64;
            let d = coverage_m(&profile, 0.0, 0.5, t);
            assert!(d > last);
            last = d;
        }
    }

    #[test]
    fn unreachable_chord_returns_none() {
        let profile = BurnProfile::clamped(0.5, 0.5);
        // Max time far too small to cover the chord.
        assert!(
            solve_transfer_time(&profile, 0.5, |_| 1.0e15, |_| 0.0, 600.0, 1_200.0, 1.0, 96)
                .is_none()
        );
    }

    #[test]
    fn fractions_clamp_to_a_valid_split() {
        let p = BurnProfile::clamped(0.8, 0.8);
        assert!((p.accel_fraction + p.brake_fraction) <= 1.0 + 1e-12);
        assert_eq!(p.coast_fraction(), 0.0);
    }
}
