use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use astrogator::config::{load_catalog, load_constructs, load_rules, load_system, ConstructConfig};
use astrogator::export;
use astrogator::performance::{construct_specs, engine_totals};
use astrogator::transit::{
    plan_transits, Archetype, ArrivalTarget, LagrangePoint, ManeuverParams, PlanMode, ShipModel,
    TransitRequest,
};
use astrogator::zones::ParkingBand;

#[derive(Parser)]
#[command(author, version, about = "Transit planner CLI (survey or single archetype)")]
struct Cli {
    /// Origin body id (as declared in the system file)
    #[arg(long)]
    from: String,

    /// Target body id
    #[arg(long)]
    to: String,

    /// Departure time in days since system epoch
    #[arg(long, default_value_t = 0.0)]
    depart_day: f64,

    /// System snapshot file (YAML)
    #[arg(long, default_value = "configs/system.yaml")]
    system: PathBuf,

    /// Rule pack file or directory of TOML files
    #[arg(long, default_value = "configs/rules.toml")]
    rules: PathBuf,

    /// Fuel/engine catalog file or directory
    #[arg(long, default_value = "configs/catalog.toml")]
    catalog: PathBuf,

    /// Construct definitions file or directory
    #[arg(long, default_value = "configs/constructs")]
    constructs: PathBuf,

    /// Construct id or name (defaults to the first defined)
    #[arg(long)]
    construct: Option<String>,

    /// Planning mode
    #[arg(long, value_enum, default_value_t = ModeArg::Survey)]
    mode: ModeArg,

    /// Arrival handling
    #[arg(long, value_enum, default_value_t = ArrivalArg::Intercept)]
    arrival: ArrivalArg,

    /// Acceleration ceiling in g (defaults to crew-tolerance default)
    #[arg(long)]
    max_g: Option<f64>,

    /// Custom-preset accelerate fraction of total time
    #[arg(long)]
    accel_fraction: Option<f64>,

    /// Custom-preset brake fraction of total time
    #[arg(long)]
    brake_fraction: Option<f64>,

    /// Keep this residual speed at intercept instead of cancelling to rest (m/s)
    #[arg(long)]
    intercept_speed: Option<f64>,

    /// Fly through the target without an arrival burn
    #[arg(long, default_value_t = false)]
    no_brake: bool,

    /// Spend part of the arrival burn against the target's atmosphere
    #[arg(long, default_value_t = false)]
    aerobrake: bool,

    /// Include plans beyond the practical delta-v ceiling in the report
    #[arg(long, default_value_t = false)]
    show_hidden: bool,

    /// Print coplanar circular Hohmann estimate for the same endpoints
    #[arg(long, default_value_t = false)]
    estimate_hohmann: bool,

    /// Write sampled trajectory points for the first visible plan ("-" for stdout)
    #[arg(long)]
    path_csv: Option<PathBuf>,

    /// Write a one-row-per-plan summary ("-" for stdout)
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Print the first visible plan as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ModeArg {
    Survey,
    Economy,
    Fast,
    Custom,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ArrivalArg {
    Intercept,
    Low,
    Medium,
    High,
    Geo,
    L4,
    L5,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let snapshot = load_system(&cli.system)?;
    let rules = load_rules(&cli.rules)?;
    let catalog = load_catalog(&cli.catalog)?;
    let constructs = load_constructs(&cli.constructs)?;
    let construct = find_construct(&constructs, cli.construct.as_deref())?;

    let origin = snapshot.node(&cli.from)?;
    let specs = construct_specs(construct, &catalog, Some(origin), &rules);
    let engines = engine_totals(construct, &catalog);
    let ship = ShipModel::from_specs(&specs, engines.vacuum_thrust_n, construct.aerobrake_capable);

    let mut params = ManeuverParams::default();
    if let Some(max_g) = cli.max_g {
        params.max_accel_g = max_g;
    }
    params.accel_fraction = cli.accel_fraction;
    params.brake_fraction = cli.brake_fraction;
    params.intercept_speed_m_s = cli.intercept_speed;
    params.brake_at_arrival = !cli.no_brake;
    params.allow_aerobrake = cli.aerobrake;

    let request = TransitRequest {
        origin_id: cli.from.clone(),
        target_id: cli.to.clone(),
        departure_time_s: cli.depart_day * 86_400.0,
        ship,
        params,
        arrival: match cli.arrival {
            ArrivalArg::Intercept => ArrivalTarget::Intercept,
            ArrivalArg::Low => ArrivalTarget::ParkingBand(ParkingBand::Low),
            ArrivalArg::Medium => ArrivalTarget::ParkingBand(ParkingBand::Medium),
            ArrivalArg::High => ArrivalTarget::ParkingBand(ParkingBand::High),
            ArrivalArg::Geo => ArrivalTarget::ParkingBand(ParkingBand::Geostationary),
            ArrivalArg::L4 => ArrivalTarget::Lagrange(LagrangePoint::L4),
            ArrivalArg::L5 => ArrivalTarget::Lagrange(LagrangePoint::L5),
        },
        chain_state: None,
    };

    let mode = match cli.mode {
        ModeArg::Survey => PlanMode::Survey,
        ModeArg::Economy => PlanMode::Single(Archetype::Economy),
        ModeArg::Fast => PlanMode::Single(Archetype::Fast),
        ModeArg::Custom => PlanMode::Single(Archetype::Custom),
    };

    let plans = plan_transits(&snapshot, &request, mode, &rules)?;
    let hidden = plans.iter().filter(|p| p.hidden_reason.is_some()).count();
    let first_visible = plans.iter().find(|p| p.hidden_reason.is_none());

    if cli.json {
        if let Some(plan) = first_visible.or(plans.first()) {
            println!("{}", export::plan_json(plan)?);
        }
    } else {
        println!("=== Transit Survey: {} -> {} ===", cli.from, cli.to);
        println!("Construct       : {} ({:.0} kg wet)", construct.name, specs.total_mass_kg);
        for plan in &plans {
            if plan.hidden_reason.is_some() && !cli.show_hidden {
                continue;
            }
            print_plan(plan);
        }
        if hidden > 0 && !cli.show_hidden {
            println!("({} plan(s) hidden; pass --show-hidden to list them)", hidden);
        }
    }

    if cli.estimate_hohmann {
        print_hohmann(&snapshot, &plans, &cli)?;
    }

    if let Some(path) = &cli.path_csv {
        if let Some(plan) = first_visible.or(plans.first()) {
            let writer = export::writer_for_path(path)?;
            export::write_path_csv(writer, plan)?;
        }
    }
    if let Some(path) = &cli.summary_csv {
        let writer = export::writer_for_path(path)?;
        export::write_summary_csv(writer, &plans)?;
    }

    Ok(())
}

fn print_plan(plan: &astrogator::transit::TransitPlan) {
    let (d, h, m) = format_duration(plan.total_time_s);
    println!("--- {} ---", plan.archetype.label());
    println!(
        "Duration       : {:.2} days ({}d {}h {}m)",
        plan.total_time_s / 86_400.0,
        d,
        h,
        m
    );
    println!(
        "Delta-v        : {:.3} km/s, fuel used = {:.1} kg",
        plan.total_delta_v_m_s / 1_000.0,
        plan.fuel_used_kg
    );
    println!(
        "Arrival speed  : {:.3} km/s, peak accel = {:.2} g",
        plan.arrival_speed_m_s / 1_000.0,
        plan.max_accel_g
    );
    if !plan.tags.is_empty() {
        println!("Tags           : {}", plan.tags.join(", "));
    }
    if let Some(reason) = &plan.hidden_reason {
        println!("Hidden         : {}", reason);
    }
    if plan.insufficient_fuel {
        println!("Warning        : fuel on board does not cover this plan");
    }
    if !plan.converged {
        println!("Warning        : solver hit its iteration budget; treat as an estimate");
    }
}

fn print_hohmann(
    snapshot: &astrogator::system::SystemSnapshot,
    plans: &[astrogator::transit::TransitPlan],
    cli: &Cli,
) -> anyhow::Result<()> {
    use astrogator::core::vector;
    use astrogator::orbits::maneuvers::hohmann;

    let plan = plans
        .first()
        .ok_or_else(|| anyhow::anyhow!("no plan to estimate against"))?;
    let star = snapshot
        .primary_star(&cli.to)?
        .ok_or_else(|| anyhow::anyhow!("system has no primary star for a Hohmann estimate"))?;
    let first = plan
        .segments
        .first()
        .and_then(|s| s.points.first())
        .ok_or_else(|| anyhow::anyhow!("plan carries no sampled path"))?;
    let last = plan
        .segments
        .last()
        .and_then(|s| s.points.last())
        .ok_or_else(|| anyhow::anyhow!("plan carries no sampled path"))?;

    let r1 = vector::norm(&first.position_km);
    let r2 = vector::norm(&last.position_km);
    let est = hohmann(r1, r2, star.mu_km3_s2());
    println!(
        "Hohmann est.   : dv_total = {:.3} km/s (dv1={:.3}, dv2={:.3}), TOF = {:.2} days",
        est.dv_total_km_s,
        est.dv1_km_s,
        est.dv2_km_s,
        est.tof_seconds / 86_400.0
    );
    Ok(())
}

fn find_construct<'a>(
    constructs: &'a [ConstructConfig],
    wanted: Option<&str>,
) -> anyhow::Result<&'a ConstructConfig> {
    match wanted {
        Some(key) => constructs
            .iter()
            .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| anyhow::anyhow!("Construct '{}' not found in catalogs", key)),
        None => constructs
            .first()
            .ok_or_else(|| anyhow::anyhow!("No constructs defined")),
    }
}

fn format_duration(seconds: f64) -> (i64, i64, i64) {
    let total_seconds = seconds.max(0.0);
    let days = (total_seconds / 86_400.0).floor() as i64;
    let remaining = total_seconds - (days as f64 * 86_400.0);
    let hours = (remaining / 3_600.0).floor() as i64;
    let minutes = ((remaining - hours as f64 * 3_600.0) / 60.0).floor() as i64;
    (days, hours, minutes)
}
