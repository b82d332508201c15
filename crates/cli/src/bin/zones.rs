use std::path::PathBuf;

use clap::Parser;

use astrogator::config::{load_rules, load_system};
use astrogator::core::units::km_to_au;
use astrogator::system::BodyKind;
use astrogator::zones::{orbital_boundaries, sphere_of_influence, stellar_zones};

#[derive(Parser)]
#[command(author, version, about = "Zone and band report for a body")]
struct Cli {
    /// Body id (as declared in the system file)
    #[arg(long)]
    body: String,

    /// System snapshot file (YAML)
    #[arg(long, default_value = "configs/system.yaml")]
    system: PathBuf,

    /// Rule pack file or directory of TOML files
    #[arg(long, default_value = "configs/rules.toml")]
    rules: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let snapshot = load_system(&cli.system)?;
    let rules = load_rules(&cli.rules)?;

    let body = snapshot.node(&cli.body)?;
    let host = match &body.parent_id {
        Some(parent) => Some(snapshot.node(parent)?),
        None => None,
    };

    println!("=== Zones: {} ({:?}) ===", body.name, body.kind);

    if body.kind == BodyKind::Star {
        let zones = stellar_zones(body, &rules.zones);
        println!("Roche limit    : {:>10.4} AU", km_to_au(zones.roche_limit_km));
        println!("Rock line      : {:>10.4} AU", km_to_au(zones.rock_line_km));
        println!("Kill zone      : {:>10.4} AU", km_to_au(zones.kill_zone_km));
        println!("Danger zone    : {:>10.4} AU", km_to_au(zones.danger_zone_km));
        println!(
            "Habitable      : {:>10.4} AU .. {:.4} AU",
            km_to_au(zones.habitable_inner_km),
            km_to_au(zones.habitable_outer_km)
        );
        println!("Soot line      : {:>10.4} AU", km_to_au(zones.soot_line_km));
        println!("Frost line     : {:>10.4} AU", km_to_au(zones.frost_line_km));
        println!("CO2 line       : {:>10.4} AU", km_to_au(zones.co2_line_km));
        println!("CO line        : {:>10.4} AU", km_to_au(zones.co_line_km));
        println!("System limit   : {:>10.4} AU", km_to_au(zones.system_limit_km));
        return Ok(());
    }

    let soi = sphere_of_influence(body, host, &rules.boundaries);
    let bands = orbital_boundaries(body, host, &rules.boundaries);
    if let Some(surface) = bands.surface_km {
        println!("Surface        : {:>12.1} km", surface);
    }
    println!("LEO floor      : {:>12.1} km", bands.min_leo_km);
    println!("LEO/MEO        : {:>12.1} km", bands.leo_meo_km);
    println!("MEO/HEO        : {:>12.1} km", bands.meo_heo_km);
    println!("HEO ceiling    : {:>12.1} km", bands.heo_upper_km);
    println!(
        "Synchronous    : {:>12.1} km{}",
        bands.geostationary_km,
        if bands.is_geo_fallback { " (SOI fallback)" } else { "" }
    );
    println!("SOI            : {:>12.1} km", soi);

    Ok(())
}
