//! Configuration models and loaders for the astrogator core.
//!
//! Every threshold the solvers consume lives here as injected configuration:
//! rule packs override the defaults, the engine never hardcodes them.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use astro_system::{BodyNode, SystemSnapshot};

mod rules;

pub use rules::{
    BoundaryRules, PerformanceRules, RulesConfig, TelemetryRules, TransitRules, ZoneRules,
};

/// Propellant record, keyed by fuel id in the catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct FuelDef {
    pub name: String,
    /// Mass per abstract tank unit (kg); tank gauges are unit-denominated.
    pub density_kg_per_unit: f64,
}

/// Engine record, keyed by engine id in the catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineDef {
    pub name: String,
    pub thrust_n: f64,
    pub isp_s: f64,
    pub fuel_id: String,
    /// Thrust multiplier inside an atmosphere, in [0, 1+].
    #[serde(default = "default_atmosphere_efficiency")]
    pub atmosphere_efficiency: f64,
    #[serde(default)]
    pub power_draw_kw: f64,
    #[serde(default)]
    pub mass_kg: f64,
}

fn default_atmosphere_efficiency() -> f64 {
    1.0
}

/// Id-keyed fuel and engine catalogs resolved by construct references.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub fuels: HashMap<String, FuelDef>,
    #[serde(default)]
    pub engines: HashMap<String, EngineDef>,
}

/// A fuel tank gauge on a construct.
#[derive(Debug, Deserialize, Clone)]
pub struct TankConfig {
    pub fuel_id: String,
    pub capacity_units: f64,
    pub current_units: f64,
}

/// An engine mount on a construct.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineMountConfig {
    pub engine_id: String,
    #[serde(default = "default_engine_count")]
    pub count: u32,
}

fn default_engine_count() -> u32 {
    1
}

/// A mobile construct (spacecraft/station) as authored in a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct ConstructConfig {
    pub id: String,
    pub name: String,
    pub hull_mass_kg: f64,
    #[serde(default)]
    pub module_mass_kg: f64,
    #[serde(default)]
    pub crew_count: u32,
    #[serde(default)]
    pub crew_provisions_kg: f64,
    #[serde(default)]
    pub cargo_mass_kg: f64,
    #[serde(default)]
    pub power_generation_kw: f64,
    #[serde(default)]
    pub tanks: Vec<TankConfig>,
    #[serde(default)]
    pub engines: Vec<EngineMountConfig>,
    #[serde(default)]
    pub has_landing_gear: bool,
    #[serde(default)]
    pub aerobrake_capable: bool,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load rule-pack configuration from a YAML or TOML file.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RulesConfig, ConfigError> {
    load_single(path)
}

/// Load fuel/engine catalogs from a YAML or TOML file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    load_single(path)
}

/// Load construct manifests from a YAML file or a directory of TOML records.
pub fn load_constructs<P: AsRef<Path>>(path: P) -> Result<Vec<ConstructConfig>, ConfigError> {
    load_records(path)
}

/// Load a system snapshot from a YAML file listing body nodes.
pub fn load_system<P: AsRef<Path>>(path: P) -> Result<SystemSnapshot, ConfigError> {
    let nodes: Vec<BodyNode> = load_records(path)?;
    Ok(SystemSnapshot::from_nodes(nodes))
}

fn load_single<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
