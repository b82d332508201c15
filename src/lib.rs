//! Orbital mechanics and transit planning core for star-system worldbuilding.
//!
//! The heavy lifting lives in the member crates under `crates/`; this
//! facade re-exports them under short module names so front-ends (CLI,
//! GUI, exporters) can depend on a single crate.

pub use astro_config as config;
pub use astro_core as core;
pub use astro_export as export;
pub use astro_orbits as orbits;
pub use astro_performance as performance;
pub use astro_system as system;
pub use astro_telemetry as telemetry;
pub use astro_transit as transit;
pub use astro_zones as zones;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
