//! Keplerian orbital elements, propagation, and manoeuvre estimators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use astro_core::vector::Vector3;

pub mod kepler;
pub mod maneuvers;
mod propagate;

pub use propagate::{orbital_period, propagate};

/// Classical orbital elements relative to a host body.
///
/// Angles are radians; the optional fixed angular rate replaces Keplerian
/// mean motion for surface-locked objects that rotate rigidly with the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_rad: f64,
    #[serde(default)]
    pub arg_periapsis_rad: f64,
    #[serde(default)]
    pub ascending_node_rad: f64,
    #[serde(default)]
    pub mean_anomaly_epoch_rad: f64,
    #[serde(default)]
    pub fixed_angular_rate_rad_s: Option<f64>,
}

/// A bound orbit around a named host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orbit {
    pub host_id: String,
    pub mu_km3_s2: f64,
    #[serde(default)]
    pub epoch_s: f64,
    pub elements: OrbitalElements,
}

/// Host-centered position and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
}

impl StateVector {
    /// The origin state, used for root bodies and degenerate orbits.
    pub fn zero() -> Self {
        Self {
            position_km: [0.0; 3],
            velocity_km_s: [0.0; 3],
        }
    }
}

/// Validation failures for user-supplied elements.
#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("semi-major axis must be positive, got {0} km")]
    NonPositiveSemiMajorAxis(f64),
    #[error("eccentricity must lie in [0, 1) for bound orbits, got {0}")]
    EccentricityOutOfRange(f64),
    #[error("gravitational parameter must be positive, got {0} km^3/s^2")]
    NonPositiveMu(f64),
}

impl Orbit {
    /// Reject elements that cannot describe a bound orbit.
    ///
    /// Propagation itself degrades gracefully on degenerate inputs; this is
    /// the strict check applied at planner entry points.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let e = &self.elements;
        if e.semi_major_axis_km <= 0.0 {
            return Err(OrbitError::NonPositiveSemiMajorAxis(e.semi_major_axis_km));
        }
        if !(0.0..1.0).contains(&e.eccentricity) {
            return Err(OrbitError::EccentricityOutOfRange(e.eccentricity));
        }
        if self.mu_km3_s2 <= 0.0 {
            return Err(OrbitError::NonPositiveMu(self.mu_km3_s2));
        }
        Ok(())
    }
}
