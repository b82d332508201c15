//! Id-keyed body arena with parent references and absolute state resolution.
//!
//! The snapshot is a value type: planners receive it read-only, compute, and
//! return. Parent links are ids rather than pointers so callers can clone or
//! copy-on-write snapshots cheaply for speculative recomputation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use astro_core::constants::{SOLAR_RADIUS_KM, SOLAR_TEMPERATURE_K};
use astro_core::vector;
use astro_orbits::{Orbit, StateVector, propagate};

/// Maximum parent-chain depth before a cycle is assumed.
const MAX_ANCESTOR_DEPTH: usize = 64;

/// Node classification for bodies in the system graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Belt,
    Ring,
    Barycenter,
}

/// Atmospheric metadata used by boundary and aerobrake heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Atmosphere {
    pub exists: bool,
    pub scale_height_km: f64,
    pub surface_density_kg_m3: f64,
}

/// A body (or barycenter) in the system graph. Roots carry no orbit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyNode {
    pub id: String,
    pub name: String,
    pub kind: BodyKind,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub orbit: Option<Orbit>,
    pub mass_kg: f64,
    /// Combined member mass for barycenters; falls back to `mass_kg`.
    #[serde(default)]
    pub effective_mass_kg: Option<f64>,
    #[serde(default)]
    pub radius_km: f64,
    #[serde(default)]
    pub rotation_period_s: f64,
    #[serde(default)]
    pub atmosphere: Option<Atmosphere>,
    /// Effective temperature for stars (K).
    #[serde(default)]
    pub surface_temperature_k: Option<f64>,
    /// Radiation output override in solar luminosities, for compact hosts
    /// whose output is not tied to their photosphere.
    #[serde(default)]
    pub luminosity_solar_override: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BodyNode {
    /// Mass used for gravitational dominance checks.
    pub fn gravitating_mass_kg(&self) -> f64 {
        self.effective_mass_kg.unwrap_or(self.mass_kg)
    }

    /// Gravitational parameter μ = G·M (km³/s²).
    pub fn mu_km3_s2(&self) -> f64 {
        astro_core::constants::G_KM3_KG_S2 * self.gravitating_mass_kg()
    }

    /// Bolometric luminosity in solar units, from the blackbody scaling
    /// `(R/R☉)²·(T/T☉)⁴` unless an explicit output override is present.
    /// Flux-indexed so compact hosts with tiny radii still radiate.
    pub fn luminosity_solar(&self) -> f64 {
        if let Some(l) = self.luminosity_solar_override {
            return l.max(0.0);
        }
        let temperature = match self.surface_temperature_k {
            Some(t) if t > 0.0 => t,
            _ => return 0.0,
        };
        if self.radius_km <= 0.0 {
            return 0.0;
        }
        let r_ratio = self.radius_km / SOLAR_RADIUS_KM;
        let t_ratio = temperature / SOLAR_TEMPERATURE_K;
        r_ratio * r_ratio * t_ratio.powi(4)
    }
}

/// Errors surfaced when resolving the body graph.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("unknown body id '{0}'")]
    UnknownNode(String),
    #[error("parent chain for '{0}' exceeds depth limit (cycle?)")]
    CycleDetected(String),
}

/// Immutable snapshot of a star system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub nodes: HashMap<String, BodyNode>,
}

impl SystemSnapshot {
    /// Build a snapshot from a node list, keying by id.
    pub fn from_nodes(nodes: Vec<BodyNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Result<&BodyNode, SystemError> {
        self.nodes
            .get(id)
            .ok_or_else(|| SystemError::UnknownNode(id.to_string()))
    }

    /// Ancestor ids from the node's parent up to its root, nearest first.
    pub fn ancestors(&self, id: &str) -> Result<Vec<&BodyNode>, SystemError> {
        let mut chain = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent_id) = &current.parent_id {
            if chain.len() >= MAX_ANCESTOR_DEPTH {
                return Err(SystemError::CycleDetected(id.to_string()));
            }
            let parent = self.node(parent_id)?;
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// The root body above `id` (the node itself when unparented).
    pub fn root_of(&self, id: &str) -> Result<&BodyNode, SystemError> {
        let chain = self.ancestors(id)?;
        Ok(chain.last().copied().unwrap_or(self.node(id)?))
    }

    /// The primary star governing `id`'s root, if any.
    pub fn primary_star(&self, id: &str) -> Result<Option<&BodyNode>, SystemError> {
        let root = self.root_of(id)?;
        if root.kind == BodyKind::Star {
            return Ok(Some(root));
        }
        // Barycenter roots: pick the most luminous stellar child.
        Ok(self
            .nodes
            .values()
            .filter(|n| n.kind == BodyKind::Star && n.parent_id.as_deref() == Some(&root.id))
            .max_by(|a, b| {
                a.luminosity_solar()
                    .partial_cmp(&b.luminosity_solar())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    // Equal luminosities resolve by id so the answer does not
                    // depend on map iteration order.
                    .then_with(|| b.id.cmp(&a.id))
            }))
    }

    /// Absolute state of a node at time `t`: the recursive sum of host-centered
    /// propagation along the parent chain. Barycenters resolve before their
    /// members because summation walks from the node up to the root.
    pub fn absolute_state(&self, id: &str, t_s: f64) -> Result<StateVector, SystemError> {
        let mut position = [0.0; 3];
        let mut velocity = [0.0; 3];
        let mut current = self.node(id)?;
        let mut depth = 0;

        loop {
            if let Some(orbit) = &current.orbit {
                let local = propagate(orbit, t_s);
                position = vector::add(&position, &local.position_km);
                velocity = vector::add(&velocity, &local.velocity_km_s);
            }
            match &current.parent_id {
                Some(parent_id) => {
                    depth += 1;
                    if depth > MAX_ANCESTOR_DEPTH {
                        return Err(SystemError::CycleDetected(id.to_string()));
                    }
                    current = self.node(parent_id)?;
                }
                None => break,
            }
        }

        Ok(StateVector {
            position_km: position,
            velocity_km_s: velocity,
        })
    }
}
