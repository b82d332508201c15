//! Plan, segment, and request types for the transit planner.

use serde::{Deserialize, Serialize};

use astro_core::vector::Vector3;
use astro_performance::ConstructSpecs;
use astro_zones::ParkingBand;

/// Segment classification within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Accelerate,
    Coast,
    Brake,
    Aerobrake,
}

/// Time-indexed sample along a segment's path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathPoint {
    pub time_s: f64,
    pub position_km: Vector3,
    pub speed_m_s: f64,
}

/// One contiguous phase of a plan. Segments tile `[start, start+total]`
/// exactly, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start_time_s: f64,
    pub end_time_s: f64,
    /// Propulsive delta-v only; speed shed by aerobraking is not billed.
    pub delta_v_m_s: f64,
    pub points: Vec<PathPoint>,
}

/// Carried-over state threading one leg's arrival into the next departure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChainState {
    pub time_s: f64,
    pub position_km: Vector3,
    pub velocity_km_s: Vector3,
    pub fuel_remaining_kg: f64,
}

/// Burn-profile preset. One solver serves all three; the archetype only
/// selects the accelerate/brake time fractions fed into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Coast-dominated, minimizes fuel under the g ceiling.
    Economy,
    /// Continuous burn at max-g, no coast.
    Fast,
    /// Caller-tuned accelerate/brake split; also used for manual re-solving.
    Custom,
}

impl Archetype {
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Economy => "Economy",
            Archetype::Fast => "Fast",
            Archetype::Custom => "Custom",
        }
    }
}

/// Which archetypes a request should enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// All three presets, ordered Economy, Fast, Custom.
    Survey,
    Single(Archetype),
}

/// Lagrange arrival offsets along the target's orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LagrangePoint {
    /// 60° ahead of the target.
    L4,
    /// 60° behind the target.
    L5,
}

/// Desired arrival placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalTarget {
    /// Raw intercept; no insertion burn.
    Intercept,
    /// Capture into a parking band around the target.
    ParkingBand(ParkingBand),
    /// Co-orbital station offset from the target.
    Lagrange(LagrangePoint),
}

/// Maneuver parameters supplied by the caller (slider values, toggles).
#[derive(Debug, Clone, Copy)]
pub struct ManeuverParams {
    /// Acceleration ceiling in g.
    pub max_accel_g: f64,
    /// Custom-preset accelerate fraction of total time; `None` uses the rule
    /// pack default.
    pub accel_fraction: Option<f64>,
    pub brake_fraction: Option<f64>,
    /// Residual speed to keep at intercept instead of cancelling to rest.
    pub intercept_speed_m_s: Option<f64>,
    pub brake_at_arrival: bool,
    pub allow_aerobrake: bool,
}

impl Default for ManeuverParams {
    fn default() -> Self {
        Self {
            max_accel_g: 1.0,
            accel_fraction: None,
            brake_fraction: None,
            intercept_speed_m_s: None,
            brake_at_arrival: true,
            allow_aerobrake: false,
        }
    }
}

/// The ship as the planner sees it: masses, engine figures, fuel on board.
#[derive(Debug, Clone, Copy)]
pub struct ShipModel {
    pub wet_mass_kg: f64,
    pub dry_mass_kg: f64,
    pub thrust_n: f64,
    pub isp_s: f64,
    pub fuel_available_kg: f64,
    pub aerobrake_capable: bool,
}

impl ShipModel {
    /// Build a ship model from a performance spec sheet.
    pub fn from_specs(specs: &ConstructSpecs, thrust_n: f64, aerobrake_capable: bool) -> Self {
        Self {
            wet_mass_kg: specs.total_mass_kg,
            dry_mass_kg: specs.total_mass_kg - specs.fuel_mass_kg,
            thrust_n,
            isp_s: specs.combined_isp_s,
            fuel_available_kg: specs.fuel_mass_kg,
            aerobrake_capable,
        }
    }

    /// Apply fixed-mass / fixed-Isp overrides used for chained legs and
    /// what-if sliders.
    pub fn with_overrides(mut self, mass_kg: Option<f64>, isp_s: Option<f64>) -> Self {
        if let Some(mass) = mass_kg {
            let fuel = (mass - self.dry_mass_kg).max(0.0);
            self.wet_mass_kg = mass;
            self.fuel_available_kg = self.fuel_available_kg.min(fuel);
        }
        if let Some(isp) = isp_s {
            self.isp_s = isp;
        }
        self
    }
}

/// A planning request for one leg.
#[derive(Debug, Clone)]
pub struct TransitRequest {
    pub origin_id: String,
    pub target_id: String,
    pub departure_time_s: f64,
    pub ship: ShipModel,
    pub params: ManeuverParams,
    pub arrival: ArrivalTarget,
    /// Departure state carried over from a previous leg, replacing the
    /// origin body's propagated state.
    pub chain_state: Option<ChainState>,
}

/// A fully materialized candidate plan.
#[derive(Debug, Clone, Serialize)]
pub struct TransitPlan {
    pub origin_id: String,
    pub target_id: String,
    pub archetype: Archetype,
    pub start_time_s: f64,
    pub total_time_s: f64,
    pub total_delta_v_m_s: f64,
    pub fuel_used_kg: f64,
    pub arrival_speed_m_s: f64,
    pub max_accel_g: f64,
    pub segments: Vec<Segment>,
    pub tags: Vec<String>,
    /// Set when the plan exceeds the practical delta-v ceiling; the plan is
    /// kept so callers can report "N plans hidden" without data loss.
    pub hidden_reason: Option<String>,
    /// Fuel shortfall is a feasibility flag, never a solve failure.
    pub insufficient_fuel: bool,
    /// False when a solver hit its iteration budget; the plan is the best
    /// iterate, not a converged solution.
    pub converged: bool,
    /// Departure state for a follow-on leg.
    pub final_state: ChainState,
}
