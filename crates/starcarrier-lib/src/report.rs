use std::fmt::Write;

use serde::Serialize;

use crate::carrier::{Carrier, HealthTier};
use crate::dataset::{GalaxyId, StarId};

/// Why a planning run stopped. All of these are normal terminations recorded
/// for the caller to interpret, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No further move or jump was possible.
    Exhausted,
    /// The next move would have cost more lifespan than remained.
    LifespanSpent,
    /// The configurable hop ceiling was reached; a safety bound against
    /// pathological inputs rather than a normal termination path.
    HopCeiling,
}

/// Read-only snapshot of the simulated carrier's resources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarrierSnapshot {
    pub energy: f64,
    pub food_kg: f64,
    pub current_age: f64,
    pub lifespan_left: f64,
    pub health: HealthTier,
}

impl From<&Carrier> for CarrierSnapshot {
    fn from(carrier: &Carrier) -> Self {
        Self {
            energy: carrier.energy(),
            food_kg: carrier.food_kg(),
            current_age: carrier.current_age(),
            lifespan_left: carrier.lifespan_left(),
            health: carrier.health(),
        }
    }
}

/// Destination of an intergalactic jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpTarget {
    pub galaxy_id: Option<GalaxyId>,
    pub landing_star: StarId,
}

/// Contiguous stretch of a route inside one galaxy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItinerarySegment {
    pub galaxy_id: Option<GalaxyId>,
    pub entry_star: StarId,
    /// Stars visited within the galaxy, in traversal order (entry included).
    pub path: Vec<StarId>,
    /// Hypergiant the segment left through, when it ended in a jump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_hypergiant: Option<StarId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump_to: Option<JumpTarget>,
}

impl ItinerarySegment {
    pub(crate) fn open(galaxy_id: Option<GalaxyId>, entry_star: StarId) -> Self {
        Self {
            galaxy_id,
            entry_star,
            path: vec![entry_star],
            exit_hypergiant: None,
            jump_to: None,
        }
    }
}

/// What kind of event a recap row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecapKind {
    Move,
    Buff,
}

/// One step of the planning simulation, suitable for external reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapEntry {
    pub kind: RecapKind,
    pub galaxy_id: Option<GalaxyId>,
    pub star: StarId,
    pub label: String,
    pub hypergiant: bool,
    /// Distance traveled; absent on buff rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub detail: String,
    pub energy_delta: f64,
    pub food_delta: f64,
    pub lifespan_delta: f64,
}

impl RecapEntry {
    pub(crate) fn deltas(mut self, before: &CarrierSnapshot, after: &CarrierSnapshot) -> Self {
        self.energy_delta = after.energy - before.energy;
        self.food_delta = after.food_kg - before.food_kg;
        self.lifespan_delta = after.lifespan_left - before.lifespan_left;
        self
    }
}

/// Full result of a maximal-route planning run: the per-galaxy itinerary, the
/// cumulative visit bookkeeping, the simulated carrier's final state and a
/// step-by-step recap. Plain read-only data with no behavior beyond
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub segments: Vec<ItinerarySegment>,
    /// All visited stars in traversal order, flattened across segments.
    pub visited_stars: Vec<StarId>,
    /// Galaxies touched by the run, sorted for stable output.
    pub visited_galaxies: Vec<Option<GalaxyId>>,
    pub carrier: CarrierSnapshot,
    pub recap: Vec<RecapEntry>,
    pub stopped: StopReason,
}

impl RouteReport {
    /// Number of inter-star moves across the whole itinerary.
    pub fn hop_count(&self) -> usize {
        self.recap
            .iter()
            .filter(|entry| entry.kind == RecapKind::Move)
            .count()
    }

    /// Number of intergalactic jumps taken.
    pub fn jump_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| segment.jump_to.is_some())
            .count()
    }

    /// Plain-text rendering for reporting collaborators.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Maximal route: {} stars across {} galaxies ({} hops, {} jumps)",
            self.visited_stars.len(),
            self.visited_galaxies.len(),
            self.hop_count(),
            self.jump_count(),
        );
        for segment in &self.segments {
            let galaxy = match segment.galaxy_id {
                Some(id) => format!("galaxy {id}"),
                None => "no galaxy".to_string(),
            };
            let path = segment
                .path
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            match &segment.jump_to {
                Some(jump) => {
                    let dest = match jump.galaxy_id {
                        Some(id) => format!("galaxy {id}"),
                        None => "no galaxy".to_string(),
                    };
                    let _ = writeln!(
                        buffer,
                        "  [{galaxy}] {path} => jump to {dest} (landing {})",
                        jump.landing_star
                    );
                }
                None => {
                    let _ = writeln!(buffer, "  [{galaxy}] {path}");
                }
            }
        }
        let _ = writeln!(
            buffer,
            "Carrier: energy {:.1}, food {:.1} kg, lifespan left {:.1} ({:?})",
            self.carrier.energy, self.carrier.food_kg, self.carrier.lifespan_left, self.stopped
        );
        buffer
    }
}
