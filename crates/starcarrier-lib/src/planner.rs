use std::collections::{BTreeMap, HashMap, HashSet};

use rand::Rng;
use tracing::debug;

use crate::carrier::Carrier;
use crate::dataset::{BlockedPairs, GalaxyId, StarId, StarMap};
use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::report::{
    CarrierSnapshot, ItinerarySegment, JumpTarget, RecapEntry, RecapKind, RouteReport, StopReason,
};

/// Default hop ceiling; a safety bound against pathological inputs, far above
/// any realistic itinerary length.
pub const DEFAULT_MAX_HOPS: usize = 10_000;

/// Greedy maximal-route planner.
///
/// Simulates the carrier walking the starmap: within the current galaxy it
/// prefers reachable unvisited hypergiants (nearest first), otherwise the
/// nearest unvisited plain star, and uses hypergiants to jump to unvisited
/// galaxies at zero travel cost. The caller's carrier is cloned up front and
/// never mutated; the caller's dataset is only read.
#[derive(Debug)]
pub struct MaxRoutePlanner<'a> {
    starmap: &'a StarMap,
    hypergiants_by_galaxy: BTreeMap<Option<GalaxyId>, Vec<StarId>>,
}

impl<'a> MaxRoutePlanner<'a> {
    pub fn new(starmap: &'a StarMap) -> Self {
        Self {
            starmap,
            hypergiants_by_galaxy: starmap.hypergiants_by_galaxy(),
        }
    }

    /// Plan a maximal resource-feasible itinerary from `start`.
    ///
    /// The random source only decides jump destinations; substituting a
    /// seeded generator makes runs fully reproducible.
    pub fn plan(
        &self,
        start: StarId,
        carrier: &Carrier,
        blocked: &BlockedPairs,
        rng: &mut impl Rng,
        max_hops: usize,
    ) -> Result<RouteReport> {
        if !self.starmap.contains(start) {
            return Err(Error::UnknownStar { id: start });
        }

        let mut sim = carrier.clone();
        let adjacency = build_graph(self.starmap, blocked).adjacency();

        let mut walk = Walk::begin(self.starmap, start);
        let mut hops = 0usize;

        let stopped = loop {
            if hops >= max_hops {
                break StopReason::HopCeiling;
            }
            hops += 1;

            let Some((next_star, distance)) = self.choose_next_in_galaxy(&walk, &adjacency, &sim)
            else {
                // Stuck inside the galaxy; a hypergiant may still offer a way
                // out.
                if self.starmap.is_hypergiant(walk.current) {
                    if let Some(jump) = self.pick_jump(rng, walk.current_galaxy, &walk.visited_galaxies)
                    {
                        walk.jump_via(self.starmap, &mut sim, jump);
                        continue;
                    }
                }
                break StopReason::Exhausted;
            };

            if sim.lifespan_left() <= 0.0 || sim.lifespan_left() - distance < 0.0 {
                break StopReason::LifespanSpent;
            }

            walk.move_to(self.starmap, &mut sim, next_star, distance);

            // Landing on a hypergiant triggers an immediate jump attempt.
            if self.starmap.is_hypergiant(walk.current) {
                if let Some(jump) = self.pick_jump(rng, walk.current_galaxy, &walk.visited_galaxies)
                {
                    walk.jump_via(self.starmap, &mut sim, jump);
                }
            }
        };

        debug!(
            hops,
            stars = walk.visited_stars.len(),
            galaxies = walk.visited_galaxies.len(),
            ?stopped,
            "planning run finished"
        );

        Ok(walk.into_report(&sim, stopped))
    }

    /// Greedy per-step policy: among unvisited same-galaxy neighbours whose
    /// edge weight fits the remaining lifespan, prefer any hypergiant
    /// (nearest first), else the nearest plain star. Ties break by weight
    /// ascending, then id, so the choice is stable.
    fn choose_next_in_galaxy(
        &self,
        walk: &Walk,
        adjacency: &HashMap<StarId, Vec<(StarId, f64)>>,
        sim: &Carrier,
    ) -> Option<(StarId, f64)> {
        let neighbours = adjacency.get(&walk.current)?;
        let mut candidates: Vec<(f64, StarId, bool)> = Vec::new();
        for &(target, distance) in neighbours {
            if walk.visited_stars.contains(&target) {
                continue;
            }
            if self.starmap.galaxy_of(target) != walk.current_galaxy {
                continue;
            }
            if distance > sim.lifespan_left() {
                continue;
            }
            let Some(star) = self.starmap.star(target) else {
                continue;
            };
            candidates.push((distance, target, star.hypergiant));
        }

        if candidates.is_empty() {
            return None;
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        candidates
            .iter()
            .find(|candidate| candidate.2)
            .or_else(|| candidates.first())
            .map(|&(distance, target, _)| (target, distance))
    }

    /// Pick a jump destination: a different, unvisited galaxy holding at
    /// least one hypergiant. Galaxy and landing star are chosen uniformly via
    /// the injected random source.
    fn pick_jump(
        &self,
        rng: &mut impl Rng,
        current_galaxy: Option<GalaxyId>,
        visited_galaxies: &HashSet<Option<GalaxyId>>,
    ) -> Option<JumpTarget> {
        let candidates: Vec<Option<GalaxyId>> = self
            .hypergiants_by_galaxy
            .iter()
            .filter(|(galaxy, stars)| {
                **galaxy != current_galaxy
                    && !visited_galaxies.contains(*galaxy)
                    && !stars.is_empty()
            })
            .map(|(galaxy, _)| *galaxy)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let galaxy = candidates[rng.gen_range(0..candidates.len())];
        let landings = &self.hypergiants_by_galaxy[&galaxy];
        let landing_star = landings[rng.gen_range(0..landings.len())];
        debug!(?galaxy, landing_star, "hyperjump selected");

        Some(JumpTarget {
            galaxy_id: galaxy,
            landing_star,
        })
    }
}

/// Mutable traversal state for one planning run.
struct Walk {
    current: StarId,
    current_galaxy: Option<GalaxyId>,
    visited_stars: HashSet<StarId>,
    visited_galaxies: HashSet<Option<GalaxyId>>,
    closed: Vec<ItinerarySegment>,
    open: ItinerarySegment,
    recap: Vec<RecapEntry>,
}

impl Walk {
    fn begin(starmap: &StarMap, start: StarId) -> Self {
        let galaxy = starmap.galaxy_of(start);
        Self {
            current: start,
            current_galaxy: galaxy,
            visited_stars: HashSet::from([start]),
            visited_galaxies: HashSet::from([galaxy]),
            closed: Vec::new(),
            open: ItinerarySegment::open(galaxy, start),
            recap: Vec::new(),
        }
    }

    /// Travel one edge and record the move.
    fn move_to(&mut self, starmap: &StarMap, sim: &mut Carrier, target: StarId, distance: f64) {
        let before = CarrierSnapshot::from(&*sim);
        sim.travel(distance);
        let after = CarrierSnapshot::from(&*sim);

        let label = starmap
            .label(target)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Star {target}"));
        self.recap.push(
            RecapEntry {
                kind: RecapKind::Move,
                galaxy_id: self.current_galaxy,
                star: target,
                label: label.clone(),
                hypergiant: starmap.is_hypergiant(target),
                distance: Some(distance),
                detail: format!("Reached {label} (-{distance:.1} lifespan)"),
                energy_delta: 0.0,
                food_delta: 0.0,
                lifespan_delta: 0.0,
            }
            .deltas(&before, &after),
        );

        self.current = target;
        self.visited_stars.insert(target);
        self.open.path.push(target);
    }

    /// Apply the hypergiant buff, close the current segment with the jump
    /// info and open a fresh one at the landing star.
    fn jump_via(&mut self, starmap: &StarMap, sim: &mut Carrier, jump: JumpTarget) {
        let before = CarrierSnapshot::from(&*sim);
        sim.hypergiant_boost();
        let after = CarrierSnapshot::from(&*sim);

        let label = starmap
            .label(self.current)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Star {}", self.current));
        self.recap.push(
            RecapEntry {
                kind: RecapKind::Buff,
                galaxy_id: self.current_galaxy,
                star: self.current,
                label: label.clone(),
                hypergiant: true,
                distance: None,
                detail: format!("{label}: hypergiant buff applied before jump"),
                energy_delta: 0.0,
                food_delta: 0.0,
                lifespan_delta: 0.0,
            }
            .deltas(&before, &after),
        );

        self.open.exit_hypergiant = Some(self.current);
        self.open.jump_to = Some(jump);
        let finished = std::mem::replace(
            &mut self.open,
            ItinerarySegment::open(jump.galaxy_id, jump.landing_star),
        );
        self.closed.push(finished);

        self.current = jump.landing_star;
        self.current_galaxy = jump.galaxy_id;
        self.visited_galaxies.insert(jump.galaxy_id);
        self.visited_stars.insert(jump.landing_star);
    }

    /// Close the open segment (every termination path appends it exactly
    /// once) and assemble the report.
    fn into_report(mut self, sim: &Carrier, stopped: StopReason) -> RouteReport {
        self.closed.push(self.open);

        let visited_stars: Vec<StarId> = self
            .closed
            .iter()
            .flat_map(|segment| segment.path.iter().copied())
            .collect();
        let mut visited_galaxies: Vec<Option<GalaxyId>> =
            self.visited_galaxies.into_iter().collect();
        visited_galaxies.sort_unstable();

        RouteReport {
            segments: self.closed,
            visited_stars,
            visited_galaxies,
            carrier: CarrierSnapshot::from(sim),
            recap: self.recap,
            stopped,
        }
    }
}
