use serde::{Deserialize, Serialize};

use crate::dataset::VisitProfile;

/// Ordered health tiers; `Dead` is terminal and absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Excellent,
    Good,
    Regular,
    Poor,
    Dying,
    Dead,
}

impl HealthTier {
    /// Energy gained per kilogram of food eaten at this tier. The 5/4/3/2/1/0
    /// table is preserved exactly as found in the source material.
    pub fn energy_yield_per_kg(self) -> f64 {
        match self {
            HealthTier::Excellent => 5.0,
            HealthTier::Good => 4.0,
            HealthTier::Regular => 3.0,
            HealthTier::Poor => 2.0,
            HealthTier::Dying => 1.0,
            HealthTier::Dead => 0.0,
        }
    }
}

/// Feeding only happens below this energy level.
const FEED_THRESHOLD: f64 = 50.0;

/// Share of a visit that may be spent feeding.
const FEED_TIME_SHARE: f64 = 0.5;

const ENERGY_MAX: f64 = 100.0;

/// What a single star visit did to the carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VisitOutcome {
    pub kg_eaten: f64,
    pub energy_spent: f64,
}

/// The resource-bounded traveling agent.
///
/// A mutable state machine over energy (0..=100), food stock, age and health
/// tier. Once the carrier is dead every mutating operation becomes a no-op.
/// `Clone` yields an independent value; planners always work on a clone and
/// never touch the caller's instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    energy: f64,
    health: HealthTier,
    food_kg: f64,
    start_age: f64,
    current_age: f64,
    death_age: f64,
    lifespan_left: f64,
}

impl Carrier {
    /// Create a carrier, clamping energy into 0..=100 and food to >= 0.
    /// Remaining lifespan is `death_age - start_age`, floored at zero.
    pub fn new(
        energy: f64,
        health: HealthTier,
        food_kg: f64,
        start_age: f64,
        death_age: f64,
    ) -> Self {
        Self {
            energy: energy.clamp(0.0, ENERGY_MAX),
            health,
            food_kg: food_kg.max(0.0),
            start_age,
            current_age: start_age,
            death_age,
            lifespan_left: (death_age - start_age).max(0.0),
        }
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn health(&self) -> HealthTier {
        self.health
    }

    pub fn food_kg(&self) -> f64 {
        self.food_kg
    }

    pub fn start_age(&self) -> f64 {
        self.start_age
    }

    pub fn current_age(&self) -> f64 {
        self.current_age
    }

    pub fn death_age(&self) -> f64 {
        self.death_age
    }

    pub fn lifespan_left(&self) -> f64 {
        self.lifespan_left
    }

    pub fn is_dead(&self) -> bool {
        self.lifespan_left <= 0.0
            || self.current_age >= self.death_age
            || self.health == HealthTier::Dead
    }

    /// Move `distance` along the map: lifespan decreases, age increases.
    /// Negative input is clamped to zero; no operation regains lifespan this
    /// way. Crossing either age threshold kills the carrier.
    pub fn travel(&mut self, distance: f64) {
        if self.is_dead() {
            return;
        }
        let d = distance.max(0.0);
        self.lifespan_left -= d;
        self.current_age += d;
        if self.lifespan_left <= 0.0 || self.current_age >= self.death_age {
            self.health = HealthTier::Dead;
        }
    }

    /// Eat during a star visit. Only acts below the 50-energy threshold, at
    /// most half the visit goes to feeding, and consumption is bounded by the
    /// available stock. Energy gain scales with the health tier's yield per
    /// kilogram, capped at 100. Returns kilograms eaten.
    pub fn feed(&mut self, visit_duration: f64, time_per_kg: f64) -> f64 {
        if self.is_dead() {
            return 0.0;
        }
        if self.energy >= FEED_THRESHOLD {
            return 0.0;
        }
        if visit_duration <= 0.0 || time_per_kg <= 0.0 || self.food_kg <= 0.0 {
            return 0.0;
        }

        let feeding_time = FEED_TIME_SHARE * visit_duration;
        let kg_possible = feeding_time / time_per_kg;
        let kg_eaten = kg_possible.min(self.food_kg).max(0.0);
        if kg_eaten <= 0.0 {
            return 0.0;
        }

        let gained = self.health.energy_yield_per_kg() * kg_eaten;
        self.energy = (self.energy + gained).min(ENERGY_MAX);
        self.food_kg -= kg_eaten;
        kg_eaten
    }

    /// Investigate during a star visit, consuming energy in proportion to the
    /// number of blocks the visit spans. Consumption is clamped to the energy
    /// available; hitting exactly zero kills the carrier on the spot — the
    /// one path by which energy exhaustion rather than lifespan exhaustion
    /// causes death. Returns the energy actually consumed.
    pub fn investigate(
        &mut self,
        visit_duration: f64,
        cost_per_block: f64,
        block_duration: f64,
    ) -> f64 {
        if self.is_dead() {
            return 0.0;
        }
        if visit_duration <= 0.0 || cost_per_block <= 0.0 || block_duration <= 0.0 {
            return 0.0;
        }

        let blocks = visit_duration / block_duration;
        let demand = cost_per_block * blocks;
        let consumed = demand.min(self.energy.max(0.0));
        self.energy -= consumed;
        if self.energy <= 0.0 {
            self.energy = 0.0;
            self.health = HealthTier::Dead;
        }
        consumed
    }

    /// Apply a health event: a (possibly negative) lifespan delta and an
    /// optional tier override. Dropping to zero lifespan or below forces
    /// `Dead` regardless of the requested tier.
    pub fn apply_health_event(&mut self, lifespan_delta: f64, new_tier: Option<HealthTier>) {
        if self.is_dead() {
            return;
        }
        self.lifespan_left += lifespan_delta;
        if self.lifespan_left <= 0.0 {
            self.health = HealthTier::Dead;
        } else if let Some(tier) = new_tier {
            self.health = tier;
        }
    }

    /// Hypergiant passage buff: energy grows by half its current value
    /// (capped at 100) and the food stock doubles.
    pub fn hypergiant_boost(&mut self) {
        if self.is_dead() {
            return;
        }
        self.energy = (self.energy + 0.5 * self.energy).min(ENERGY_MAX);
        self.food_kg *= 2.0;
    }

    /// Run a full star visit from its profile: feed first, then investigate.
    /// Stars without the relevant parameters contribute nothing.
    pub fn visit(&mut self, profile: &VisitProfile, visit_duration: f64) -> VisitOutcome {
        let mut outcome = VisitOutcome::default();
        if visit_duration <= 0.0 {
            return outcome;
        }
        if let Some(time_per_kg) = profile.time_per_kg {
            outcome.kg_eaten = self.feed(visit_duration, time_per_kg);
        }
        if let (Some(cost), Some(block)) =
            (profile.invest_cost_per_block, profile.invest_block_duration)
        {
            outcome.energy_spent = self.investigate(visit_duration, cost, block);
        }
        outcome
    }
}
