//! Common test utilities and fixture starmaps.
#![allow(dead_code)]

use starcarrier_lib::{
    Carrier, GalaxyId, HealthTier, Position, Star, StarId, StarLink, StarMap, VisitProfile,
};

/// Builder to create `Star` instances in tests with sensible defaults.
pub struct StarBuilder {
    star: Star,
}

impl StarBuilder {
    #[must_use]
    pub fn new(id: StarId, x: f64, y: f64) -> Self {
        Self {
            star: Star {
                id,
                label: format!("Star {id}"),
                position: Position { x, y },
                galaxy_id: None,
                hypergiant: false,
                links: Vec::new(),
                visit: VisitProfile::default(),
            },
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.star.label = label.to_string();
        self
    }

    pub fn galaxy(mut self, galaxy: GalaxyId) -> Self {
        self.star.galaxy_id = Some(galaxy);
        self
    }

    pub fn hypergiant(mut self) -> Self {
        self.star.hypergiant = true;
        self
    }

    pub fn link(mut self, target: StarId) -> Self {
        self.star.links.push(StarLink {
            target,
            weight: None,
            capacity: None,
        });
        self
    }

    pub fn weighted_link(mut self, target: StarId, weight: f64) -> Self {
        self.star.links.push(StarLink {
            target,
            weight: Some(weight),
            capacity: None,
        });
        self
    }

    pub fn capacity_link(mut self, target: StarId, capacity: f64) -> Self {
        self.star.links.push(StarLink {
            target,
            weight: None,
            capacity: Some(capacity),
        });
        self
    }

    pub fn build(self) -> Star {
        self.star
    }
}

/// Four stars in a row inside galaxy 1, declared weights 1-2-3.
pub fn line_map() -> StarMap {
    StarMap::from_stars([
        StarBuilder::new(1, 0.0, 0.0)
            .galaxy(1)
            .weighted_link(2, 1.0)
            .build(),
        StarBuilder::new(2, 1.0, 0.0)
            .galaxy(1)
            .weighted_link(3, 2.0)
            .build(),
        StarBuilder::new(3, 3.0, 0.0)
            .galaxy(1)
            .weighted_link(4, 3.0)
            .build(),
        StarBuilder::new(4, 6.0, 0.0).galaxy(1).build(),
    ])
}

/// Two galaxies bridged only by hypergiant jumps: galaxy 1 holds stars
/// 1-2-3 (3 is a hypergiant), galaxy 2 holds 10-11 (10 is a hypergiant).
pub fn two_galaxy_map() -> StarMap {
    StarMap::from_stars([
        StarBuilder::new(1, 0.0, 0.0)
            .galaxy(1)
            .weighted_link(2, 2.0)
            .build(),
        StarBuilder::new(2, 2.0, 0.0)
            .galaxy(1)
            .weighted_link(3, 2.0)
            .build(),
        StarBuilder::new(3, 4.0, 0.0)
            .galaxy(1)
            .hypergiant()
            .build(),
        StarBuilder::new(10, 100.0, 0.0)
            .galaxy(2)
            .hypergiant()
            .weighted_link(11, 1.0)
            .build(),
        StarBuilder::new(11, 101.0, 0.0).galaxy(2).build(),
    ])
}

/// Carrier in regular health with the given resources, starting at age zero.
pub fn carrier(energy: f64, food_kg: f64, lifespan: f64) -> Carrier {
    Carrier::new(energy, HealthTier::Regular, food_kg, 0.0, lifespan)
}
