use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::dataset::{BlockedPairs, StarId, StarLink, StarMap};
use crate::error::{Error, Result};

/// Capacity assumed for links that do not declare one when building a flow
/// network.
const DEFAULT_CAPACITY: f64 = 1.0;

/// Directed weighted edge within a constructed graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub from: StarId,
    pub to: StarId,
    pub weight: f64,
}

/// Normalized node/edge lists shared by every algorithm engine.
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    /// Distinct star identifiers in ascending order.
    pub nodes: Vec<StarId>,
    /// Directed edges; every unblocked declared link appears once per
    /// direction.
    pub edges: Vec<WeightedEdge>,
}

impl GraphData {
    /// Group edges into an adjacency map. Every node gets an entry, even
    /// without outgoing edges.
    pub fn adjacency(&self) -> HashMap<StarId, Vec<(StarId, f64)>> {
        let mut adjacency: HashMap<StarId, Vec<(StarId, f64)>> = HashMap::new();
        for &id in &self.nodes {
            adjacency.entry(id).or_default();
        }
        for edge in &self.edges {
            adjacency
                .entry(edge.from)
                .or_default()
                .push((edge.to, edge.weight));
        }
        adjacency
    }
}

/// Build the traversal graph for the shortest-path engines and the planner.
///
/// Every declared link produces exactly two directed edges (u -> v, v -> u)
/// unless the unordered pair is blocked, in which case neither is produced.
/// The edge weight is the link's declared weight when present, otherwise the
/// Euclidean distance between the two stars. Links referencing undeclared
/// stars are skipped; the build itself never fails.
pub fn build_graph(starmap: &StarMap, blocked: &BlockedPairs) -> GraphData {
    let outcome = build_edges(starmap, blocked, |link, fallback| {
        Ok(link.weight.unwrap_or(fallback))
    });
    match outcome {
        Ok(graph) => graph,
        Err(_) => unreachable!("weight extraction is total"),
    }
}

/// Build the capacity graph for the max-flow engine.
///
/// Same shape as [`build_graph`] with capacity semantics: the declared link
/// capacity when present, else 1.0. A negative or non-finite declared
/// capacity has no sound flow-network interpretation and is rejected at build
/// time rather than skipped.
pub fn build_flow_graph(starmap: &StarMap, blocked: &BlockedPairs) -> Result<GraphData> {
    build_edges(starmap, blocked, |link, _fallback| {
        let value = link.capacity.unwrap_or(DEFAULT_CAPACITY);
        if !value.is_finite() || value < 0.0 {
            return Err(value);
        }
        Ok(value)
    })
}

/// Shared link walk for both graph flavours. `pick` maps a link plus the
/// Euclidean fallback to the edge weight, or rejects the raw declared value.
fn build_edges(
    starmap: &StarMap,
    blocked: &BlockedPairs,
    pick: impl Fn(&StarLink, f64) -> std::result::Result<f64, f64>,
) -> Result<GraphData> {
    let nodes = starmap.sorted_ids();
    let mut edges = Vec::new();
    let mut seen: HashSet<(StarId, StarId)> = HashSet::new();
    let mut skipped_targets = 0usize;

    for &u in &nodes {
        let star = starmap.star(u).expect("sorted_ids yields known stars");
        for link in &star.links {
            let v = link.target;
            let Some(target) = starmap.star(v) else {
                skipped_targets += 1;
                continue;
            };
            if blocked.is_blocked(u, v) {
                continue;
            }

            let pair = if u <= v { (u, v) } else { (v, u) };
            if !seen.insert(pair) {
                continue;
            }

            let fallback = star.position.distance_to(&target.position);
            let weight = pick(link, fallback)
                .map_err(|value| Error::InvalidCapacity { from: u, to: v, value })?;

            edges.push(WeightedEdge {
                from: u,
                to: v,
                weight,
            });
            edges.push(WeightedEdge {
                from: v,
                to: u,
                weight,
            });
        }
    }

    if skipped_targets > 0 {
        debug!(skipped_targets, "links referencing undeclared stars skipped");
    }
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        blocked = blocked.len(),
        "graph built"
    );

    Ok(GraphData { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Position, Star, VisitProfile};

    fn star(id: StarId, x: f64, y: f64, links: Vec<StarLink>) -> Star {
        Star {
            id,
            label: format!("S{id}"),
            position: Position { x, y },
            galaxy_id: None,
            hypergiant: false,
            links,
            visit: VisitProfile::default(),
        }
    }

    fn link(target: StarId) -> StarLink {
        StarLink {
            target,
            weight: None,
            capacity: None,
        }
    }

    #[test]
    fn euclidean_fallback_when_no_weight_declared() {
        let map = StarMap::from_stars([
            star(1, 0.0, 0.0, vec![link(2)]),
            star(2, 3.0, 4.0, vec![]),
        ]);
        let graph = build_graph(&map, &BlockedPairs::new());
        assert_eq!(graph.edges.len(), 2);
        assert!((graph.edges[0].weight - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_declarations_collapse_to_one_pair() {
        // Both endpoints declare the same link; only one bidirectional pair
        // may come out.
        let map = StarMap::from_stars([
            star(1, 0.0, 0.0, vec![link(2)]),
            star(2, 1.0, 0.0, vec![link(1)]),
        ]);
        let graph = build_graph(&map, &BlockedPairs::new());
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn dangling_link_targets_are_skipped() {
        let map = StarMap::from_stars([star(1, 0.0, 0.0, vec![link(99)])]);
        let graph = build_graph(&map, &BlockedPairs::new());
        assert_eq!(graph.nodes, vec![1]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let map = StarMap::from_stars([
            star(
                1,
                0.0,
                0.0,
                vec![StarLink {
                    target: 2,
                    weight: None,
                    capacity: Some(-3.0),
                }],
            ),
            star(2, 1.0, 0.0, vec![]),
        ]);
        let err = build_flow_graph(&map, &BlockedPairs::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidCapacity { from: 1, to: 2, .. }));
    }
}
