use std::collections::HashMap;

use tracing::debug;

use crate::dataset::StarId;
use crate::error::{Error, Result};
use crate::graph::{GraphData, WeightedEdge};

/// Distance and predecessor maps produced by a single-source run.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Minimal known distance per star; `f64::INFINITY` when unreachable.
    pub distances: HashMap<StarId, f64>,
    /// Predecessor on the best known path; `None` for the origin and for
    /// unreachable stars.
    pub predecessors: HashMap<StarId, Option<StarId>>,
}

/// Single-source shortest paths over the full edge list (Bellman-Ford).
///
/// Accepts negative edge weights and detects reachable negative-weight
/// cycles, the case where no finite answer exists. Complexity O(V * E);
/// deterministic given the edge iteration order.
#[derive(Debug, Clone)]
pub struct ShortestPathEngine {
    nodes: Vec<StarId>,
    edges: Vec<WeightedEdge>,
}

impl ShortestPathEngine {
    pub fn new(graph: GraphData) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }

    /// Relax all edges up to |V| - 1 times from `origin`, stopping early once
    /// a full pass performs no update. One extra pass afterwards distinguishes
    /// convergence from a reachable negative cycle.
    pub fn run(&self, origin: StarId) -> Result<ShortestPaths> {
        if !self.nodes.contains(&origin) {
            return Err(Error::UnknownStar { id: origin });
        }

        let mut distances: HashMap<StarId, f64> = self
            .nodes
            .iter()
            .map(|&id| (id, f64::INFINITY))
            .collect();
        let mut predecessors: HashMap<StarId, Option<StarId>> =
            self.nodes.iter().map(|&id| (id, None)).collect();
        distances.insert(origin, 0.0);

        let mut passes = 0usize;
        for _ in 1..self.nodes.len() {
            passes += 1;
            let mut changed = false;
            for edge in &self.edges {
                let from = distances[&edge.from];
                if from.is_finite() && from + edge.weight < distances[&edge.to] {
                    distances.insert(edge.to, from + edge.weight);
                    predecessors.insert(edge.to, Some(edge.from));
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        debug!(passes, origin, "relaxation converged");

        for edge in &self.edges {
            let from = distances[&edge.from];
            if from.is_finite() && from + edge.weight < distances[&edge.to] {
                return Err(Error::NegativeCycle { star: edge.to });
            }
        }

        Ok(ShortestPaths {
            distances,
            predecessors,
        })
    }

    /// Rebuild the origin -> target path by walking predecessor links back to
    /// a predecessor-less star.
    ///
    /// When `target` is unreachable the walk stops immediately and the result
    /// degenerates to `[target]`; callers must treat that as "no path"
    /// whenever `target` is not the origin itself.
    pub fn rebuild_path(
        predecessors: &HashMap<StarId, Option<StarId>>,
        target: StarId,
    ) -> Vec<StarId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(star) = current {
            path.push(star);
            current = predecessors.get(&star).copied().flatten();
        }
        path.reverse();
        path
    }
}
