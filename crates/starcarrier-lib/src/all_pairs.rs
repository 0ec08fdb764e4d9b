use std::collections::HashMap;

use tracing::debug;

use crate::dataset::StarId;
use crate::error::{Error, Result};
use crate::graph::GraphData;

/// All-pairs shortest paths over dense distance/next-hop matrices
/// (Floyd-Warshall).
///
/// Accepts negative edge weights but not negative cycles. Intended for
/// workloads with many repeated point-to-point queries after one upfront
/// O(V^3) computation, the complementary access pattern to
/// [`crate::shortest_path::ShortestPathEngine`].
#[derive(Debug, Clone)]
pub struct AllPairsEngine {
    nodes: Vec<StarId>,
    index: HashMap<StarId, usize>,
    dist: Vec<Vec<f64>>,
    next: Vec<Vec<Option<StarId>>>,
}

impl AllPairsEngine {
    /// Seed the matrices: 0 on the diagonal, +infinity elsewhere, then fold
    /// in edges keeping the minimum weight over parallel edges (never
    /// summing).
    pub fn new(graph: GraphData) -> Self {
        let nodes = graph.nodes;
        let index: HashMap<StarId, usize> =
            nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let n = nodes.len();

        let mut dist = vec![vec![f64::INFINITY; n]; n];
        let mut next: Vec<Vec<Option<StarId>>> = vec![vec![None; n]; n];

        for i in 0..n {
            dist[i][i] = 0.0;
            next[i][i] = Some(nodes[i]);
        }

        for edge in &graph.edges {
            let (Some(&i), Some(&j)) = (index.get(&edge.from), index.get(&edge.to)) else {
                continue;
            };
            if edge.weight < dist[i][j] {
                dist[i][j] = edge.weight;
                next[i][j] = Some(edge.to);
            }
        }

        Self {
            nodes,
            index,
            dist,
            next,
        }
    }

    /// Triple-nested relaxation over every intermediate star. A negative
    /// diagonal entry afterwards signals a negative cycle through that star
    /// and is surfaced as a failure rather than silently ignored.
    pub fn run(&mut self) -> Result<()> {
        let n = self.nodes.len();
        for k in 0..n {
            for i in 0..n {
                let dik = self.dist[i][k];
                if !dik.is_finite() {
                    continue;
                }
                let first_hop = self.next[i][k];
                for j in 0..n {
                    let alt = dik + self.dist[k][j];
                    if alt < self.dist[i][j] {
                        self.dist[i][j] = alt;
                        // Best path i -> j starts with the first hop of the
                        // best path i -> k.
                        self.next[i][j] = first_hop;
                    }
                }
            }
        }
        debug!(nodes = n, "all-pairs relaxation complete");

        for i in 0..n {
            if self.dist[i][i] < 0.0 {
                return Err(Error::NegativeCycle {
                    star: self.nodes[i],
                });
            }
        }
        Ok(())
    }

    /// Minimal distance between two stars; +infinity for unknown stars or
    /// when no path exists.
    pub fn distance(&self, src: StarId, dst: StarId) -> f64 {
        match (self.index.get(&src), self.index.get(&dst)) {
            (Some(&i), Some(&j)) => self.dist[i][j],
            _ => f64::INFINITY,
        }
    }

    /// Rebuild the src -> dst path from the next-hop matrix. Returns an empty
    /// sequence when either star is unknown or no path exists; a broken
    /// next-hop chain also yields empty rather than looping indefinitely.
    pub fn rebuild_path(&self, src: StarId, dst: StarId) -> Vec<StarId> {
        let (Some(&i), Some(&j)) = (self.index.get(&src), self.index.get(&dst)) else {
            return Vec::new();
        };
        if self.next[i][j].is_none() {
            return Vec::new();
        }

        let mut path = vec![src];
        let mut current = src;
        while current != dst {
            let Some(&row) = self.index.get(&current) else {
                return Vec::new();
            };
            let Some(hop) = self.next[row][j] else {
                return Vec::new();
            };
            current = hop;
            path.push(current);
            if path.len() > self.nodes.len() {
                return Vec::new();
            }
        }
        path
    }
}
