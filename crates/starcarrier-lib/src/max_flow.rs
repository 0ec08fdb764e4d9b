use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::dataset::StarId;
use crate::error::{Error, Result};
use crate::graph::GraphData;

/// Residual capacities below this are treated as exhausted so accumulated
/// floating-point error cannot stall the augmenting-path search.
const EPS: f64 = 1e-12;

/// Result of a max-flow computation.
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    /// Total flow pushed from source to sink.
    pub max_flow: f64,
    /// Final residual capacities after all augmentations.
    pub residual: HashMap<StarId, HashMap<StarId, f64>>,
    /// Stars reachable from the source in the final residual graph; one side
    /// of a minimum cut (the complement is the other).
    pub source_side: HashSet<StarId>,
}

/// Maximum flow between two stars via BFS augmenting paths (Edmonds-Karp).
///
/// Construction accumulates capacities over parallel directed edges and
/// rejects invalid capacities outright; this is the one engine where
/// malformed edge data fails fast, since a negative capacity has no sound
/// flow-network interpretation. Complexity O(V * E^2).
#[derive(Debug, Clone)]
pub struct MaxFlowEngine {
    nodes: Vec<StarId>,
    capacity: HashMap<StarId, HashMap<StarId, f64>>,
}

impl MaxFlowEngine {
    pub fn new(graph: GraphData) -> Result<Self> {
        let nodes = graph.nodes;
        let mut capacity: HashMap<StarId, HashMap<StarId, f64>> = HashMap::new();
        for &id in &nodes {
            capacity.entry(id).or_default();
        }

        for edge in &graph.edges {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(Error::InvalidCapacity {
                    from: edge.from,
                    to: edge.to,
                    value: edge.weight,
                });
            }
            *capacity
                .entry(edge.from)
                .or_default()
                .entry(edge.to)
                .or_insert(0.0) += edge.weight;
        }

        Ok(Self { nodes, capacity })
    }

    /// Run Edmonds-Karp from `source` to `sink`. The engine itself is left
    /// untouched so further queries can reuse the same capacities.
    pub fn run(&self, source: StarId, sink: StarId) -> Result<FlowOutcome> {
        if !self.capacity.contains_key(&source) {
            return Err(Error::UnknownStar { id: source });
        }
        if !self.capacity.contains_key(&sink) {
            return Err(Error::UnknownStar { id: sink });
        }

        let mut residual = self.capacity.clone();
        let mut max_flow = 0.0;
        let mut augmentations = 0usize;

        loop {
            let Some((bottleneck, parents)) = augmenting_path(&residual, &self.nodes, source, sink)
            else {
                break;
            };

            max_flow += bottleneck;
            augmentations += 1;

            let mut v = sink;
            while v != source {
                let u = parents[&v].expect("path reaches back to source");
                *residual
                    .get_mut(&u)
                    .expect("forward node present")
                    .entry(v)
                    .or_insert(0.0) -= bottleneck;
                *residual.entry(v).or_default().entry(u).or_insert(0.0) += bottleneck;
                v = u;
            }
        }

        debug!(augmentations, max_flow, "augmenting-path search exhausted");

        let source_side = reachable_in_residual(&residual, source);
        Ok(FlowOutcome {
            max_flow,
            residual,
            source_side,
        })
    }
}

/// BFS over residual edges with usable capacity. Returns the bottleneck
/// capacity and parent links of the shortest augmenting path, or `None` when
/// the sink is no longer reachable.
fn augmenting_path(
    residual: &HashMap<StarId, HashMap<StarId, f64>>,
    nodes: &[StarId],
    source: StarId,
    sink: StarId,
) -> Option<(f64, HashMap<StarId, Option<StarId>>)> {
    let mut parents: HashMap<StarId, Option<StarId>> =
        nodes.iter().map(|&id| (id, None)).collect();
    let mut visited: HashSet<StarId> = HashSet::from([source]);
    let mut flow_to: HashMap<StarId, f64> = HashMap::from([(source, f64::INFINITY)]);
    let mut queue = VecDeque::from([source]);

    while let Some(u) = queue.pop_front() {
        let Some(neighbours) = residual.get(&u) else {
            continue;
        };
        for (&v, &cap) in neighbours {
            if cap > EPS && !visited.contains(&v) {
                visited.insert(v);
                parents.insert(v, Some(u));
                let bottleneck = flow_to[&u].min(cap);
                flow_to.insert(v, bottleneck);
                if v == sink {
                    return Some((bottleneck, parents));
                }
                queue.push_back(v);
            }
        }
    }
    None
}

/// Stars reachable from `start` through residual capacity above the epsilon
/// floor.
fn reachable_in_residual(
    residual: &HashMap<StarId, HashMap<StarId, f64>>,
    start: StarId,
) -> HashSet<StarId> {
    let mut seen: HashSet<StarId> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(u) = queue.pop_front() {
        let Some(neighbours) = residual.get(&u) else {
            continue;
        };
        for (&v, &cap) in neighbours {
            if cap > EPS && !seen.contains(&v) {
                seen.insert(v);
                queue.push_back(v);
            }
        }
    }
    seen
}
