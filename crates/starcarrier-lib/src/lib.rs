//! Starcarrier library entry points.
//!
//! This crate exposes helpers to assemble a routing graph from a loaded star
//! dataset, run the shortest-path / all-pairs / max-flow engines over it, and
//! simulate a resource-bounded carrier walking a maximal route. Higher-level
//! consumers (ingestion, rendering, reporting) should only depend on the
//! types exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod all_pairs;
pub mod carrier;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod max_flow;
pub mod planner;
pub mod report;
pub mod shortest_path;

pub use all_pairs::AllPairsEngine;
pub use carrier::{Carrier, HealthTier, VisitOutcome};
pub use dataset::{BlockedPairs, GalaxyId, Position, Star, StarId, StarLink, StarMap, VisitProfile};
pub use error::{Error, Result};
pub use graph::{build_flow_graph, build_graph, GraphData, WeightedEdge};
pub use max_flow::{FlowOutcome, MaxFlowEngine};
pub use planner::{MaxRoutePlanner, DEFAULT_MAX_HOPS};
pub use report::{
    CarrierSnapshot, ItinerarySegment, JumpTarget, RecapEntry, RecapKind, RouteReport, StopReason,
};
pub use shortest_path::{ShortestPathEngine, ShortestPaths};
