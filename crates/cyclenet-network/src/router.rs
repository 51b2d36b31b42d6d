//! Single-source shortest path over a precomputed per-edge weight array.
//!
//! This module owns the Dijkstra mechanics only. The weights it is handed
//! are the per-profile composite edge weights `W_p(e)` from `spec.md` §4.3
//! steps 1–4 — computing those requires a profile's attribute weight map,
//! so that step lives with the population/profile types in `cyclenet-sim`,
//! which calls [`shortest_path`] once per `(profile, origin, destination)`
//! query and memoizes the result.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cyclenet_core::{EdgeId, NodeId};

use crate::network::Network;

/// An ordered sequence of edges from source to destination plus its total
/// composite weight.
#[derive(Debug, Clone)]
pub struct Route {
    pub edges: Vec<EdgeId>,
    pub total_weight: f64,
}

impl Route {
    /// `true` when source and destination coincide (empty edge list).
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Min-heap entry. Ties in `cost` are broken by the node's external string
/// id in lexicographic order (`spec.md` §4.3 step 5), making pop order — and
/// therefore which of several equal-cost shortest paths is found first —
/// deterministic.
struct Candidate {
    cost: f64,
    node: NodeId,
    tie_key: Box<str>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.tie_key == other.tie_key
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert both comparisons for a min-heap
        // ordered primarily by cost, secondarily by lexicographic node id.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.tie_key.cmp(&self.tie_key))
    }
}

/// Compute the shortest path from `from` to `to` under edge weights
/// `weights` (indexed by `EdgeId`, as produced by the caller's composite
/// weight pass). Returns `None` if the destination is unreachable
/// (`spec.md` §7 "Unreachable pair").
///
/// `from == to` yields a trivial zero-weight route without touching the
/// heap.
pub fn shortest_path(network: &Network, weights: &[f64], from: NodeId, to: NodeId) -> Option<Route> {
    if from == to {
        return Some(Route {
            edges: Vec::new(),
            total_weight: 0.0,
        });
    }

    let n = network.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        cost: 0.0,
        node: from,
        tie_key: network.node_string_id(from).into(),
    });

    while let Some(Candidate { cost, node, .. }) = heap.pop() {
        if node == to {
            return Some(reconstruct(network, &prev_edge, to, cost));
        }

        // Stale heap entry superseded by a cheaper path already recorded.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to(edge);
            let new_cost = cost + weights[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Candidate {
                    cost: new_cost,
                    node: neighbor,
                    tie_key: network.node_string_id(neighbor).into(),
                });
            }
        }
    }

    None
}

fn reconstruct(network: &Network, prev_edge: &[EdgeId], to: NodeId, total_weight: f64) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from(e);
    }
    edges.reverse();
    Route { edges, total_weight }
}
