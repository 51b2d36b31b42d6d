//! Origin-destination demand matrix (`spec.md` §3 "O-D matrix", §4.4 step 2).

use std::collections::HashMap;

use cyclenet_core::{NodeId, SimRng};

use crate::error::{PopulationError, PopulationResult};

const ROW_TOLERANCE: f64 = 1e-2;

struct Row {
    /// Destination node ids, diagonal (origin) excluded.
    destinations: Vec<NodeId>,
    /// Cumulative probability aligned with `destinations`.
    cumulative: Vec<f64>,
}

/// Per-origin destination-choice probabilities. Every row excludes the
/// origin itself (`P(o,o)=0`) and sums to 1.
pub struct OdMatrix {
    rows: HashMap<NodeId, Row>,
    /// Origins whose raw row needed renormalization beyond
    /// [`ROW_TOLERANCE`] (`spec.md` §9: "surface a warning but do not
    /// fail").
    pub renormalized_origins: Vec<NodeId>,
}

impl OdMatrix {
    /// Build from raw, not-necessarily-normalized rows keyed by origin.
    /// Any diagonal entry is dropped before normalization. Origins entirely
    /// absent from `raw_rows` fall back to a uniform draw over all other
    /// nodes (`spec.md` §4.4 step 2 "fallback: uniform over nodes ≠ o").
    pub fn new(
        all_nodes: &[NodeId],
        raw_rows: HashMap<NodeId, HashMap<NodeId, f64>>,
    ) -> PopulationResult<Self> {
        let mut rows = HashMap::with_capacity(all_nodes.len());
        let mut renormalized_origins = Vec::new();

        for &origin in all_nodes {
            let raw_row = raw_rows.get(&origin);
            let row = match raw_row {
                Some(entries) => Self::build_row(origin, entries, &mut renormalized_origins)?,
                None => Self::uniform_row(origin, all_nodes),
            };
            rows.insert(origin, row);
        }

        Ok(Self {
            rows,
            renormalized_origins,
        })
    }

    fn build_row(
        origin: NodeId,
        entries: &HashMap<NodeId, f64>,
        renormalized_origins: &mut Vec<NodeId>,
    ) -> PopulationResult<Row> {
        let mut destinations = Vec::with_capacity(entries.len());
        let mut raw = Vec::with_capacity(entries.len());
        for (&dest, &weight) in entries {
            if dest == origin {
                continue; // diagonal forced to 0
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(PopulationError::InvalidOdWeight { origin, dest });
            }
            destinations.push(dest);
            raw.push(weight);
        }

        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return Err(PopulationError::EmptyOdRow(origin));
        }
        if (sum - 1.0).abs() > ROW_TOLERANCE {
            log::warn!("O-D row for origin {origin} sums to {sum:.4}; renormalizing");
            renormalized_origins.push(origin);
        }

        let mut cumulative = Vec::with_capacity(raw.len());
        let mut running = 0.0;
        for w in &raw {
            running += w / sum;
            cumulative.push(running);
        }
        if let Some(last) = cumulative.last_mut() {
            *last = last.max(1.0);
        }

        Ok(Row {
            destinations,
            cumulative,
        })
    }

    fn uniform_row(origin: NodeId, all_nodes: &[NodeId]) -> Row {
        let destinations: Vec<NodeId> = all_nodes.iter().copied().filter(|&n| n != origin).collect();
        let n = destinations.len().max(1) as f64;
        let mut cumulative = Vec::with_capacity(destinations.len());
        let mut running = 0.0;
        for _ in &destinations {
            running += 1.0 / n;
            cumulative.push(running);
        }
        if let Some(last) = cumulative.last_mut() {
            *last = last.max(1.0);
        }
        Row {
            destinations,
            cumulative,
        }
    }

    /// Draw a destination for `origin`. Returns `None` only if `origin` has
    /// no row at all (e.g. the network has a single node).
    pub fn sample_destination(&self, origin: NodeId, rng: &mut SimRng) -> Option<NodeId> {
        let row = self.rows.get(&origin)?;
        if row.destinations.is_empty() {
            return None;
        }
        let u = rng.uniform01();
        let idx = row
            .cumulative
            .partition_point(|&cum| cum <= u)
            .min(row.destinations.len() - 1);
        Some(row.destinations[idx])
    }
}
