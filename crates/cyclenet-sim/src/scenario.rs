//! Scenario wire records and load-time validation (`spec.md` §6).

use std::collections::HashMap;

use cyclenet_core::ProfileId;
use cyclenet_distributions::Distribution;
use cyclenet_network::{NetworkBuilder, NetworkError};
use cyclenet_population::{default_direction, AttributeWeight, OdMatrix, Profile, ProfileMix};

use crate::error::{SimError, SimResult};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct EdgeRecord {
    pub origin: String,
    pub destination: String,
    pub length: f64,
    pub attrs: HashMap<String, f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct ProfileRecord {
    pub id: u16,
    pub probability: f64,
    pub weights: HashMap<String, f64>,
}

/// `{kind, params}` as named by `spec.md` §6; flattened into one
/// externally-tagged enum rather than a separate params blob, which is
/// simpler to hand-author for a scenario file and maps 1:1 onto
/// [`Distribution`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug)]
pub enum DistributionRecord {
    Exponential { lambda: f64 },
    Normal { mu: f64, sigma: f64 },
    Lognormal { mu: f64, sigma: f64 },
    Gamma { shape: f64, scale: f64 },
    Weibull { shape: f64, scale: f64 },
}

impl From<DistributionRecord> for Distribution {
    fn from(r: DistributionRecord) -> Self {
        match r {
            DistributionRecord::Exponential { lambda } => Distribution::Exponential { lambda },
            DistributionRecord::Normal { mu, sigma } => Distribution::Normal { mu, sigma },
            DistributionRecord::Lognormal { mu, sigma } => Distribution::Lognormal { mu, sigma },
            DistributionRecord::Gamma { shape, scale } => Distribution::Gamma { shape, scale },
            DistributionRecord::Weibull { shape, scale } => Distribution::Weibull { shape, scale },
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct KinematicsConfig {
    pub v_min: f64,
    pub v_max: f64,
    pub t_sim: f64,
    pub seed: u64,
}

/// A complete, not-yet-validated scenario load record (`spec.md` §6).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub profiles: Vec<ProfileRecord>,
    /// `map<origin_id, map<dest_id, float>>`.
    pub od: HashMap<String, HashMap<String, f64>>,
    /// `map<node_id, {kind, params}>`.
    pub distributions: HashMap<String, DistributionRecord>,
    pub kinematics: KinematicsConfig,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            v_min: 1.0,
            v_max: 1.0,
            t_sim: 1.0,
            seed: 0,
        }
    }
}

/// The fully validated, derived state `reset()` builds a [`crate::Simulation`]
/// from.
pub(crate) struct BuiltScenario {
    pub network: cyclenet_network::Network,
    pub profile_mix: ProfileMix,
    pub od: OdMatrix,
    /// One entry per origin with an active generator. An origin configured
    /// with `lambda <= 0` (or any distribution whose only finite parameter
    /// collapses to "never fires") is treated as having no arrival process
    /// at all, matching `spec.md` §8 scenario 1's `λ_B=λ_C=0` meaning "no
    /// arrivals from B or C" rather than a validation failure.
    pub arrival_distributions: HashMap<cyclenet_core::NodeId, Distribution>,
    pub kinematics: KinematicsConfig,
    pub profile_mix_renormalized: bool,
    pub od_rows_renormalized: usize,
}

impl Scenario {
    pub(crate) fn build(&self) -> SimResult<BuiltScenario> {
        if !(0.0 < self.kinematics.v_min
            && self.kinematics.v_min <= self.kinematics.v_max
            && self.kinematics.t_sim > 0.0)
        {
            return Err(SimError::Config(format!(
                "invalid kinematics config: {:?}",
                self.kinematics
            )));
        }

        let mut builder = NetworkBuilder::with_capacity(self.nodes.len(), self.edges.len());
        for n in &self.nodes {
            builder.add_node(n.id.clone(), cyclenet_core::Point2::new(n.x, n.y))?;
        }
        for e in &self.edges {
            let attrs: Vec<(&str, f64)> = e.attrs.iter().map(|(k, &v)| (k.as_str(), v)).collect();
            builder.add_edge(&e.origin, &e.destination, e.length, &attrs)?;
        }
        let network = builder.build()?;

        let profile_mix = self.build_profile_mix(&network)?;

        let all_nodes: Vec<cyclenet_core::NodeId> = network.node_ids().collect();
        let mut raw_od = HashMap::with_capacity(self.od.len());
        for (origin, row) in &self.od {
            let origin_id = network
                .find_node(origin)
                .ok_or_else(|| NetworkError::UnknownNode(origin.clone()))?;
            let mut entries = HashMap::with_capacity(row.len());
            for (dest, &weight) in row {
                let dest_id = network
                    .find_node(dest)
                    .ok_or_else(|| NetworkError::UnknownNode(dest.clone()))?;
                entries.insert(dest_id, weight);
            }
            raw_od.insert(origin_id, entries);
        }
        let od = OdMatrix::new(&all_nodes, raw_od)?;
        let od_rows_renormalized = od.renormalized_origins.len();

        let mut arrival_distributions = HashMap::with_capacity(self.distributions.len());
        let mut configured = std::collections::HashSet::with_capacity(self.distributions.len());
        for (node, record) in &self.distributions {
            let node_id = network
                .find_node(node)
                .ok_or_else(|| NetworkError::UnknownNode(node.clone()))?;
            configured.insert(node_id);
            let dist: Distribution = (*record).into();
            if is_inert(&dist) {
                // Explicitly configured as "no arrivals" (`spec.md` §8
                // scenario 1: λ_B=λ_C=0) — leave this node out of
                // `arrival_distributions` rather than falling back below.
                continue;
            }
            dist.validate()?;
            arrival_distributions.insert(node_id, dist);
        }
        for node_id in &all_nodes {
            if !configured.contains(node_id) {
                arrival_distributions
                    .entry(*node_id)
                    .or_insert_with(Distribution::default_exponential);
            }
        }

        Ok(BuiltScenario {
            profile_mix_renormalized: profile_mix.renormalized,
            network,
            profile_mix,
            od,
            arrival_distributions,
            kinematics: self.kinematics,
            od_rows_renormalized,
        })
    }

    fn build_profile_mix(&self, network: &cyclenet_network::Network) -> SimResult<ProfileMix> {
        if self.profiles.is_empty() {
            return Ok(ProfileMix::new(Vec::new())?);
        }
        let mut entries = Vec::with_capacity(self.profiles.len());
        for record in &self.profiles {
            let mut weights = HashMap::with_capacity(record.weights.len());
            for (name, &w) in &record.weights {
                let attr = match network.attr_id(name) {
                    Some(id) => id,
                    None => continue,
                };
                weights.insert(
                    attr,
                    AttributeWeight {
                        weight: w,
                        direction: default_direction(name),
                    },
                );
            }
            let profile = Profile::new(ProfileId(record.id), weights);
            entries.push((profile, record.probability));
        }
        Ok(ProfileMix::new(entries)?)
    }
}

/// Whether `dist` should be treated as "no arrivals configured" rather than
/// validated and scheduled (`spec.md` §8 scenario 1: `λ_B=λ_C=0`).
fn is_inert(dist: &Distribution) -> bool {
    matches!(dist, Distribution::Exponential { lambda } if *lambda <= 0.0)
}
