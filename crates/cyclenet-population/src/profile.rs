//! Cyclist profiles: per-attribute importances used to weight routes.
//!
//! # Direction of preference
//!
//! `spec.md` §4.3 step 3 inverts "smaller is better" attributes (`length`)
//! but is explicit that other attributes are handled inconsistently in the
//! source system, and §9 "Open questions" resolves this by making direction
//! part of the profile schema rather than something the router guesses at.
//! Each weighted attribute therefore carries its own [`PreferenceDirection`]
//! alongside its weight.

use std::collections::HashMap;

use cyclenet_core::{AttrId, ProfileId};

use crate::error::{PopulationError, PopulationResult};

/// How a profile wants an attribute to trend when choosing a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreferenceDirection {
    /// Larger raw values are preferred (e.g. `safety`, `lighting`).
    HigherIsBetter,
    /// Smaller raw values are preferred (e.g. `length`).
    LowerIsBetter,
    /// Smaller *magnitude* is preferred regardless of sign — the signed
    /// `grade` case (`spec.md` §9: "grade is signed and treated with
    /// magnitude inversion analogous to length").
    LowerMagnitudeIsBetter,
}

/// The convention this system uses for attributes with a commonly
/// understood meaning (`spec.md` §4.3 step 3), used as the default when a
/// scenario's profile weight map doesn't say otherwise. Attributes outside
/// this list default to [`PreferenceDirection::HigherIsBetter`] — an
/// explicit, overridable choice rather than a silent guess.
pub fn default_direction(attr_name: &str) -> PreferenceDirection {
    match attr_name {
        "length" => PreferenceDirection::LowerIsBetter,
        "grade" => PreferenceDirection::LowerMagnitudeIsBetter,
        "safety" | "lighting" => PreferenceDirection::HigherIsBetter,
        _ => PreferenceDirection::HigherIsBetter,
    }
}

/// A single attribute's importance and preference direction within a
/// profile's routing weight map.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeWeight {
    pub weight: f64,
    pub direction: PreferenceDirection,
}

/// A parameterized cyclist type (`spec.md` §3 "Cyclist profile"): a
/// selection probability and a map of per-attribute importances.
#[derive(Clone, Debug)]
pub struct Profile {
    pub id: ProfileId,
    pub weights: HashMap<AttrId, AttributeWeight>,
}

impl Profile {
    pub fn new(id: ProfileId, weights: HashMap<AttrId, AttributeWeight>) -> Self {
        Self { id, weights }
    }

    /// The "length-only" fallback profile used when a scenario configures
    /// no profiles at all, or when a profile's weight map doesn't overlap
    /// the network's attribute vocabulary (`spec.md` §4.3 step 1).
    pub fn length_only(id: ProfileId) -> Self {
        let mut weights = HashMap::with_capacity(1);
        weights.insert(
            cyclenet_network::LENGTH_ATTR,
            AttributeWeight {
                weight: 1.0,
                direction: PreferenceDirection::LowerIsBetter,
            },
        );
        Self { id, weights }
    }
}

/// Validate a raw per-profile probability is a legal mix weight
/// (`spec.md` §6: `probability:float∈[0,1]`).
pub fn validate_probability(profile: ProfileId, value: f64) -> PopulationResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PopulationError::ProbabilityOutOfRange { profile, value })
    }
}
