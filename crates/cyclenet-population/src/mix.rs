//! Categorical profile selection (`spec.md` §4.4 step 1).

use cyclenet_core::{ProfileId, SimRng};

use crate::error::PopulationResult;
use crate::profile::{validate_probability, Profile};

/// Tolerance on the pre-normalization probability sum before a warning is
/// raised (`spec.md` §6: "normalized to sum 1 on load (tolerance 1e-2
/// before normalization)").
const SUM_TOLERANCE: f64 = 1e-2;

/// The loaded cyclist-profile mix: profiles plus their normalized selection
/// probabilities `π_p`.
pub struct ProfileMix {
    profiles: Vec<Profile>,
    /// Cumulative probabilities, same length as `profiles`, last entry ~1.0.
    cumulative: Vec<f64>,
    /// Set when the raw probabilities needed renormalization beyond
    /// [`SUM_TOLERANCE`] (`spec.md` §9: "surface a warning but do not
    /// fail").
    pub renormalized: bool,
}

impl ProfileMix {
    /// Build from `(profile, raw_probability)` pairs. Individual
    /// probabilities out of `[0,1]` fail fast (`spec.md` §7 Validation);
    /// the sum is renormalized to 1 regardless, with a diagnostic flag (and
    /// a `log::warn!`) when the raw sum strayed beyond tolerance.
    pub fn new(entries: Vec<(Profile, f64)>) -> PopulationResult<Self> {
        if entries.is_empty() {
            let profile = Profile::length_only(ProfileId(0));
            return Ok(Self {
                profiles: vec![profile],
                cumulative: vec![1.0],
                renormalized: false,
            });
        }

        for (profile, raw) in &entries {
            validate_probability(profile.id, *raw)?;
        }

        let sum: f64 = entries.iter().map(|(_, raw)| raw).sum();
        let renormalized = (sum - 1.0).abs() > SUM_TOLERANCE;
        if renormalized {
            log::warn!(
                "profile mix probabilities sum to {sum:.4}, outside tolerance {SUM_TOLERANCE}; renormalizing"
            );
        }

        let norm = if sum > 0.0 { sum } else { entries.len() as f64 };
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut running = 0.0;
        let mut profiles = Vec::with_capacity(entries.len());
        for (profile, raw) in entries {
            let p = if sum > 0.0 { raw / norm } else { 1.0 / norm };
            running += p;
            cumulative.push(running);
            profiles.push(profile);
        }
        // Guard against float drift so the last bucket always catches u=1.0.
        if let Some(last) = cumulative.last_mut() {
            *last = last.max(1.0);
        }

        Ok(Self {
            profiles,
            cumulative,
            renormalized,
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Draw a profile proportional to its normalized probability.
    pub fn sample(&self, rng: &mut SimRng) -> ProfileId {
        let u = rng.uniform01();
        let idx = self
            .cumulative
            .partition_point(|&cum| cum <= u)
            .min(self.profiles.len() - 1);
        self.profiles[idx].id
    }
}
