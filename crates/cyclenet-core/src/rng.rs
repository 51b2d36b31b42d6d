//! Deterministic, per-concern RNG substreams.
//!
//! # Determinism strategy
//!
//! `spec.md` §6 requires: "a single master seed spawns substreams per concern
//! (origin arrivals, route sampling, speed sampling). Two runs with identical
//! scenario and seed produce byte-identical `results()`."
//!
//! Each substream is an independent `SmallRng` seeded by:
//!
//!   seed = master_seed XOR (tag * MIXING_CONSTANT)
//!
//! where `tag` is a small per-concern constant (for the three named
//! concerns) or a node index (for the further per-origin arrival streams —
//! `spec.md` §4.2: "Implementations may run one generator per origin
//! (preferred)"). The mixing constant is the 64-bit fractional part of the
//! golden ratio, which spreads consecutive tags uniformly across the seed
//! space — this is the same scheme the teacher framework uses to derive
//! independent per-agent RNGs from one global seed.
//!
//! Substreams never share state and are only ever touched by the single
//! cooperative scheduler thread, so no synchronisation is needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

const TAG_ARRIVALS: u64 = 1;
const TAG_ROUTING: u64 = 2;
const TAG_SPEED: u64 = 3;

/// A single deterministic RNG substream.
///
/// Thin wrapper around `rand::rngs::SmallRng` exposing the sampling helpers
/// the decision block and kinematic engine need.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    fn from_tag(master_seed: u64, tag: u64) -> Self {
        let seed = master_seed ^ tag.wrapping_mul(MIXING_CONSTANT);
        Self::new(seed)
    }

    /// Derive an independent child stream, offset by an arbitrary tag (e.g.
    /// a `NodeId` index for a per-origin arrival stream).
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform `f64` in `[0, 1)`. Used directly by the inverse-CDF samplers
    /// in `cyclenet-distributions`.
    #[inline]
    pub fn uniform01(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// The three named per-concern substreams plus the per-origin arrival
/// sub-derivation, all rooted in one master seed (`spec.md` §6).
pub struct Streams {
    arrivals_base: SimRng,
    pub routing: SimRng,
    pub speed: SimRng,
}

impl Streams {
    pub fn new(master_seed: u64) -> Self {
        Self {
            arrivals_base: SimRng::from_tag(master_seed, TAG_ARRIVALS),
            routing: SimRng::from_tag(master_seed, TAG_ROUTING),
            speed: SimRng::from_tag(master_seed, TAG_SPEED),
        }
    }

    /// Independent arrival substream for one origin node, keyed by its
    /// numeric index so the same origin always gets the same stream
    /// regardless of iteration order elsewhere in the scenario.
    pub fn arrival_stream(&mut self, origin_index: u32) -> SimRng {
        self.arrivals_base.child(origin_index as u64)
    }
}
