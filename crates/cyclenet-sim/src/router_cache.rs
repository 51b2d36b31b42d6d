//! Per-profile composite edge weights and LRU-memoized routing
//! (`spec.md` §4.3).

use lru::LruCache;
use std::num::NonZeroUsize;

use cyclenet_core::NodeId;
use cyclenet_network::{shortest_path, Network, Route};
use cyclenet_population::{PreferenceDirection, Profile};

/// Default capacity of [`RouteCache`]'s LRU table, entries, not bytes.
const DEFAULT_CACHE_CAP: usize = 4096;

/// Non-positive composite weights are clamped to this value
/// (`spec.md` §4.3 step 4).
const WEIGHT_FLOOR: f64 = 1e-6;

/// A profile's per-edge composite weight array, precomputed once per
/// `(profile, network)` pair (`spec.md` §4.3 steps 1-4).
pub struct CompositeWeights {
    pub weights: Vec<f64>,
}

impl CompositeWeights {
    /// `W_p(e) = sum over weighted attributes of weight * direction(n(a))`,
    /// falling back to unweighted `length` only when `A' = A ∩ keys(w_p)` is
    /// empty (`spec.md` §4.3 step 1) — i.e. when `profile.weights` is empty.
    /// `cyclenet_sim::scenario::build_profile_mix` only ever inserts an
    /// attribute into a profile's weight map once it has confirmed the
    /// network carries that attribute, so `profile.weights.is_empty()` here
    /// is exactly that emptiness test; it is not a proxy for "every
    /// configured weight happens to be near zero" — a profile like
    /// `{length: 0.0}` has a non-empty `A'` and routes by its (clamped to
    /// epsilon) all-zero `W_p`, degenerating to fewest-hops, per spec.
    pub fn compute(network: &Network, profile: &Profile) -> Self {
        let mut weights = vec![0.0; network.edge_count()];
        if profile.weights.is_empty() {
            for (i, w) in weights.iter_mut().enumerate() {
                *w = network.edge_length(cyclenet_core::EdgeId(i as u32));
            }
            return Self { weights };
        }

        for (i, w) in weights.iter_mut().enumerate() {
            let edge = cyclenet_core::EdgeId(i as u32);
            let mut total = 0.0;
            for (&attr, aw) in &profile.weights {
                let normalized = network.normalize(edge, attr);
                let directed = match aw.direction {
                    PreferenceDirection::HigherIsBetter => normalized,
                    PreferenceDirection::LowerIsBetter
                    | PreferenceDirection::LowerMagnitudeIsBetter => 11.0 - normalized,
                };
                total += aw.weight * directed;
            }
            // spec.md §4.3 step 4: "Edges with W_p(e) <= 0 are clamped to a
            // small positive epsilon."
            *w = if total > 0.0 { total } else { WEIGHT_FLOOR };
        }
        Self { weights }
    }
}

/// Key a cached route by the query that produced it.
type RouteCacheKey = (cyclenet_core::ProfileId, NodeId, NodeId);

/// LRU-memoized `(profile, origin, destination) -> Route` lookups, caching
/// `None` (unreachable) results too so repeated impossible queries don't
/// re-run Dijkstra (`spec.md` §4.3 "memoize by (profile, origin,
/// destination)").
pub struct RouteCache {
    cache: LruCache<RouteCacheKey, Option<Route>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAP)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let cap = NonZeroUsize::new(cap).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            cache: LruCache::new(cap),
        }
    }

    /// Look up or compute the route for this query, caching either result.
    pub fn get_or_compute(
        &mut self,
        network: &Network,
        weights: &CompositeWeights,
        profile: cyclenet_core::ProfileId,
        from: NodeId,
        to: NodeId,
    ) -> Option<Route> {
        let key = (profile, from, to);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let route = shortest_path(network, &weights.weights, from, to);
        self.cache.put(key, route.clone());
        route
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}
