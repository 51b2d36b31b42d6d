//! The simulation driver: owns every mutable piece of run state and the
//! dispatch loop for the three continuation kinds (`spec.md` §4, §5, §6).

use std::collections::HashMap;

use cyclenet_agent::{Cyclist, CyclistPool, CyclistState};
use cyclenet_core::{CyclistId, NodeId, Point2, ProfileId, SimRng, SimTime, Streams};
use cyclenet_kinematics::KinematicEngine;
use cyclenet_network::Network;
use cyclenet_population::{OdMatrix, ProfileMix};
use cyclenet_scheduler::EventQueue;
use cyclenet_stats::StatsAccumulator;

use crate::diagnostics::Diagnostics;
use crate::error::SimResult;
use crate::payload::Continuation;
use crate::router_cache::{CompositeWeights, RouteCache};
use crate::scenario::{KinematicsConfig, Scenario};
use crate::snapshot::{CyclistView, Results, SimStatus, Snapshot};
use crate::trip::TripState;

/// The simulation driver (`spec.md` §6 "Control surface").
///
/// Built once via [`Simulation::new`] and rebuilt in place by
/// [`Simulation::reset`] for each scenario run. Every field here is either
/// read-only for a run's duration (`network`, `profile_mix`, `od`,
/// `kinematics`) or touched exclusively by the currently-dispatched
/// continuation (`spec.md` §5 "Shared-resource policy") — there is no
/// locking anywhere in this struct.
pub struct Simulation {
    network: Network,
    profile_mix: ProfileMix,
    od: OdMatrix,
    kinematics: KinematicsConfig,

    streams: Streams,
    arrival_rngs: HashMap<NodeId, SimRng>,
    arrival_distributions: HashMap<NodeId, cyclenet_distributions::Distribution>,

    kinematic_engine: KinematicEngine,
    pool: CyclistPool,
    trips: HashMap<CyclistId, TripState>,
    queue: EventQueue<Continuation>,
    stats: StatsAccumulator,

    composite_weights: HashMap<ProfileId, CompositeWeights>,
    route_cache: RouteCache,

    diagnostics: Diagnostics,
    status: SimStatus,
    stopping: bool,
}

impl Simulation {
    /// An idle simulation with an empty network. Call [`Simulation::reset`]
    /// before stepping.
    pub fn new() -> Self {
        Self {
            network: Network::empty(),
            profile_mix: ProfileMix::new(Vec::new()).expect("empty profile mix always succeeds"),
            od: OdMatrix::new(&[], HashMap::new()).expect("empty node set always succeeds"),
            kinematics: KinematicsConfig::default(),
            streams: Streams::new(0),
            arrival_rngs: HashMap::new(),
            arrival_distributions: HashMap::new(),
            kinematic_engine: KinematicEngine::new(0),
            pool: CyclistPool::new(),
            trips: HashMap::new(),
            queue: EventQueue::new(),
            stats: StatsAccumulator::new(),
            composite_weights: HashMap::new(),
            route_cache: RouteCache::new(),
            diagnostics: Diagnostics::default(),
            status: SimStatus::Idle,
            stopping: false,
        }
    }

    /// Rebuild all derived state from `scenario`, clear queues, and reset
    /// the clock to 0 (`spec.md` §6 "reset(scenario, seed)").
    ///
    /// The scenario's own `kinematics.seed` is the master seed; there is no
    /// separate seed parameter since `Scenario::kinematics` already carries
    /// one per the §6 wire format.
    pub fn reset(&mut self, scenario: &Scenario) -> SimResult<()> {
        let built = scenario.build()?;

        self.network = built.network;
        self.profile_mix = built.profile_mix;
        self.od = built.od;
        self.kinematics = built.kinematics;

        self.streams = Streams::new(self.kinematics.seed);
        let mut arrival_rngs = HashMap::with_capacity(built.arrival_distributions.len());
        for &node in built.arrival_distributions.keys() {
            arrival_rngs.insert(node, self.streams.arrival_stream(node.0));
        }
        self.arrival_rngs = arrival_rngs;
        self.arrival_distributions = built.arrival_distributions;

        self.kinematic_engine = KinematicEngine::new(self.network.edge_count());
        self.pool = CyclistPool::new();
        self.trips.clear();
        self.queue = EventQueue::new();
        self.stats = StatsAccumulator::new();
        self.composite_weights.clear();
        self.route_cache.clear();
        self.stopping = false;

        self.diagnostics = Diagnostics {
            od_rows_renormalized: built.od_rows_renormalized as u64,
            profile_mix_renormalized: built.profile_mix_renormalized,
            ..Diagnostics::default()
        };

        let origins: Vec<NodeId> = self.arrival_distributions.keys().copied().collect();
        for node in origins {
            self.schedule_next_arrival(node);
        }
        self.schedule(SimTime::ZERO.after(self.kinematics.t_sim), Continuation::Termination);

        self.status = SimStatus::Running;
        log::info!(
            "reset: {} nodes, {} edges, T_sim={}, seed={}",
            self.network.node_count(),
            self.network.edge_count(),
            self.kinematics.t_sim,
            self.kinematics.seed
        );
        Ok(())
    }

    /// Dispatch one event; returns `(now, active_count)` (`spec.md` §6
    /// "step()").
    pub fn step(&mut self) -> (SimTime, usize) {
        match self.queue.step() {
            Some((now, payload)) => {
                log::debug!("t={now:?} dispatch {payload:?}");
                self.dispatch(payload);
            }
            None => {
                // Queue exhaustion (`spec.md` §7): nothing left to do, the
                // run is complete regardless of whether T_sim was reached.
                self.status = SimStatus::Completed;
            }
        }
        (self.queue.now(), self.pool.active_count())
    }

    /// Dispatch until `now >= t` or the queue empties (`spec.md` §6
    /// "run_until(t)").
    pub fn run_until(&mut self, t: f64) {
        while matches!(self.queue.peek_time(), Some(next) if next.0 <= t) {
            self.step();
        }
    }

    /// Raise the stop flag (`spec.md` §6 "stop()"). Arrival generators
    /// self-cancel on their next firing; in-flight agents finalize at their
    /// next micro-step (`spec.md` §4.5 "Per-cyclist cancellation").
    pub fn stop(&mut self) {
        self.stopping = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        let active = self
            .pool
            .iter_active()
            .map(|c| CyclistView {
                id: c.id,
                position: c.position,
                profile: c.profile,
                route: c.route.clone(),
                current_edge_index: c.current_edge_index,
            })
            .collect();
        let edge_occupancy = (0..self.network.edge_count())
            .map(|i| self.kinematic_engine.occupancy().occupancy(cyclenet_core::EdgeId(i as u32)) as u32)
            .collect();
        Snapshot {
            now: self.queue.now(),
            status: self.status,
            active,
            edge_occupancy,
        }
    }

    pub fn results(&self) -> Results {
        let mut edges: Vec<_> = self.stats.edges().map(|(&id, s)| (id, s)).collect();
        edges.sort_by_key(|(id, _)| *id);

        let mut routes: Vec<_> = self.stats.routes().map(|(route, &count)| (route.as_slice(), count)).collect();
        routes.sort_by_key(|(route, _)| *route);

        let mut arrivals_by_origin: Vec<_> = self.stats.origins().map(|(&n, &c)| (n, c)).collect();
        arrivals_by_origin.sort_by_key(|(node, _)| *node);

        Results {
            cyclists: self.stats.cyclists(),
            edges,
            routes,
            aggregates: self.stats.aggregates(),
            diagnostics: self.diagnostics,
            arrivals_by_origin,
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    fn dispatch(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::Arrival(node) => self.handle_arrival(node),
            Continuation::MicroStep(cyclist) => self.handle_micro_step(cyclist),
            Continuation::Termination => self.handle_termination(),
        }
    }

    fn schedule(&mut self, at: SimTime, continuation: Continuation) {
        self.queue
            .schedule(at, continuation)
            .expect("delays are always clamped to >= 0, so scheduling only ever moves forward");
    }

    fn schedule_next_arrival(&mut self, origin: NodeId) {
        if self.stopping {
            return;
        }
        let dist = self.arrival_distributions[&origin];
        let rng = self
            .arrival_rngs
            .get_mut(&origin)
            .expect("every origin in arrival_distributions has a matching rng substream");
        let delta = dist.sample(rng);
        let at = self.queue.now().after(delta);
        self.schedule(at, Continuation::Arrival(origin));
    }

    /// Arrival generator firing (`spec.md` §4.2) followed by the decision
    /// block (`spec.md` §4.4). A no-op once the stop flag is raised
    /// (`spec.md` §4.6 "cancels all arrival generators"): this origin's one
    /// outstanding `Arrival` continuation is still sitting in the queue when
    /// termination fires, so it must self-cancel here rather than spawn one
    /// more cyclist and reschedule itself.
    fn handle_arrival(&mut self, origin: NodeId) {
        if self.stopping {
            return;
        }
        self.stats.record_arrival(origin);

        let profile_id = self.profile_mix.sample(&mut self.streams.routing);
        let destination = self.od.sample_destination(origin, &mut self.streams.routing);

        let Some(destination) = destination else {
            self.diagnostics.discarded_unreachable += 1;
            log::warn!("origin {origin} has no destination row; discarding arrival");
            self.schedule_next_arrival(origin);
            return;
        };

        if destination == origin {
            self.schedule_next_arrival(origin);
            return;
        }

        let profile = self
            .profile_mix
            .profile(profile_id)
            .expect("sample() only returns ids present in the mix");

        if !self.composite_weights.contains_key(&profile_id) {
            let weights = CompositeWeights::compute(&self.network, profile);
            self.composite_weights.insert(profile_id, weights);
        }
        let weights = &self.composite_weights[&profile_id];
        let route = self
            .route_cache
            .get_or_compute(&self.network, weights, profile_id, origin, destination);

        let Some(route) = route else {
            self.diagnostics.discarded_unreachable += 1;
            log::warn!("no route {origin}->{destination} for profile {profile_id}; discarding");
            self.schedule_next_arrival(origin);
            return;
        };

        let v0 = self.streams.speed.gen_range(self.kinematics.v_min..=self.kinematics.v_max);
        let now = self.queue.now();
        let cyclist = Cyclist::new(
            origin,
            destination,
            profile_id,
            self.network.node_pos(origin),
            v0,
            route.edges,
            now,
        );
        let id = self.pool.spawn(cyclist);

        if self.pool.get(id).is_active() {
            self.begin_edge(id);
        } else {
            // Trivial (empty) route: origin == destination was already
            // filtered above, so this only guards a same-node network with
            // no edges at all.
            let cyclist = self.pool.get_mut(id);
            cyclist.total_time = Some(0.0);
            self.stats.record_cyclist(cyclist);
            self.pool.release(id);
        }

        self.schedule_next_arrival(origin);
    }

    /// Enter the cyclist's current route edge and plan its traversal
    /// (`spec.md` §4.5 steps 1-2).
    fn begin_edge(&mut self, id: CyclistId) {
        let now = self.queue.now();
        let cyclist = self.pool.get_mut(id);
        let edge = cyclist
            .current_edge()
            .expect("begin_edge is only called while current_edge_index < route.len()");
        let v0 = cyclist.v0;

        self.kinematic_engine.enter_edge(edge, id);
        self.stats.record_edge_enter(edge, id, now);

        let plan = self
            .kinematic_engine
            .plan_traversal(&self.network, edge, v0, self.kinematics.v_min, self.kinematics.v_max);
        let dt = plan.dt;
        self.trips.insert(id, TripState::new(plan, now));
        self.schedule(now.after(dt), Continuation::MicroStep(id));
    }

    /// One micro-step of a cyclist's current edge traversal (`spec.md`
    /// §4.5 step 3).
    fn handle_micro_step(&mut self, id: CyclistId) {
        let Some(mut trip) = self.trips.remove(&id) else {
            self.diagnostics.agent_exceptions += 1;
            log::warn!("micro-step fired for cyclist {id} with no trip state; dropping");
            return;
        };
        trip.i += 1;

        let cyclist = self.pool.get_mut(id);
        let edge = match cyclist.current_edge() {
            Some(e) => e,
            None => {
                self.diagnostics.agent_exceptions += 1;
                log::warn!("micro-step fired for cyclist {id} with no current edge; dropping");
                return;
            }
        };

        let overall_alpha = trip.overall_alpha();
        let from = self.network.node_pos(self.network.edge_from(edge));
        let to = self.network.node_pos(self.network.edge_to(edge));
        cyclist.position = from.lerp(to, overall_alpha);
        cyclist.trajectory.push(cyclist.position);

        if self.stopping {
            self.trips.insert(id, trip);
            self.force_finalize(id);
            return;
        }

        if !trip.sub_plan_complete() && cyclenet_kinematics::crosses_recompute_boundary(trip.i, trip.plan.k) {
            let new_plan = self
                .kinematic_engine
                .recompute_traversal(&self.network, edge, &trip.plan, overall_alpha);
            trip.recompute_into(new_plan);
            log::debug!("cyclist {id} recomputed traversal on edge {edge} at alpha={overall_alpha:.3}");
        }

        if trip.sub_plan_complete() {
            self.trips.insert(id, trip);
            self.finalize_edge_and_advance(id);
        } else {
            let dt = trip.plan.dt;
            let next_at = self.queue.now().after(dt);
            self.trips.insert(id, trip);
            self.schedule(next_at, Continuation::MicroStep(id));
        }
    }

    /// Normal completion of the current edge (`spec.md` §4.5 steps 4-5):
    /// exits occupancy, records stats, and either begins the next edge or
    /// completes the trip.
    fn finalize_edge_and_advance(&mut self, id: CyclistId) {
        let now = self.queue.now();
        let trip = self.trips.remove(&id).expect("caller just reinserted trip for this id");
        let edge = self
            .pool
            .get(id)
            .current_edge()
            .expect("finalize_edge_and_advance is only called mid-route");

        self.exit_edge(edge, id);
        self.stats.record_edge_exit(edge, id, now);
        let edge_length = self.network.edge_length(edge);

        let cyclist = self.pool.get_mut(id);
        cyclist.per_edge_elapsed.push(now.since(trip.edge_entry_time));
        cyclist.total_distance += edge_length;
        cyclist.current_edge_index += 1;

        if cyclist.current_edge_index >= cyclist.route.len() {
            cyclist.state = CyclistState::Completed;
            cyclist.total_time = Some(now.since(cyclist.start_time));
            cyclist.position = Point2::OFFSCREEN;
            self.stats.record_cyclist(cyclist);
            self.pool.release(id);
            log::debug!("cyclist {id} completed trip");
        } else {
            self.begin_edge(id);
        }
    }

    /// Stop-time finalization of an in-flight cyclist (`spec.md` §4.5
    /// "Per-cyclist cancellation"): release the edge, record the partial
    /// trip, but leave the cyclist `Active` rather than `Completed` — its
    /// `total_time` stays `None`.
    fn force_finalize(&mut self, id: CyclistId) {
        let now = self.queue.now();
        let trip = self.trips.remove(&id).expect("caller just reinserted trip for this id");
        let edge = match self.pool.get(id).current_edge() {
            Some(e) => e,
            None => return,
        };

        self.exit_edge(edge, id);
        self.stats.record_edge_exit(edge, id, now);
        let partial_distance = trip.overall_alpha() * self.network.edge_length(edge);

        let cyclist = self.pool.get_mut(id);
        cyclist.per_edge_elapsed.push(now.since(trip.edge_entry_time));
        cyclist.total_distance += partial_distance;
        self.stats.record_cyclist(cyclist);
        log::debug!("cyclist {id} force-finalized at stop time, state remains active");
    }

    fn exit_edge(&mut self, edge: cyclenet_core::EdgeId, id: CyclistId) {
        if let Err(e) = self.kinematic_engine.exit_edge(edge, id) {
            self.diagnostics.agent_exceptions += 1;
            log::warn!("exit_edge invariant violated: {e}");
        }
    }

    /// Termination process (`spec.md` §4.6): raise the stop flag, then
    /// drain the queue. Remaining arrival continuations self-cancel on
    /// firing; remaining micro-steps force-finalize their cyclist. Draining
    /// inline here (rather than waiting on each cyclist's own naturally
    /// scheduled micro-step) keeps `now`'s overshoot past `T_sim` bounded to
    /// at most one more micro-step per still-active cyclist.
    fn handle_termination(&mut self) {
        self.stopping = true;
        log::info!("termination reached at t={:?}; draining {} active cyclists", self.queue.now(), self.pool.active_count());
        while let Some((_, payload)) = self.queue.step() {
            self.dispatch(payload);
        }
        self.status = SimStatus::Completed;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
