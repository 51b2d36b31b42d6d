//! triangle — smallest end-to-end example for the cyclenet simulation core.
//!
//! Runs the three-node triangle scenario: a single active arrival generator
//! at node A splitting its trips 50/50 between B and C, length-only
//! routing, and flat kinematics (v_min=v_max=10). Every completed trip
//! takes the same fixed amount of time, so this is useful as both a smoke
//! test and a sanity check on the kinematic formulas.

use std::collections::HashMap;

use anyhow::Result;

use cyclenet_sim::{
    DistributionRecord, EdgeRecord, KinematicsConfig, NodeRecord, ProfileRecord, Scenario,
    Simulation,
};

// ── Scenario constants ───────────────────────────────────────────────────────

const EDGE_LENGTH: f64 = 100.0;
const LAMBDA_A: f64 = 1.0;
const V_MIN: f64 = 10.0;
const V_MAX: f64 = 10.0;
const T_SIM: f64 = 600.0;
const SEED: u64 = 42;

fn triangle_scenario() -> Scenario {
    let nodes = vec![
        NodeRecord { id: "A".into(), x: 0.0, y: 0.0 },
        NodeRecord { id: "B".into(), x: 100.0, y: 0.0 },
        NodeRecord { id: "C".into(), x: 50.0, y: 86.6 },
    ];

    let mut edges = Vec::new();
    for &(from, to) in &[("A", "B"), ("B", "A"), ("A", "C"), ("C", "A"), ("B", "C"), ("C", "B")] {
        let attrs = HashMap::from([("grade".to_string(), 0.0), ("safety".to_string(), 9.0), ("lighting".to_string(), 8.0)]);
        edges.push(EdgeRecord {
            origin: from.into(),
            destination: to.into(),
            length: EDGE_LENGTH,
            attrs,
        });
    }

    let profiles = vec![ProfileRecord {
        id: 0,
        probability: 1.0,
        weights: HashMap::from([("length".to_string(), 1.0)]),
    }];

    let mut od = HashMap::new();
    od.insert("A".to_string(), HashMap::from([("B".to_string(), 0.5), ("C".to_string(), 0.5)]));

    let mut distributions = HashMap::new();
    distributions.insert("A".to_string(), DistributionRecord::Exponential { lambda: LAMBDA_A });
    distributions.insert("B".to_string(), DistributionRecord::Exponential { lambda: 0.0 });
    distributions.insert("C".to_string(), DistributionRecord::Exponential { lambda: 0.0 });

    Scenario {
        nodes,
        edges,
        profiles,
        od,
        distributions,
        kinematics: KinematicsConfig {
            v_min: V_MIN,
            v_max: V_MAX,
            t_sim: T_SIM,
            seed: SEED,
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== triangle — cyclenet simulation core ===");
    println!("Nodes: A, B, C  |  λ_A={LAMBDA_A}  |  T_sim={T_SIM}s  |  seed={SEED}");
    println!();

    let scenario = triangle_scenario();
    let mut sim = Simulation::new();
    sim.reset(&scenario)?;
    sim.run_until(T_SIM);

    let results = sim.results();

    let mut to_b = 0u64;
    let mut to_c = 0u64;
    for record in results.cyclists {
        if record.total_time.is_some() {
            match record.destination.index() {
                1 => to_b += 1,
                2 => to_c += 1,
                _ => {}
            }
        }
    }

    let arrivals: u64 = results.arrivals_by_origin.iter().map(|(_, c)| c).sum();
    println!("Arrivals at A:      {arrivals}");
    println!("Completed trips:    {}", results.aggregates.trip_time.count());
    println!("  -> B:             {to_b}");
    println!("  -> C:             {to_c}");
    if let Some(avg) = results.aggregates.trip_time.average() {
        println!("Average trip time: {avg:.3}s");
    }
    if let Some(avg) = results.aggregates.speed.average() {
        println!("Average speed:     {avg:.3} m/s");
    }
    println!();

    println!("{:<12} {:<10}", "Edge", "Usage count");
    println!("{}", "-".repeat(24));
    for (edge, stats) in &results.edges {
        println!("{:<12} {:<10}", edge.to_string(), stats.usage_count);
    }
    println!();

    println!("Distinct routes taken: {}", results.routes.len());
    for (route, count) in &results.routes {
        let route_str = route.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(" -> ");
        println!("  [{route_str}]: {count}");
    }
    println!();

    println!("Diagnostics: {:?}", results.diagnostics);

    Ok(())
}
