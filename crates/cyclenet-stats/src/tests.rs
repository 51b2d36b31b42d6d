use cyclenet_agent::{Cyclist, CyclistState};
use cyclenet_core::{CyclistId, EdgeId, NodeId, Point2, ProfileId, SimTime};

use crate::accumulator::StatsAccumulator;

fn make_cyclist(id: u32, route: Vec<EdgeId>, total_time: Option<f64>, total_distance: f64) -> Cyclist {
    let mut c = Cyclist::new(
        NodeId(0),
        NodeId(1),
        ProfileId(0),
        Point2::new(0.0, 0.0),
        5.0,
        route,
        SimTime::ZERO,
    );
    c.id = CyclistId(id);
    c.total_distance = total_distance;
    c.total_time = total_time;
    c.state = CyclistState::Completed;
    c
}

#[cfg(test)]
mod edge_log {
    use super::*;
    use crate::edge_log::EdgeEventKind;

    #[test]
    fn usage_count_tracks_entries_only() {
        let mut acc = StatsAccumulator::new();
        let e = EdgeId(0);
        acc.record_edge_enter(e, CyclistId(0), SimTime(1.0));
        acc.record_edge_exit(e, CyclistId(0), SimTime(2.0));
        acc.record_edge_enter(e, CyclistId(1), SimTime(1.5));

        assert_eq!(acc.edge(e).unwrap().usage_count, 2);
        assert_eq!(acc.edge(e).unwrap().log.len(), 3);
    }

    #[test]
    fn ridership_series_nets_enter_and_exit() {
        let mut acc = StatsAccumulator::new();
        let e = EdgeId(0);
        acc.record_edge_enter(e, CyclistId(0), SimTime(1.0));
        acc.record_edge_enter(e, CyclistId(1), SimTime(1.2));
        acc.record_edge_exit(e, CyclistId(0), SimTime(2.0));

        let series = acc.edge(e).unwrap().ridership_series();
        assert_eq!(series, vec![(SimTime(1.0), 1), (SimTime(1.2), 2), (SimTime(2.0), 1)]);
    }

    #[test]
    fn log_entries_carry_the_right_kind() {
        let mut acc = StatsAccumulator::new();
        let e = EdgeId(3);
        acc.record_edge_enter(e, CyclistId(9), SimTime(0.0));
        let entry = &acc.edge(e).unwrap().log[0];
        assert_eq!(entry.kind, EdgeEventKind::Enter);
        assert_eq!(entry.cyclist, CyclistId(9));
    }

    #[test]
    fn unknown_edge_has_no_stats() {
        let acc = StatsAccumulator::new();
        assert!(acc.edge(EdgeId(42)).is_none());
    }
}

#[cfg(test)]
mod routes_and_origins {
    use super::*;

    #[test]
    fn route_usage_counts_repeated_paths() {
        let mut acc = StatsAccumulator::new();
        let route = vec![EdgeId(0), EdgeId(1)];
        acc.record_cyclist(&make_cyclist(0, route.clone(), Some(10.0), 100.0));
        acc.record_cyclist(&make_cyclist(1, route.clone(), Some(12.0), 100.0));
        acc.record_cyclist(&make_cyclist(2, vec![EdgeId(2)], Some(5.0), 50.0));

        assert_eq!(acc.route_usage(&route), 2);
        assert_eq!(acc.route_usage(&[EdgeId(2)]), 1);
        assert_eq!(acc.route_usage(&[EdgeId(99)]), 0);
    }

    #[test]
    fn empty_route_is_not_counted() {
        let mut acc = StatsAccumulator::new();
        acc.record_cyclist(&make_cyclist(0, vec![], None, 0.0));
        assert_eq!(acc.routes().count(), 0);
    }

    #[test]
    fn arrivals_accumulate_per_origin() {
        let mut acc = StatsAccumulator::new();
        acc.record_arrival(NodeId(0));
        acc.record_arrival(NodeId(0));
        acc.record_arrival(NodeId(1));

        assert_eq!(acc.arrivals_at(NodeId(0)), 2);
        assert_eq!(acc.arrivals_at(NodeId(1)), 1);
        assert_eq!(acc.arrivals_at(NodeId(2)), 0);
    }
}

#[cfg(test)]
mod cyclist_records {
    use super::*;

    #[test]
    fn completed_cyclist_is_recorded_verbatim() {
        let mut acc = StatsAccumulator::new();
        let c = make_cyclist(7, vec![EdgeId(0)], Some(20.0), 200.0);
        acc.record_cyclist(&c);

        let records = acc.cyclists();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, CyclistId(7));
        assert_eq!(records[0].total_distance, 200.0);
        assert_eq!(records[0].average_speed(), Some(10.0));
    }

    #[test]
    fn incomplete_cyclist_has_no_average_speed() {
        let mut acc = StatsAccumulator::new();
        acc.record_cyclist(&make_cyclist(1, vec![EdgeId(0)], None, 0.0));
        assert_eq!(acc.cyclists()[0].average_speed(), None);
    }
}

#[cfg(test)]
mod aggregates {
    use super::*;

    #[test]
    fn aggregates_only_count_finished_trips() {
        let mut acc = StatsAccumulator::new();
        acc.record_cyclist(&make_cyclist(0, vec![EdgeId(0)], Some(10.0), 100.0));
        acc.record_cyclist(&make_cyclist(1, vec![EdgeId(0)], Some(20.0), 100.0));
        acc.record_cyclist(&make_cyclist(2, vec![EdgeId(0)], None, 0.0));

        let agg = acc.aggregates();
        assert_eq!(agg.trip_time.count(), 2);
        assert_eq!(agg.trip_time.average(), Some(15.0));
        assert_eq!(agg.trip_time.min(), Some(10.0));
        assert_eq!(agg.trip_time.max(), Some(20.0));

        assert_eq!(agg.speed.count(), 2);
        assert_eq!(agg.speed.average(), Some(7.5));
    }

    #[test]
    fn empty_accumulator_has_no_aggregates() {
        let acc = StatsAccumulator::new();
        assert_eq!(acc.aggregates().trip_time.average(), None);
        assert_eq!(acc.aggregates().trip_time.min(), None);
    }

    #[test]
    fn running_stat_matches_batch_computation() {
        let mut stat = crate::aggregates::RunningStat::default();
        let samples = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for &s in &samples {
            stat.push(s);
        }
        let expected_avg = samples.iter().sum::<f64>() / samples.len() as f64;
        assert_eq!(stat.average(), Some(expected_avg));
        assert_eq!(stat.min(), Some(1.0));
        assert_eq!(stat.max(), Some(9.0));
        assert_eq!(stat.count(), samples.len() as u64);
    }
}
