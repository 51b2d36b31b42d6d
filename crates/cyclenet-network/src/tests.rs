//! Unit tests for cyclenet-network. All tests build a small hand-crafted
//! network, matching the no-external-fixture style the teacher framework
//! used for its spatial-index tests.

#[cfg(test)]
mod helpers {
    use cyclenet_core::{NodeId, Point2};

    use crate::{Network, NetworkBuilder};

    /// Grid network:
    ///
    /// ```text
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    /// ```
    ///
    /// Directed both ways: 0-1, 1-2, 0-3, 2-4, 3-4.
    ///
    /// Shortest path 0->4 by length: 0->1->2->4 (300) beats 0->3->4 (600).
    pub fn grid_network() -> (Network, [NodeId; 5]) {
        let mut b = NetworkBuilder::new();

        let n0 = b.add_node("n0", Point2::new(0.0, 0.0)).unwrap();
        let n1 = b.add_node("n1", Point2::new(0.0, 1.0)).unwrap();
        let n2 = b.add_node("n2", Point2::new(0.0, 2.0)).unwrap();
        let n3 = b.add_node("n3", Point2::new(1.0, 0.0)).unwrap();
        let n4 = b.add_node("n4", Point2::new(1.0, 2.0)).unwrap();

        let mut road = |b: &mut NetworkBuilder, a: &str, c: &str, len: f64| {
            b.add_edge(a, c, len, &[]).unwrap();
            b.add_edge(c, a, len, &[]).unwrap();
        };
        road(&mut b, "n0", "n1", 100.0);
        road(&mut b, "n1", "n2", 100.0);
        road(&mut b, "n2", "n4", 100.0);
        road(&mut b, "n0", "n3", 500.0);
        road(&mut b, "n3", "n4", 100.0);

        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }
}

#[cfg(test)]
mod builder {
    use cyclenet_core::Point2;

    use crate::network::LENGTH_ATTR;
    use crate::{NetworkBuilder, NetworkError};

    #[test]
    fn rejects_duplicate_node_ids() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        let err = b.add_node("A", Point2::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateNode(id) if id == "A"));
    }

    #[test]
    fn rejects_nonpositive_length() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        assert!(b.add_edge("A", "B", 0.0, &[]).is_err());
        assert!(b.add_edge("A", "B", -5.0, &[]).is_err());
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        let err = b.add_edge("A", "Z", 10.0, &[]).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNode(id) if id == "Z"));
    }

    #[test]
    fn derives_capacity_from_length() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_edge("A", "B", 100.0, &[]).unwrap();
        let net = b.build().unwrap();
        let e = net.out_edges(net.find_node("A").unwrap()).next().unwrap();
        assert_eq!(net.edge_capacity(e), 40); // floor(100/2.5)
    }

    #[test]
    fn length_is_always_attribute_zero() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_edge("A", "B", 50.0, &[("safety", 9.0)]).unwrap();
        let net = b.build().unwrap();
        assert_eq!(net.attr_id("length"), Some(LENGTH_ATTR));
        let e = net.out_edges(net.find_node("A").unwrap()).next().unwrap();
        assert_eq!(net.attr_raw(e, LENGTH_ATTR), Some(50.0));
    }

    #[test]
    fn missing_attribute_on_an_edge_is_none() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_node("C", Point2::new(2.0, 0.0)).unwrap();
        b.add_edge("A", "B", 10.0, &[("safety", 9.0)]).unwrap();
        b.add_edge("B", "C", 10.0, &[]).unwrap();
        let net = b.build().unwrap();
        let safety = net.attr_id("safety").unwrap();
        let e_bc = net.out_edges(net.find_node("B").unwrap()).next().unwrap();
        assert_eq!(net.attr_raw(e_bc, safety), None);
    }
}

#[cfg(test)]
mod normalization {
    use cyclenet_core::Point2;

    use crate::NetworkBuilder;

    #[test]
    fn normalize_maps_range_to_one_ten() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_node("C", Point2::new(2.0, 0.0)).unwrap();
        b.add_edge("A", "B", 10.0, &[("safety", 1.0)]).unwrap();
        b.add_edge("B", "C", 10.0, &[("safety", 9.0)]).unwrap();
        let net = b.build().unwrap();
        let safety = net.attr_id("safety").unwrap();

        let e_ab = net.out_edges(net.find_node("A").unwrap()).next().unwrap();
        let e_bc = net.out_edges(net.find_node("B").unwrap()).next().unwrap();

        assert!((net.normalize(e_ab, safety) - 1.0).abs() < 1e-9);
        assert!((net.normalize(e_bc, safety) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn collapsed_range_is_neutral() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_edge("A", "B", 10.0, &[("safety", 7.0)]).unwrap();
        let net = b.build().unwrap();
        let safety = net.attr_id("safety").unwrap();
        let e = net.out_edges(net.find_node("A").unwrap()).next().unwrap();
        assert!((net.normalize(e, safety) - 5.5).abs() < 1e-9);
    }

    #[test]
    fn order_preserving() {
        let mut b = NetworkBuilder::new();
        b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        b.add_node("B", Point2::new(1.0, 0.0)).unwrap();
        b.add_node("C", Point2::new(2.0, 0.0)).unwrap();
        b.add_edge("A", "B", 10.0, &[("safety", 3.0)]).unwrap();
        b.add_edge("B", "C", 10.0, &[("safety", 6.0)]).unwrap();
        let net = b.build().unwrap();
        let safety = net.attr_id("safety").unwrap();
        let e_ab = net.out_edges(net.find_node("A").unwrap()).next().unwrap();
        let e_bc = net.out_edges(net.find_node("B").unwrap()).next().unwrap();
        assert!(net.normalize(e_ab, safety) <= net.normalize(e_bc, safety));
    }
}

#[cfg(test)]
mod routing {
    use crate::router::shortest_path;

    #[test]
    fn finds_shorter_of_two_paths() {
        let (net, [n0, _n1, _n2, _n3, n4]) = super::helpers::grid_network();
        let weights: Vec<f64> = (0..net.edge_count())
            .map(|i| net.edge_length(cyclenet_core::EdgeId(i as u32)))
            .collect();

        let route = shortest_path(&net, &weights, n0, n4).expect("reachable");
        assert_eq!(route.edges.len(), 3); // 0->1->2->4
        assert!((route.total_weight - 300.0).abs() < 1e-6);
    }

    #[test]
    fn same_node_is_trivial() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let weights: Vec<f64> = vec![1.0; net.edge_count()];
        let route = shortest_path(&net, &weights, n0, n0).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.total_weight, 0.0);
    }

    #[test]
    fn unreachable_returns_none() {
        use cyclenet_core::Point2;

        use crate::NetworkBuilder;

        let mut b = NetworkBuilder::new();
        let a = b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
        let isolated = b.add_node("Z", Point2::new(99.0, 99.0)).unwrap();
        let net = b.build().unwrap();
        let weights: Vec<f64> = vec![];
        assert!(shortest_path(&net, &weights, a, isolated).is_none());
    }
}
