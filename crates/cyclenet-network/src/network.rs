//! Directed cycle-path network: CSR adjacency plus a dynamic attribute
//! vocabulary.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! edges. Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! `(u,v)` and `(v,u)` are independent directed edges (`spec.md` §3); a
//! loader that only has one undirected record per road segment should call
//! [`NetworkBuilder::add_edge`] twice, once per direction, with
//! independently-sourced attribute maps if they differ.
//!
//! # Attribute vocabulary
//!
//! Edge and profile attribute maps have a dynamic key set (`spec.md` §9
//! "Dynamic attribute maps"). Rather than hashing a string on every router
//! inner-loop access, the vocabulary is canonicalized once at build time:
//! each attribute name is assigned a small [`AttrId`], and edges store dense
//! parallel `Vec<f64>` arrays indexed by it. `length` is always attribute id
//! [`LENGTH_ATTR`] so it participates in composite-weight routing the same
//! way any other attribute does (`spec.md` §4.3 step 1 fallback).

use std::collections::HashMap;

use cyclenet_core::{AttrId, EdgeId, NodeId, Point2};

use crate::error::{NetworkError, NetworkResult};

/// Assumed footprint per bicycle, in metres, used to derive directed-edge
/// capacity (`spec.md` §3: `capacity = floor(length / 2.5)`).
const BIKE_FOOTPRINT_M: f64 = 2.5;

/// `length` is always present on every edge, so it is assigned a fixed
/// attribute id rather than discovered from the first edge processed.
pub const LENGTH_ATTR: AttrId = AttrId(0);

/// Neutral normalized value used when an attribute's range collapses to a
/// single point, or when a specific edge is missing an otherwise-known
/// attribute. The midpoint of `[1,10]`.
const NEUTRAL_NORMALIZED: f64 = 5.5;

/// Directed cycle-path network: node positions, CSR edge adjacency, and a
/// canonicalized attribute vocabulary with precomputed per-attribute
/// `(min, max)` ranges.
///
/// Read-only for the lifetime of a simulation run (`spec.md` §3
/// "Lifecycles"). Construct via [`NetworkBuilder`].
pub struct Network {
    node_ids: Vec<String>,
    node_index: HashMap<String, NodeId>,
    node_pos: Vec<Point2>,

    node_out_start: Vec<u32>,
    edge_from: Vec<NodeId>,
    edge_to: Vec<NodeId>,
    edge_length: Vec<f64>,
    edge_capacity: Vec<u32>,

    attr_names: Vec<String>,
    attr_index: HashMap<String, AttrId>,
    /// `attr_values[attr.index()][edge.index()]`; `NaN` marks "not set on
    /// this edge".
    attr_values: Vec<Vec<f64>>,
    attr_range: Vec<(f64, f64)>,
}

impl Network {
    /// An empty network with no nodes or edges. Any routing request against
    /// it fails with [`NetworkError::NoRoute`].
    pub fn empty() -> Self {
        NetworkBuilder::new()
            .build()
            .expect("an empty builder never fails validation")
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    pub fn node_string_id(&self, node: NodeId) -> &str {
        &self.node_ids[node.index()]
    }

    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    pub fn node_pos(&self, node: NodeId) -> Point2 {
        self.node_pos[node.index()]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.node_pos.len()).map(|i| NodeId(i as u32))
    }

    /// Outgoing `EdgeId`s of `node`, as a contiguous index range (no heap
    /// allocation).
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> NodeId {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> NodeId {
        self.edge_to[edge.index()]
    }

    #[inline]
    pub fn edge_length(&self, edge: EdgeId) -> f64 {
        self.edge_length[edge.index()]
    }

    /// Congestion-free bicycle count for this directed edge (`spec.md` §3).
    #[inline]
    pub fn edge_capacity(&self, edge: EdgeId) -> u32 {
        self.edge_capacity[edge.index()]
    }

    pub fn attr_id(&self, name: &str) -> Option<AttrId> {
        self.attr_index.get(name).copied()
    }

    pub fn attr_name(&self, id: AttrId) -> &str {
        &self.attr_names[id.index()]
    }

    pub fn attr_count(&self) -> usize {
        self.attr_names.len()
    }

    pub fn attr_names(&self) -> impl Iterator<Item = (&str, AttrId)> {
        self.attr_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), AttrId(i as u16)))
    }

    /// Precomputed `(min, max)` across all edges carrying this attribute.
    /// `(0.0, 0.0)` if no edge carries it at all.
    pub fn attr_range(&self, attr: AttrId) -> (f64, f64) {
        self.attr_range[attr.index()]
    }

    /// Raw attribute value on a specific edge, or `None` if that edge
    /// doesn't carry it.
    pub fn attr_raw(&self, edge: EdgeId, attr: AttrId) -> Option<f64> {
        let v = self.attr_values[attr.index()][edge.index()];
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }

    /// Normalize a single edge's attribute value to `[1,10]`
    /// (`spec.md` §4.3 step 2): `n(a) = 1 + 9·(x−min)/(max−min)`, or the
    /// neutral midpoint when the range collapses or the edge lacks the
    /// attribute.
    ///
    /// Direction-of-preference inversion (step 3) is not applied here — it
    /// depends on the consuming profile's schema (`spec.md` §9 "Open
    /// questions"), so it lives alongside composite-weight computation.
    pub fn normalize(&self, edge: EdgeId, attr: AttrId) -> f64 {
        let (min, max) = self.attr_range[attr.index()];
        match self.attr_raw(edge, attr) {
            Some(x) if max > min => 1.0 + 9.0 * (x - min) / (max - min),
            _ => NEUTRAL_NORMALIZED,
        }
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

struct RawEdge {
    from: NodeId,
    to: NodeId,
    length: f64,
    attrs: HashMap<AttrId, f64>,
}

/// Incrementally construct a [`Network`], then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cyclenet_core::Point2;
/// use cyclenet_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_node("A", Point2::new(0.0, 0.0)).unwrap();
/// let c = b.add_node("C", Point2::new(100.0, 0.0)).unwrap();
/// b.add_edge("A", "C", 100.0, &[("safety", 9.0)]).unwrap();
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 1);
/// assert_eq!(net.find_node("A"), Some(a));
/// let _ = c;
/// ```
pub struct NetworkBuilder {
    node_ids: Vec<String>,
    node_index: HashMap<String, NodeId>,
    node_pos: Vec<Point2>,
    raw_edges: Vec<RawEdge>,
    attr_names: Vec<String>,
    attr_index: HashMap<String, AttrId>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        let mut attr_index = HashMap::new();
        attr_index.insert("length".to_string(), LENGTH_ATTR);
        Self {
            node_ids: Vec::new(),
            node_index: HashMap::new(),
            node_pos: Vec::new(),
            raw_edges: Vec::new(),
            attr_names: vec!["length".to_string()],
            attr_index,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut b = Self::new();
        b.node_ids.reserve(nodes);
        b.node_pos.reserve(nodes);
        b.raw_edges.reserve(edges);
        b
    }

    /// Add a node with a stable external string id. Fails if `id` was
    /// already added (`spec.md` §7 Validation).
    pub fn add_node(&mut self, id: impl Into<String>, pos: Point2) -> NetworkResult<NodeId> {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return Err(NetworkError::DuplicateNode(id));
        }
        let node = NodeId(self.node_ids.len() as u32);
        self.node_index.insert(id.clone(), node);
        self.node_ids.push(id);
        self.node_pos.push(pos);
        Ok(node)
    }

    fn attr_id_for(&mut self, name: &str) -> AttrId {
        if let Some(&id) = self.attr_index.get(name) {
            return id;
        }
        let id = AttrId(self.attr_names.len() as u16);
        self.attr_names.push(name.to_string());
        self.attr_index.insert(name.to_string(), id);
        id
    }

    /// Add a **directed** edge `from -> to` looked up by string id.
    ///
    /// `attrs` holds the free-form numeric attributes (`grade`, `safety`,
    /// `lighting`, or scenario-specific extras); `length` is supplied
    /// separately and must be finite and `> 0`.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        length: f64,
        attrs: &[(&str, f64)],
    ) -> NetworkResult<()> {
        let from_id = self
            .node_index
            .get(from)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(from.to_string()))?;
        let to_id = self
            .node_index
            .get(to)
            .copied()
            .ok_or_else(|| NetworkError::UnknownNode(to.to_string()))?;

        if !length.is_finite() || length <= 0.0 {
            return Err(NetworkError::InvalidLength(length));
        }

        let mut map = HashMap::with_capacity(attrs.len());
        for &(name, value) in attrs {
            if !value.is_finite() {
                return Err(NetworkError::NonFiniteAttr {
                    attr: name.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                    value,
                });
            }
            let id = self.attr_id_for(name);
            map.insert(id, value);
        }

        self.raw_edges.push(RawEdge {
            from: from_id,
            to: to_id,
            length,
            attrs: map,
        });
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Consume the builder and produce a [`Network`].
    pub fn build(self) -> NetworkResult<Network> {
        let node_count = self.node_ids.len();
        let edge_count = self.raw_edges.len();

        // Stable sort by source node for CSR construction; preserves
        // insertion order among edges sharing a source, so EdgeId
        // assignment is deterministic given the same add_edge call order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to: Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length: Vec<f64> = raw.iter().map(|e| e.length).collect();
        let edge_capacity: Vec<u32> = edge_length
            .iter()
            .map(|&l| (l / BIKE_FOOTPRINT_M).floor() as u32)
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let attr_count = self.attr_names.len();
        let mut attr_values = vec![vec![f64::NAN; edge_count]; attr_count];
        for (i, e) in raw.iter().enumerate() {
            attr_values[LENGTH_ATTR.index()][i] = e.length;
            for (&attr, &value) in &e.attrs {
                attr_values[attr.index()][i] = value;
            }
        }

        let attr_range = attr_values
            .iter()
            .map(|values| {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for &v in values {
                    if !v.is_nan() {
                        min = min.min(v);
                        max = max.max(v);
                    }
                }
                if min.is_finite() && max.is_finite() {
                    (min, max)
                } else {
                    (0.0, 0.0)
                }
            })
            .collect();

        Ok(Network {
            node_ids: self.node_ids,
            node_index: self.node_index,
            node_pos: self.node_pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            edge_capacity,
            attr_names: self.attr_names,
            attr_index: self.attr_index,
            attr_values,
            attr_range,
        })
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
