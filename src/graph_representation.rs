use std::cell::RefCell;
use std::ops::Range;

use crate::error::RoutingError;
use crate::graph_algorithms::ShortestPathSearch;
use crate::types::*;

/// everything the routing table builder needs to know about a graph
pub trait RoutingGraph {

    fn num_vertices(&self) -> usize;

    fn node_ids(&self) -> Range<NodeId> {
        0..(self.num_vertices() as NodeId)
    }

    fn is_directed(&self) -> bool;

    /// the `edge_length` attribute of an edge
    fn edge_length(&self, edge_id: EdgeId) -> Weight;

    /// outgoing (head, edge id) pairs. for undirected graphs this lists every incident edge
    fn out_edges(&self, node: NodeId) -> &Arclist;

    /// authoritative distances from `node` to every vertex, if they are already known
    fn precomputed_distance_row(&self, node: NodeId) -> Option<&[Weight]>;

    fn has_precomputed_distance(&self, node: NodeId) -> bool {
        self.precomputed_distance_row(node).is_some()
    }

    /// a minimum weight simple path from source to target under the given edge weights.
    /// returns the vertices (both endpoints included) and the edge between each consecutive pair
    fn shortest_path(&self, source: NodeId, target: NodeId, weight: &dyn Fn(EdgeId) -> Weight) -> Option<(NodeIds, EdgeIds)>;
}

/// static in-memory graph stored as an adjacency array
#[derive(Clone, Debug)]
pub struct WeightedGraph {
    directed: bool,

    first_out: EdgeIds,
    arclist: Vec<(NodeId, EdgeId)>,

    edge_lengths: Weights,
    edge_types: Option<Vec<EdgeType>>,
    precomputed_distances: Vec<Option<Weights>>,

    search: RefCell<ShortestPathSearch>,
}

impl WeightedGraph {

    /// builds a graph from (tail, head, edge_length) triples. the position of an edge in `edges` is its edge id.
    /// undirected edges are stored as two arcs sharing the same edge id
    pub fn new(num_vertices: usize, directed: bool, edges: &[(NodeId, NodeId, Weight)]) -> Result<WeightedGraph, RoutingError> {
        if num_vertices >= NO_NEXT_HOP as usize {
            return Err(RoutingError::InvalidGraph(format!("{} vertices exceed the supported maximum", num_vertices)));
        }

        if edges.len() > EdgeId::MAX as usize / 2 {
            return Err(RoutingError::InvalidGraph(format!("{} edges exceed the supported maximum", edges.len())));
        }

        let mut arcs: Vec<Vec<(NodeId, EdgeId)>> = vec![Vec::new(); num_vertices];
        let mut edge_lengths: Weights = Vec::with_capacity(edges.len());

        for (edge_id, (tail, head, length)) in edges.iter().enumerate() {
            if *tail as usize >= num_vertices || *head as usize >= num_vertices {
                return Err(RoutingError::InvalidGraph(format!("edge {} connects {} and {} but the graph only has {} vertices", edge_id, tail, head, num_vertices)));
            }

            if !length.is_finite() || *length < 0.0 {
                return Err(RoutingError::InvalidGraph(format!("edge {} has invalid length {}", edge_id, length)));
            }

            arcs[*tail as usize].push((*head, edge_id as EdgeId));

            // a self loop is a single incident edge
            if !directed && tail != head {
                arcs[*head as usize].push((*tail, edge_id as EdgeId));
            }

            edge_lengths.push(*length);
        }

        let (first_out, arclist) = convert_arcs_to_adjacency_array(&arcs);

        Ok(WeightedGraph {
            directed,
            first_out,
            arclist,
            edge_lengths,
            edge_types: None,
            precomputed_distances: vec![None; num_vertices],
            search: RefCell::new(ShortestPathSearch::new(num_vertices)),
        })
    }

    /// attaches one type tag per edge, indexed by edge id
    pub fn with_edge_types(mut self, edge_types: Vec<EdgeType>) -> Result<WeightedGraph, RoutingError> {
        if edge_types.len() != self.num_edges() {
            return Err(RoutingError::InvalidGraph(format!("got {} edge types for {} edges", edge_types.len(), self.num_edges())));
        }

        self.edge_types = Some(edge_types);
        Ok(self)
    }

    /// attaches a precomputed distance row to every vertex
    pub fn with_precomputed_distances(mut self, rows: Vec<Weights>) -> Result<WeightedGraph, RoutingError> {
        if rows.len() != self.num_vertices() {
            return Err(RoutingError::InvalidGraph(format!("got {} distance rows for {} vertices", rows.len(), self.num_vertices())));
        }

        for (node, row) in rows.into_iter().enumerate() {
            self = self.with_precomputed_distance_row(node as NodeId, row)?;
        }

        Ok(self)
    }

    /// attaches a precomputed distance row to a single vertex
    pub fn with_precomputed_distance_row(mut self, node: NodeId, row: Weights) -> Result<WeightedGraph, RoutingError> {
        let num_vertices = self.num_vertices();

        if node as usize >= num_vertices {
            return Err(RoutingError::InvalidGraph(format!("vertex {} does not exist", node)));
        }

        if row.len() != num_vertices {
            return Err(RoutingError::InvalidGraph(format!("distance row of vertex {} has {} entries, expected {}", node, row.len(), num_vertices)));
        }

        if row.iter().any(|distance| distance.is_nan() || *distance < 0.0) {
            return Err(RoutingError::InvalidGraph(format!("distance row of vertex {} contains a negative or NaN entry", node)));
        }

        self.precomputed_distances[node as usize] = Some(row);
        Ok(self)
    }

    pub fn num_edges(&self) -> usize {
        self.edge_lengths.len()
    }

    pub fn edge_type(&self, edge_id: EdgeId) -> Option<EdgeType> {
        self.edge_types.as_ref().and_then(|edge_types| edge_types.get(edge_id as usize).copied())
    }

    /// the edge connecting `tail` to `head` (the first one if there are parallel edges)
    pub fn edge_between(&self, tail: NodeId, head: NodeId) -> Option<EdgeId> {
        if tail as usize >= self.num_vertices() {
            return None;
        }

        self.out_edges(tail).iter()
            .find(|(adj_node, _)| *adj_node == head)
            .map(|(_, edge_id)| *edge_id)
    }

    /// adjacency list of every vertex and, if edge types are attached, the type of each listed edge
    pub fn adjacency(&self) -> (Vec<NodeIds>, Option<Vec<Vec<EdgeType>>>) {
        let adjacent: Vec<NodeIds> = self.node_ids()
            .map(|node| self.out_edges(node).iter().map(|(head, _)| *head).collect())
            .collect();

        let types = self.edge_types.as_ref().map(|edge_types| {
            self.node_ids()
                .map(|node| self.out_edges(node).iter().map(|(_, edge_id)| edge_types[*edge_id as usize]).collect())
                .collect()
        });

        (adjacent, types)
    }
}

impl RoutingGraph for WeightedGraph {

    fn num_vertices(&self) -> usize {
        self.first_out.len() - 1
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edge_length(&self, edge_id: EdgeId) -> Weight {
        self.edge_lengths[edge_id as usize]
    }

    fn out_edges(&self, node: NodeId) -> &Arclist {
        let start = self.first_out[node as usize] as usize;
        let end = self.first_out[node as usize + 1] as usize;

        &self.arclist[start..end]
    }

    fn precomputed_distance_row(&self, node: NodeId) -> Option<&[Weight]> {
        self.precomputed_distances[node as usize].as_deref()
    }

    fn shortest_path(&self, source: NodeId, target: NodeId, weight: &dyn Fn(EdgeId) -> Weight) -> Option<(NodeIds, EdgeIds)> {
        match self.search.try_borrow_mut() {
            Ok(mut search) => search.run(&self.first_out, &self.arclist, source, target, weight),
            // re-entrant call from inside the weight function
            Err(_) => ShortestPathSearch::new(self.num_vertices()).run(&self.first_out, &self.arclist, source, target, weight),
        }
    }
}

fn convert_arcs_to_adjacency_array(arcs: &[Vec<(NodeId, EdgeId)>]) -> (EdgeIds, Vec<(NodeId, EdgeId)>) {
    let mut first_out: EdgeIds = Vec::with_capacity(arcs.len() + 1);
    let mut arclist: Vec<(NodeId, EdgeId)> = Vec::new();

    for node_arcs in arcs {
        first_out.push(arclist.len() as EdgeId);
        arclist.extend_from_slice(node_arcs);
    }

    first_out.push(arclist.len() as EdgeId);

    (first_out, arclist)
}
