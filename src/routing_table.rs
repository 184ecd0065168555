//! All pairs routing tables built from single pair shortest path searches.
//!
//! Every search returns one shortest path. Since every sub path of a shortest path is itself
//! a shortest path, a path with `L` vertices fills the distance and next hop entries of all
//! `L * (L - 1) / 2` vertex pairs along it (both directions on undirected graphs). Pairs that
//! are already filled are never searched again.

use tracing::{debug, info, warn};

use crate::config::{RoutingConfig, UnreachablePolicy};
use crate::error::RoutingError;
use crate::graph_representation::RoutingGraph;
use crate::types::*;
use crate::utils::data_structures::Matrix;

/// next hop and distance matrix for every ordered pair of vertices
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingTable {
    next_hop: Matrix<NodeId>,
    distance: Matrix<Weight>,
    searches: usize,
}

impl RoutingTable {

    pub fn num_vertices(&self) -> usize {
        self.distance.rows()
    }

    /// length of the shortest path from `source` to `target`, None if there is none
    pub fn distance(&self, source: NodeId, target: NodeId) -> Option<Weight> {
        let distance = self.distance.get(source as usize, target as usize);

        if distance == INFINITY {
            None
        }
        else {
            Some(distance)
        }
    }

    /// vertex following `source` on the shortest path to `target`. `next_hop(v, v) == Some(v)`
    pub fn next_hop(&self, source: NodeId, target: NodeId) -> Option<NodeId> {
        let next_hop = self.next_hop.get(source as usize, target as usize);

        if next_hop == NO_NEXT_HOP {
            None
        }
        else {
            Some(next_hop)
        }
    }

    /// follows the next hops from `source` until `target` is reached
    pub fn path(&self, source: NodeId, target: NodeId) -> Option<NodeIds> {
        let mut path = vec![source];
        let mut current_node = source;

        while current_node != target {
            // a simple path never has more vertices than the graph
            if path.len() >= self.num_vertices() {
                return None;
            }

            current_node = self.next_hop(current_node, target)?;
            path.push(current_node);
        }

        Some(path)
    }

    /// number of shortest path searches the computation needed
    pub fn searches(&self) -> usize {
        self.searches
    }

    pub fn next_hop_matrix(&self) -> &Matrix<NodeId> {
        &self.next_hop
    }

    pub fn distance_matrix(&self) -> &Matrix<Weight> {
        &self.distance
    }

    pub fn into_parts(self) -> (Matrix<NodeId>, Matrix<Weight>) {
        (self.next_hop, self.distance)
    }
}

/// computes the routing table of a graph with the default configuration
pub fn compute<G: RoutingGraph + ?Sized>(graph: &G) -> Result<(Matrix<NodeId>, Matrix<Weight>), RoutingError> {
    RoutingTableBuilder::default()
        .compute(graph)
        .map(RoutingTable::into_parts)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RoutingTableBuilder {
    config: RoutingConfig,
}

impl RoutingTableBuilder {

    pub fn new(config: RoutingConfig) -> Self {
        RoutingTableBuilder {
            config
        }
    }

    pub fn compute<G: RoutingGraph + ?Sized>(&self, graph: &G) -> Result<RoutingTable, RoutingError> {
        let num_vertices = graph.num_vertices();
        let mut tables = PartialTables::new(num_vertices, !graph.is_directed());

        // authoritative rows first, they must never be overwritten by path propagation
        for node in graph.node_ids() {
            if !graph.has_precomputed_distance(node) {
                continue;
            }

            let row = graph.precomputed_distance_row(node)
                .ok_or_else(|| RoutingError::InvalidGraph(format!("vertex {} reports a precomputed distance row but provides none", node)))?;

            if row.len() != num_vertices {
                return Err(RoutingError::InvalidGraph(format!("distance row of vertex {} has {} entries, expected {}", node, row.len(), num_vertices)));
            }

            if let Some(target) = row.iter().position(|distance| *distance == INFINITY) {
                self.unreachable(node, target as NodeId)?;
            }

            tables.set_authoritative_row(node, row);
        }

        let edge_length = |edge_id: EdgeId| graph.edge_length(edge_id);
        let mut searches = 0;

        for source in graph.node_ids() {
            if tables.is_authoritative(source) {
                continue;
            }

            for target in graph.node_ids() {
                if source == target || tables.has_distance(source, target) {
                    continue;
                }

                searches += 1;

                match graph.shortest_path(source, target, &edge_length) {
                    Some((path, edges)) => {
                        debug!(source, target, hops = edges.len(), "shortest path search");

                        let edge_lengths: Weights = edges.iter().map(|edge_id| graph.edge_length(*edge_id)).collect();
                        tables.add_path(&path, &edge_lengths);
                    },
                    None => self.unreachable(source, target)?,
                }
            }

            tables.settle_row(source);
        }

        tables.derive_authoritative_next_hops(graph);

        let (next_hop, distance) = tables.finish();

        info!(num_vertices, searches, directed = graph.is_directed(), "routing table computed");

        Ok(RoutingTable {
            next_hop,
            distance,
            searches
        })
    }

    fn unreachable(&self, from: NodeId, to: NodeId) -> Result<(), RoutingError> {
        match self.config.unreachable {
            UnreachablePolicy::Error => Err(RoutingError::Unreachable {from, to}),
            UnreachablePolicy::Sentinel => {
                warn!(from, to, "vertex pair is unreachable");
                Ok(())
            }
        }
    }
}

/// the matrices while they are being filled
struct PartialTables {
    undirected: bool,
    distance: Matrix<Weight>,
    scratch_next_hop: Matrix<NodeId>, // receives every propagated next hop
    next_hop: Matrix<NodeId>, // a row is copied from the scratch buffer once its source has been handled
    authoritative: Vec<bool>,
}

impl PartialTables {

    fn new(num_vertices: usize, undirected: bool) -> Self {
        let mut distance = Matrix::new(num_vertices, num_vertices, INFINITY);

        for node in 0..num_vertices {
            distance.set(node, node, 0.0);
        }

        PartialTables {
            undirected,
            distance,
            scratch_next_hop: Matrix::new(num_vertices, num_vertices, NO_NEXT_HOP),
            next_hop: Matrix::new(num_vertices, num_vertices, NO_NEXT_HOP),
            authoritative: vec![false; num_vertices],
        }
    }

    fn is_authoritative(&self, node: NodeId) -> bool {
        self.authoritative[node as usize]
    }

    fn has_distance(&self, source: NodeId, target: NodeId) -> bool {
        self.distance.get(source as usize, target as usize) != INFINITY
    }

    fn set_authoritative_row(&mut self, node: NodeId, row: &[Weight]) {
        self.distance.row_mut(node as usize).copy_from_slice(row);
        self.authoritative[node as usize] = true;
    }

    /// fills all pairs along a shortest path. `edge_lengths[i]` is the length of the edge from `path[i]` to `path[i + 1]`
    fn add_path(&mut self, path: &[NodeId], edge_lengths: &[Weight]) {
        self.add_distances(path, edge_lengths);
        self.add_next_hops(path);

        if self.undirected {
            let reversed_path: NodeIds = path.iter().rev().copied().collect();
            let reversed_lengths: Weights = edge_lengths.iter().rev().copied().collect();

            self.add_distances(&reversed_path, &reversed_lengths);
            self.add_next_hops(&reversed_path);
        }
    }

    fn add_distances(&mut self, path: &[NodeId], edge_lengths: &[Weight]) {
        for (start_index, start_node) in path.iter().enumerate() {
            if self.authoritative[*start_node as usize] {
                continue;
            }

            let mut length = 0.0;

            for end_index in (start_index + 1)..path.len() {
                length += edge_lengths[end_index - 1];
                self.distance.set(*start_node as usize, path[end_index] as usize, length);
            }
        }
    }

    /// routes every vertex of the path towards the last vertex, then repeats this for every proper prefix
    fn add_next_hops(&mut self, path: &[NodeId]) {
        for prefix_end in (1..path.len()).rev() {
            let prefix = &path[..=prefix_end];
            let destination = prefix[prefix_end] as usize;

            for hop in prefix.windows(2) {
                self.scratch_next_hop.set(hop[0] as usize, destination, hop[1]);
            }
        }
    }

    fn settle_row(&mut self, source: NodeId) {
        self.next_hop.copy_row_from(source as usize, &self.scratch_next_hop);
    }

    /// rows taken from precomputed distances have no paths to propagate. towards every target their
    /// next hops are chosen backwards from the target in order of increasing distance, and a vertex
    /// only points at a neighbour that is already routed to the target. the next hops towards one
    /// target therefore form a tree
    fn derive_authoritative_next_hops<G: RoutingGraph + ?Sized>(&mut self, graph: &G) {
        if !self.authoritative.contains(&true) {
            return;
        }

        let mut routed = vec![false; self.authoritative.len()];

        for target in graph.node_ids() {
            let mut order: NodeIds = graph.node_ids()
                .filter(|node| *node != target && self.has_distance(*node, target))
                .collect();
            order.sort_by(|a, b| self.distance_to(*a, target).total_cmp(&self.distance_to(*b, target)));

            routed.fill(false);
            routed[target as usize] = true;

            // zero length edges put several vertices at the same distance, so each group is
            // repeated until it stops changing
            let mut group_start = 0;

            while group_start < order.len() {
                let group_distance = self.distance_to(order[group_start], target);
                let group_end = order[group_start..].iter()
                    .position(|node| self.distance_to(*node, target) != group_distance)
                    .map_or(order.len(), |offset| group_start + offset);

                self.route_group(graph, &order[group_start..group_end], target, &mut routed, true);
                group_start = group_end;
            }

            // rows that disagree with the edge lengths have no neighbour matching their distance
            let remaining: NodeIds = order.into_iter().filter(|node| !routed[*node as usize]).collect();
            self.route_group(graph, &remaining, target, &mut routed, false);
        }
    }

    fn distance_to(&self, node: NodeId, target: NodeId) -> Weight {
        self.distance.get(node as usize, target as usize)
    }

    /// routes vertices of `group` towards `target` until no further vertex can be routed.
    /// searched rows keep their next hop and only count as routed once that hop is
    fn route_group<G: RoutingGraph + ?Sized>(&mut self, graph: &G, group: &[NodeId], target: NodeId, routed: &mut [bool], tight_only: bool) {
        let mut progress = true;

        while progress {
            progress = false;

            for node in group {
                if routed[*node as usize] {
                    continue;
                }

                if !self.is_authoritative(*node) {
                    let hop = self.next_hop.get(*node as usize, target as usize);

                    if hop != NO_NEXT_HOP && routed[hop as usize] {
                        routed[*node as usize] = true;
                        progress = true;
                    }

                    continue;
                }

                if let Some(head) = self.routed_neighbour(graph, *node, target, routed, tight_only) {
                    self.next_hop.set(*node as usize, target as usize, head);
                    routed[*node as usize] = true;
                    progress = true;
                }
            }
        }
    }

    /// the routed neighbour minimizing edge length plus remaining distance (first edge on ties).
    /// with `tight_only` its value also has to be the minimum over all neighbours
    fn routed_neighbour<G: RoutingGraph + ?Sized>(&self, graph: &G, node: NodeId, target: NodeId, routed: &[bool], tight_only: bool) -> Option<NodeId> {
        let mut minimum = INFINITY;
        let mut best: Option<(NodeId, Weight)> = None;

        for (head, edge_id) in graph.out_edges(node) {
            if *head == node {
                continue;
            }

            let candidate = graph.edge_length(*edge_id) + self.distance_to(*head, target);
            minimum = minimum.min(candidate);

            if routed[*head as usize] && candidate < best.map_or(INFINITY, |(_, distance)| distance) {
                best = Some((*head, candidate));
            }
        }

        match best {
            Some((head, distance)) if !tight_only || distance == minimum => Some(head),
            _ => None,
        }
    }

    fn finish(mut self) -> (Matrix<NodeId>, Matrix<Weight>) {
        for node in 0..self.next_hop.rows() {
            self.next_hop.set(node, node, node as NodeId);
        }

        (self.next_hop, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_representation::WeightedGraph;

    #[test]
    fn one_path_fills_all_sub_paths() {
        let mut tables = PartialTables::new(4, true);
        tables.add_path(&[0, 1, 2, 3], &[1.0, 2.0, 4.0]);

        assert_eq!(tables.distance.get(0, 3), 7.0);
        assert_eq!(tables.distance.get(1, 3), 6.0);
        assert_eq!(tables.distance.get(0, 2), 3.0);
        assert_eq!(tables.distance.get(3, 0), 7.0);
        assert_eq!(tables.distance.get(2, 1), 2.0);

        assert_eq!(tables.scratch_next_hop.get(0, 3), 1);
        assert_eq!(tables.scratch_next_hop.get(0, 2), 1);
        assert_eq!(tables.scratch_next_hop.get(1, 3), 2);
        assert_eq!(tables.scratch_next_hop.get(3, 0), 2);
        assert_eq!(tables.scratch_next_hop.get(2, 0), 1);
    }

    #[test]
    fn directed_path_fills_forward_only() {
        let mut tables = PartialTables::new(3, false);
        tables.add_path(&[2, 0, 1], &[1.0, 1.0]);

        assert_eq!(tables.distance.get(2, 1), 2.0);
        assert_eq!(tables.scratch_next_hop.get(2, 1), 0);
        assert!(!tables.has_distance(1, 2));
        assert_eq!(tables.scratch_next_hop.get(1, 2), NO_NEXT_HOP);
    }

    #[test]
    fn authoritative_rows_are_not_overwritten() {
        let mut tables = PartialTables::new(3, true);
        tables.set_authoritative_row(1, &[9.0, 0.0, 9.0]);
        tables.add_path(&[0, 1, 2], &[1.0, 1.0]);

        assert_eq!(tables.distance.row(1), &[9.0, 0.0, 9.0]);
        assert_eq!(tables.distance.get(0, 2), 2.0);
    }

    //  0 --0-- 1
    //   \     /
    //    1   1
    //     \ /
    //      2
    #[test]
    fn derived_next_hops_form_a_tree() {
        let graph = WeightedGraph::new(3, false, &[(0, 1, 0.0), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
        let mut tables = PartialTables::new(3, true);

        for (node, row) in [[0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0, 0.0]].iter().enumerate() {
            tables.set_authoritative_row(node as NodeId, row);
        }

        tables.derive_authoritative_next_hops(&graph);

        // 0 and 1 both have a tight route over the other one, at most one of them may take it
        assert_eq!(tables.next_hop.get(0, 2), 2);
        assert_eq!(tables.next_hop.get(1, 2), 0);
        assert_eq!(tables.next_hop.get(2, 0), 0);
        assert_eq!(tables.next_hop.get(0, 1), 1);
        assert_eq!(tables.next_hop.get(2, 1), 0);
    }

    #[test]
    fn settled_rows_are_frozen() {
        let mut tables = PartialTables::new(3, true);
        tables.add_path(&[0, 1], &[1.0]);
        tables.settle_row(0);
        tables.add_path(&[0, 2], &[1.0]);

        assert_eq!(tables.next_hop.get(0, 1), 1);
        assert_eq!(tables.next_hop.get(0, 2), NO_NEXT_HOP);
        assert_eq!(tables.scratch_next_hop.get(0, 2), 2);
    }
}
