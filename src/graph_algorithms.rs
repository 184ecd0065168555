use std::cmp::Ordering;

use tracing::trace;

use crate::types::*;
use crate::utils::binary_heap::{HeapElement, MinBinaryHeap};
use crate::utils::data_structures::ValidFlags;

#[derive(Copy, Clone, Debug)]
pub struct DijkstraState {
    pub distance: Weight,
    pub hops: u32,
    pub node_id: NodeId,
}

impl HeapElement for DijkstraState {

    fn unique_index(&self) -> usize {
        self.node_id as usize
    }
}

// equal distances are settled by fewer hops first, then in ascending node id order
impl Ord for DijkstraState {

    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
            .then_with(|| self.hops.cmp(&other.hops))
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for DijkstraState {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DijkstraState {

    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraState {}

/// single pair dijkstra search. the buffers are kept between searches and invalidated lazily.
///
/// paths are shortest by length first and by number of edges second. every sub path of such a
/// path is minimal in the same order, which keeps next hops taken from different searches free of cycles
/// even when zero length edges create ties
#[derive(Clone, Debug)]
pub struct ShortestPathSearch {
    distances: ValidFlags<Weight>,
    hops: ValidFlags<u32>,
    predecessors: ValidFlags<(NodeId, EdgeId)>, // (previous node, edge used to reach the node)
    queue: MinBinaryHeap<DijkstraState>,
}

impl ShortestPathSearch {

    pub fn new(num_nodes: usize) -> Self {
        ShortestPathSearch {
            distances: ValidFlags::new(num_nodes, INFINITY),
            hops: ValidFlags::new(num_nodes, u32::MAX),
            predecessors: ValidFlags::new(num_nodes, (NO_NEXT_HOP, 0)),
            queue: MinBinaryHeap::new(num_nodes),
        }
    }

    /// runs dijkstra on the adjacency array `first_out` / `arclist` until `target` is settled.
    /// returns the vertices of the path (source and target included) and the edges between them,
    /// or None if the target cannot be reached
    pub fn run(
        &mut self,
        first_out: &[EdgeId],
        arclist: &Arclist,
        source: NodeId,
        target: NodeId,
        weight: &dyn Fn(EdgeId) -> Weight
    ) -> Option<(NodeIds, EdgeIds)> {
        self.distances.reset();
        self.hops.reset();
        self.predecessors.reset();
        self.queue.clear();

        self.distances.set(source as usize, 0.0);
        self.hops.set(source as usize, 0);
        self.queue.insert(DijkstraState {distance: 0.0, hops: 0, node_id: source});

        let mut settled_target = false;

        while let Some(DijkstraState {distance, hops, node_id}) = self.queue.pop() {
            if node_id == target {
                settled_target = true;
                self.queue.clear();
                break;
            }

            let start = first_out[node_id as usize] as usize;
            let end = first_out[node_id as usize + 1] as usize;

            for (head, edge_id) in &arclist[start..end] {
                let new_distance = distance + weight(*edge_id);
                let new_hops = hops + 1;

                let old_distance = self.distances[*head as usize];
                let improves = new_distance < old_distance
                    || (new_distance == old_distance && new_hops < self.hops[*head as usize]);

                if improves {
                    self.distances.set(*head as usize, new_distance);
                    self.hops.set(*head as usize, new_hops);
                    self.predecessors.set(*head as usize, (node_id, *edge_id));

                    self.queue.insert_or_decrease(DijkstraState {distance: new_distance, hops: new_hops, node_id: *head});
                }
            }
        }

        if !settled_target {
            trace!(source, target, "target not reachable");
            return None;
        }

        self.unpack_path(source, target)
    }

    /// walks the predecessor edges back from the target
    fn unpack_path(&self, source: NodeId, target: NodeId) -> Option<(NodeIds, EdgeIds)> {
        let mut path: NodeIds = vec![target];
        let mut edges: EdgeIds = Vec::new();
        let mut current_node = target;

        while current_node != source {
            if !self.predecessors.is_valid(current_node as usize) {
                return None;
            }

            let (previous_node, edge_id) = self.predecessors[current_node as usize];
            path.push(previous_node);
            edges.push(edge_id);
            current_node = previous_node;
        }

        path.reverse();
        edges.reverse();

        Some((path, edges))
    }
}
