use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::RoutingError;
use crate::graph_representation::WeightedGraph;
use crate::types::*;

/// creates a random connected graph with integral edge lengths in `min_weight..=max_weight`.
///
/// undirected graphs start from a random spanning tree, directed graphs from a random
/// hamiltonian cycle so every vertex reaches every other. `extra_edges` random edges
/// (parallel edges included, no self loops) are added on top
pub fn random_connected_graph<R: Rng>(
    rng: &mut R,
    num_vertices: usize,
    extra_edges: usize,
    directed: bool,
    min_weight: u32,
    max_weight: u32
) -> Result<WeightedGraph, RoutingError> {
    if min_weight > max_weight {
        return Err(RoutingError::InvalidGraph(format!("min weight {} exceeds max weight {}", min_weight, max_weight)));
    }

    let weights = min_weight..=max_weight;

    let mut order: NodeIds = (0..num_vertices as NodeId).collect();
    order.shuffle(rng);

    let mut edges: Vec<(NodeId, NodeId, Weight)> = Vec::new();

    for index in 1..order.len() {
        let parent = if directed {
            order[index - 1]
        }
        else {
            order[rng.gen_range(0..index)]
        };

        edges.push((parent, order[index], random_weight(rng, &weights)));
    }

    // close the cycle
    if directed && order.len() > 1 {
        edges.push((order[order.len() - 1], order[0], random_weight(rng, &weights)));
    }

    if num_vertices > 1 {
        for _ in 0..extra_edges {
            let tail = rng.gen_range(0..num_vertices) as NodeId;
            let mut head = rng.gen_range(0..(num_vertices - 1)) as NodeId;

            // skip over the tail so head is uniform among the other vertices
            if head >= tail {
                head += 1;
            }

            edges.push((tail, head, random_weight(rng, &weights)));
        }
    }

    WeightedGraph::new(num_vertices, directed, &edges)
}

fn random_weight<R: Rng>(rng: &mut R, weights: &RangeInclusive<u32>) -> Weight {
    rng.gen_range(weights.clone()) as Weight
}
