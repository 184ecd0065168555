use routing_tables::graph_algorithms::DijkstraState;
use routing_tables::utils::binary_heap::{HeapElement, MinBinaryHeap};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Ord, PartialOrd)]
pub struct MinElement {
    pub value: usize,
    pub unique_id: usize
}

impl HeapElement for MinElement {

    fn unique_index(&self) -> usize {
        self.unique_id
    }
}

#[test]
fn insert_pop_test() {
    let mut min_heap = MinBinaryHeap::new(10);

    min_heap.insert(MinElement {value: 10, unique_id: 0});
    min_heap.insert(MinElement {value: 8, unique_id: 1});
    min_heap.insert(MinElement {value: 12, unique_id: 2});
    min_heap.insert(MinElement {value: 7, unique_id: 3});

    assert_eq!(min_heap.len(), 4);
    assert_eq!(min_heap.peek(), Some(&MinElement {value: 7, unique_id: 3}));

    assert_eq!(min_heap.pop(), Some(MinElement {value: 7, unique_id: 3}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 8, unique_id: 1}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 10, unique_id: 0}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 12, unique_id: 2}));
    assert_eq!(min_heap.pop(), None);
    assert!(min_heap.is_empty());
}

#[test]
fn decrease_test() {
    let mut min_heap = MinBinaryHeap::new(10);
    min_heap.insert(MinElement {value: 10, unique_id: 0});
    min_heap.insert(MinElement {value: 8, unique_id: 1});
    min_heap.insert(MinElement {value: 12, unique_id: 2});
    min_heap.insert(MinElement {value: 7, unique_id: 3});

    min_heap.decrease(MinElement {value: 4, unique_id: 2});

    assert_eq!(min_heap.len(), 4);
    assert_eq!(min_heap.pop(), Some(MinElement {value: 4, unique_id: 2}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 7, unique_id: 3}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 8, unique_id: 1}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 10, unique_id: 0}));
}

#[test]
fn insert_or_decrease_and_clear_test() {
    let mut min_heap = MinBinaryHeap::new(4);
    min_heap.insert_or_decrease(MinElement {value: 5, unique_id: 1});
    min_heap.insert_or_decrease(MinElement {value: 3, unique_id: 2});
    min_heap.insert_or_decrease(MinElement {value: 1, unique_id: 1});

    assert_eq!(min_heap.len(), 2);
    assert!(min_heap.contains(1));
    assert!(!min_heap.contains(0));

    min_heap.clear();
    assert!(min_heap.is_empty());
    assert!(!min_heap.contains(1));

    // positions are reset, so ids can be inserted again
    min_heap.insert_or_decrease(MinElement {value: 9, unique_id: 1});
    assert_eq!(min_heap.pop(), Some(MinElement {value: 9, unique_id: 1}));
}

#[test]
fn dijkstra_states_order_by_distance_then_hops_then_node() {
    let mut min_heap = MinBinaryHeap::new(5);
    min_heap.insert(DijkstraState {distance: 2.5, hops: 1, node_id: 0});
    min_heap.insert(DijkstraState {distance: 0.5, hops: 3, node_id: 3});
    min_heap.insert(DijkstraState {distance: 2.5, hops: 1, node_id: 1});
    min_heap.insert(DijkstraState {distance: 0.0, hops: 0, node_id: 2});
    min_heap.insert(DijkstraState {distance: 2.5, hops: 0, node_id: 4});

    let order: Vec<u32> = std::iter::from_fn(|| min_heap.pop()).map(|state| state.node_id).collect();

    assert_eq!(order, vec![2, 3, 4, 0, 1]);
}
