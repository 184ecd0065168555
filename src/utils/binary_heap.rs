use std::cmp::Ordering;

/// addressable min heap: every element carries a unique index (e.g. its node id)
/// so its key can be decreased in place instead of pushing a duplicate entry
#[derive(Clone, Debug)]
pub struct MinBinaryHeap<T: HeapElement + Ord> {
    data: Vec<T>,
    positions: Vec<usize>
}

pub trait HeapElement {

    fn unique_index(&self) -> usize;
}

const NOT_IN_HEAP: usize = usize::MAX;

impl<T: HeapElement + Ord> MinBinaryHeap<T> {

    /// `size` is the exclusive upper bound of all unique indices inserted later
    pub fn new(size: usize) -> Self {
        MinBinaryHeap {
            data: Vec::new(),
            positions: vec![NOT_IN_HEAP; size]
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, unique_index: usize) -> bool {
        self.positions[unique_index] != NOT_IN_HEAP
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn insert(&mut self, entry: T) {
        let position = self.data.len();
        self.positions[entry.unique_index()] = position;
        self.data.push(entry);

        self.sift_up(position);
    }

    /// replaces the entry with the same unique index. the new entry must not be larger than the old one
    pub fn decrease(&mut self, entry: T) {
        let position = self.positions[entry.unique_index()];
        self.data[position] = entry;

        self.sift_up(position);
    }

    pub fn insert_or_decrease(&mut self, entry: T) {
        if self.contains(entry.unique_index()) {
            self.decrease(entry);
        }
        else {
            self.insert(entry);
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.len().checked_sub(1)?;
        self.swap(0, last);

        let min_element = self.data.pop()?;
        self.positions[min_element.unique_index()] = NOT_IN_HEAP;

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some(min_element)
    }

    /// only touches the positions of elements still in the heap
    pub fn clear(&mut self) {
        for element in &self.data {
            self.positions[element.unique_index()] = NOT_IN_HEAP;
        }

        self.data.clear();
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;

            if self.data[parent].cmp(&self.data[position]) != Ordering::Greater {
                break;
            }

            self.swap(parent, position);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;

            if left < self.data.len() && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < self.data.len() && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest == position {
                break;
            }

            self.swap(smallest, position);
            position = smallest;
        }
    }

    fn swap(&mut self, first: usize, second: usize) {
        self.positions[self.data[first].unique_index()] = second;
        self.positions[self.data[second].unique_index()] = first;

        self.data.swap(first, second);
    }
}
