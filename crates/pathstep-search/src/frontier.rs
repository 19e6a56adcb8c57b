use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Reference into the grid's cell array, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    idx: usize,
    dist: i32,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys so the max-heap pops the smallest distance, and
        // among equal distances the earliest insertion.
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of cell indices keyed by tentative distance.
///
/// A cell may be pushed several times as its distance improves. Old entries
/// stay in the heap and are dropped when they surface, once the caller
/// reports their cell as already settled.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
    discarded: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue cell `idx` at distance `dist`. Duplicates are allowed.
    pub fn push(&mut self, idx: usize, dist: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { idx, dist, seq });
    }

    /// Remove and return the minimum-distance entry whose cell is not yet
    /// settled, discarding settled ones on the way.
    pub fn pop_min(&mut self, mut settled: impl FnMut(usize) -> bool) -> Option<(usize, i32)> {
        while let Some(e) = self.heap.pop() {
            if settled(e.idx) {
                self.discarded += 1;
                continue;
            }
            return Some((e.idx, e.dist));
        }
        None
    }

    /// Entries currently queued, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// How many stale entries have been dropped since the last clear.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
        self.discarded = 0;
    }
}
