//! Priority frontier for best-first searches.
//!
//! Entries live in a min-heap keyed by `(f, seq)`. Lower `f` pops first;
//! ties are broken by insertion order (FIFO), which makes expansion order
//! reproducible for identical inputs. A hash set mirrors which points are
//! waiting so membership tests are O(1).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use pathlab_core::Point;

/// An entry in the frontier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub f: i32,
    /// Monotonically increasing counter assigned at push time.
    pub seq: u64,
    pub pos: Point,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.f.cmp(&other.f).then(self.seq.cmp(&other.seq))
    }
}

/// Min-priority frontier with insertion-order tie breaking.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    members: HashSet<Point>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `pos` with priority `f`, returning the sequence number given to
    /// the entry.
    pub fn push(&mut self, pos: Point, f: i32) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { f, seq, pos }));
        self.members.insert(pos);
        seq
    }

    /// Pop the entry with the lowest `(f, seq)`; its point stops being a
    /// member.
    pub fn pop(&mut self) -> Option<Entry> {
        let Reverse(entry) = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry)
    }

    /// Whether `pos` is currently awaiting expansion.
    #[inline]
    pub fn contains(&self, pos: Point) -> bool {
        self.members.contains(&pos)
    }

    /// Whether no entries remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of waiting entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Number of sequence numbers handed out so far.
    #[inline]
    pub fn pushed(&self) -> u64 {
        self.seq
    }
}
