use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::problem::{Problem, SetId};

/// Picks the next set for the greedy engine: the one with the smallest
/// `cost / live` among sets that are not selected and still cover something,
/// ties going to the lowest set id.
pub trait Selector {
    fn next_best(&mut self, problem: &Problem) -> Option<SetId>;
}

/// Rescans every set on each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullScan;

impl Selector for FullScan {
    fn next_best(&mut self, problem: &Problem) -> Option<SetId> {
        let mut best: Option<(f64, SetId)> = None;
        for (id, set) in problem.sets().iter().enumerate() {
            if let Some(e) = set.efficiency() {
                match best {
                    Some((mn, _)) if e >= mn => {}
                    _ => best = Some((e, id)),
                }
            }
        }
        best.map(|(_, id)| id)
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    efficiency: f64,
    set: SetId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.efficiency.total_cmp(&other.efficiency).then(self.set.cmp(&other.set))
    }
}

/// A min-heap of efficiencies that is refreshed lazily.
///
/// Live counts only ever decrease, so a stored efficiency is a lower bound on
/// the current one. Popping until the top entry is up to date therefore yields
/// exactly what [`FullScan`] would, without touching sets whose entries are
/// buried in the heap.
#[derive(Debug, Clone)]
pub struct LazyHeap {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl LazyHeap {
    pub fn new(problem: &Problem) -> LazyHeap {
        let heap = problem.sets().iter().enumerate()
            .filter_map(|(set, s)| s.efficiency().map(|efficiency| Reverse(Entry { efficiency, set })))
            .collect();
        LazyHeap { heap }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Selector for LazyHeap {
    fn next_best(&mut self, problem: &Problem) -> Option<SetId> {
        while let Some(&Reverse(top)) = self.heap.peek() {
            match problem.set(top.set).efficiency() {
                Some(e) if e == top.efficiency => return Some(top.set),
                Some(e) => {
                    self.heap.pop();
                    self.heap.push(Reverse(Entry { efficiency: e, set: top.set }));
                }
                None => { self.heap.pop(); }
            }
        }
        None
    }
}
