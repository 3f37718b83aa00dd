use bit_set::BitSet;
use rand::seq::index;
use rand::Rng;

use crate::buffer::GrowableBuffer;
use crate::element_list::{ElementList, ElementNode, NodeIndex};
use crate::error::{InstanceError, SolveError};
use crate::occurrence::{Occurrence, OccurrenceIndex};

/// The position of a set in its [`Problem`].
pub type SetId = usize;

/// One weighted set of the instance together with its uncovered elements.
#[derive(Clone, Debug)]
pub struct CoverSet {
    cost: f64,
    first: NodeIndex,
    size: usize,
    list: ElementList,
    selected: bool,
}

impl CoverSet {
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Cardinality of the set as loaded.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of elements of this set not covered yet.
    #[inline(always)]
    pub fn live(&self) -> usize {
        self.list.len()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Cost per uncovered element, or `None` if the set can no longer be
    /// picked (already selected, or nothing left to cover).
    #[inline(always)]
    pub fn efficiency(&self) -> Option<f64> {
        if self.selected || self.list.len() == 0 {
            None
        } else {
            Some(self.cost / self.list.len() as f64)
        }
    }

    pub fn list(&self) -> &ElementList {
        &self.list
    }
}

/// A weighted set cover instance prepared for the greedy engine.
///
/// All element nodes of all sets live in one arena. The nodes of a set are
/// contiguous and appear in input order; the occurrence index points from each
/// element value back into the arena.
#[derive(Clone, Debug)]
pub struct Problem {
    num_elements: usize,
    sets: Vec<CoverSet>,
    nodes: GrowableBuffer<ElementNode>,
    occurrences: OccurrenceIndex,
    best: Option<SetId>,
}

impl Problem {
    /// An instance over the universe `0..num_elements` with no sets yet.
    pub fn new(num_elements: usize) -> Result<Problem, InstanceError> {
        Ok(Problem {
            num_elements,
            sets: Vec::new(),
            nodes: GrowableBuffer::new(),
            occurrences: OccurrenceIndex::new(num_elements)?,
            best: None,
        })
    }

    pub fn with_sets<I, E>(num_elements: usize, sets: I) -> Result<Problem, InstanceError>
    where
        I: IntoIterator<Item = (f64, E)>,
        E: AsRef<[usize]>,
    {
        let mut problem = Problem::new(num_elements)?;
        for (cost, elements) in sets {
            problem.add_set(cost, elements.as_ref())?;
        }
        Ok(problem)
    }

    /// Appends a set and records its elements in the occurrence index.
    pub fn add_set(&mut self, cost: f64, elements: &[usize]) -> Result<SetId, InstanceError> {
        let id = self.sets.len();
        if !cost.is_finite() || cost < 0.0 {
            return Err(InstanceError::InvalidCost { set: id, cost });
        }
        if let Some(&element) = elements.iter().find(|&&e| e >= self.num_elements) {
            return Err(InstanceError::ElementOutOfRange { set: id, element, num_elements: self.num_elements });
        }
        let first = self.nodes.len();
        let mut list = ElementList::new();
        for &value in elements {
            let node = list.append(&mut self.nodes, id, value);
            self.occurrences.record(value, Occurrence { set: id, node });
        }
        self.sets.push(CoverSet { cost, first, size: elements.len(), list, selected: false });

        let efficiency = self.sets[id].efficiency();
        let best_efficiency = self.best.and_then(|b| self.sets[b].efficiency());
        match (efficiency, best_efficiency) {
            (Some(e), Some(b)) if e < b => self.best = Some(id),
            (Some(_), None) => self.best = Some(id),
            _ => {}
        }
        Ok(id)
    }

    /// Generates a feasible instance: every element lands in at least one of
    /// the `num_sets` sets, each holding up to `max_set_size` distinct elements
    /// and costing an integer in `1..=max_cost`.
    pub fn random<R: Rng>(num_elements: usize, num_sets: usize, max_set_size: usize, max_cost: u32, rng: &mut R) -> Result<Problem, InstanceError> {
        let mut sets: Vec<(f64, Vec<usize>)> = Vec::with_capacity(num_sets);
        let max_size = max_set_size.clamp(1, num_elements.max(1));
        for _ in 0..num_sets {
            let cost = rng.gen_range(1..=max_cost.max(1)) as f64;
            let elements = match num_elements {
                0 => Vec::new(),
                n => {
                    let size = rng.gen_range(1..=max_size);
                    index::sample(rng, n, size).into_vec()
                }
            };
            sets.push((cost, elements));
        }
        if num_sets > 0 {
            let mut seen = BitSet::with_capacity(num_elements);
            sets.iter().flat_map(|(_, s)| s.iter()).for_each(|&e| { seen.insert(e); });
            for e in (0..num_elements).filter(|e| !seen.contains(*e)) {
                let s = rng.gen_range(0..num_sets);
                sets[s].1.push(e);
            }
        }
        Problem::with_sets(num_elements, sets)
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    #[inline(always)]
    pub fn set(&self, id: SetId) -> &CoverSet {
        &self.sets[id]
    }

    pub fn sets(&self) -> &[CoverSet] {
        &self.sets
    }

    #[inline(always)]
    pub fn node(&self, pos: NodeIndex) -> &ElementNode {
        &self.nodes[pos]
    }

    pub fn occurrences(&self) -> &OccurrenceIndex {
        &self.occurrences
    }

    pub fn total_occurrences(&self) -> usize {
        self.nodes.len()
    }

    /// The most cost efficient set that can still be picked, as last refreshed.
    pub fn best(&self) -> Option<SetId> {
        self.best
    }

    pub(crate) fn set_best(&mut self, best: Option<SetId>) {
        self.best = best;
    }

    /// All element values of `set` as loaded, covered or not.
    pub fn elements(&self, set: SetId) -> impl Iterator<Item = usize> + '_ {
        let s = &self.sets[set];
        self.nodes.as_slice()[s.first..s.first + s.size].iter().map(|node| node.value)
    }

    /// Element values of `set` that are still uncovered.
    pub fn live_elements(&self, set: SetId) -> impl Iterator<Item = usize> + '_ {
        self.sets[set].list.iter(&self.nodes).map(move |pos| self.nodes[pos].value)
    }

    /// Union of the elements of the selected sets.
    pub fn covered_by(&self, selected: &BitSet) -> BitSet {
        let mut covered = BitSet::with_capacity(self.num_elements);
        for set in selected.iter().filter(|&s| s < self.sets.len()) {
            self.elements(set).for_each(|e| { covered.insert(e); });
        }
        covered
    }

    pub(crate) fn select(&mut self, set: SetId) {
        self.sets[set].selected = true;
    }

    /// Unlinks every occurrence of `value` from every set containing it.
    /// Returns how many nodes were actually unlinked.
    pub(crate) fn cover_element(&mut self, value: usize) -> Result<usize, SolveError> {
        let Problem { sets, nodes, occurrences, .. } = self;
        let mut unlinked = 0;
        for occ in occurrences.for_element(value) {
            if sets[occ.set].list.unlink(nodes, occ.node)? {
                unlinked += 1;
            }
        }
        Ok(unlinked)
    }
}
