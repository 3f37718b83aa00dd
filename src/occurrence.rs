use crate::buffer::GrowableBuffer;
use crate::element_list::NodeIndex;
use crate::error::InstanceError;
use crate::problem::SetId;

/// Where one element value appears: in `set`, at node `node`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Occurrence {
    pub set: SetId,
    pub node: NodeIndex,
}

/// Maps every element value to all of its occurrences across the sets.
///
/// Filled while the instance is built and only read afterwards; covering an
/// element walks its occurrences instead of rescanning any set.
#[derive(Clone, Debug)]
pub struct OccurrenceIndex {
    table: Vec<GrowableBuffer<Occurrence>>,
}

impl OccurrenceIndex {
    /// One empty occurrence list per element. The lists allocate on their
    /// first occurrence, so a large universe costs one table slot per element.
    pub fn new(num_elements: usize) -> Result<OccurrenceIndex, InstanceError> {
        let mut table = Vec::new();
        table.try_reserve_exact(num_elements).map_err(|_| InstanceError::TooLarge { num_elements })?;
        table.resize_with(num_elements, || GrowableBuffer::with_capacity(0));
        Ok(OccurrenceIndex { table })
    }

    pub(crate) fn record(&mut self, value: usize, occurrence: Occurrence) {
        self.table[value].push(occurrence);
    }

    #[inline(always)]
    pub fn for_element(&self, value: usize) -> &[Occurrence] {
        self.table[value].as_slice()
    }

    pub fn num_elements(&self) -> usize {
        self.table.len()
    }

    /// Total number of (set, element) occurrences.
    pub fn total(&self) -> usize {
        self.table.iter().map(|occ| occ.len()).sum()
    }

    /// Element values that appear in no set at all.
    pub fn orphans(&self) -> impl Iterator<Item = usize> + '_ {
        self.table.iter().enumerate().filter(|(_, occ)| occ.is_empty()).map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_recorded_occurrences_in_order() {
        let mut index = OccurrenceIndex::new(3).unwrap();
        index.record(1, Occurrence { set: 0, node: 0 });
        index.record(2, Occurrence { set: 0, node: 1 });
        index.record(1, Occurrence { set: 4, node: 7 });
        assert_eq!(index.for_element(1), &[Occurrence { set: 0, node: 0 }, Occurrence { set: 4, node: 7 }]);
        assert_eq!(index.for_element(2), &[Occurrence { set: 0, node: 1 }]);
        assert!(index.for_element(0).is_empty());
        assert_eq!(index.total(), 3);
        assert_eq!(index.orphans().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn lists_stay_unallocated_until_used() {
        let mut index = OccurrenceIndex::new(1000).unwrap();
        assert!(index.table.iter().all(|occ| occ.capacity() == 0));
        index.record(3, Occurrence { set: 0, node: 0 });
        assert_eq!(index.table[3].capacity(), 1);
        assert_eq!(index.table[4].capacity(), 0);
    }

    #[test]
    fn impossible_universe_is_an_error() {
        assert!(matches!(
            OccurrenceIndex::new(usize::MAX),
            Err(InstanceError::TooLarge { num_elements: usize::MAX })
        ));
    }

    #[test]
    fn many_occurrences_survive_growth() {
        let mut index = OccurrenceIndex::new(1).unwrap();
        for set in 0..100 {
            index.record(0, Occurrence { set, node: 2 * set });
        }
        let occ = index.for_element(0);
        assert_eq!(occ.len(), 100);
        assert!(occ.iter().enumerate().all(|(i, o)| o.set == i && o.node == 2 * i));
    }
}
