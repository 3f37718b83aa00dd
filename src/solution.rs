use std::fmt;

use bit_set::BitSet;
use itertools::Itertools;

use crate::problem::SetId;

/// One step of the greedy engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub set: SetId,
    /// `cost / live` of the set at the moment it was picked.
    pub efficiency: f64,
    /// Elements first covered by this pick.
    pub newly_covered: usize,
}

/// The sets chosen by one solve, their total cost, and the order they were
/// picked in.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    num_sets: usize,
    selected: BitSet,
    cost: f64,
    picks: Vec<Pick>,
}

impl Solution {
    pub(crate) fn new(num_sets: usize) -> Solution {
        Solution { num_sets, selected: BitSet::with_capacity(num_sets), cost: 0.0, picks: Vec::new() }
    }

    pub(crate) fn record(&mut self, pick: Pick, cost: f64) {
        self.selected.insert(pick.set);
        self.cost += cost;
        self.picks.push(pick);
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    pub fn num_picked(&self) -> usize {
        self.picks.len()
    }

    pub fn is_selected(&self, set: SetId) -> bool {
        self.selected.contains(set)
    }

    pub fn selected(&self) -> &BitSet {
        &self.selected
    }

    /// Selection flag of every set, in set order.
    pub fn mask(&self) -> Vec<bool> {
        (0..self.num_sets).map(|s| self.selected.contains(s)).collect()
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }
}

/// Writes the solution as `<cost> 0` followed by the mask as `1`/`0` tokens on
/// the next line. The `0` is a penalty field that is always zero for greedy
/// solutions.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} 0", self.cost)?;
        write!(f, "{}", self.mask().into_iter().map(|b| if b { '1' } else { '0' }).join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_cost_and_mask() {
        let mut sol = Solution::new(4);
        sol.record(Pick { set: 2, efficiency: 0.5, newly_covered: 4 }, 2.0);
        sol.record(Pick { set: 0, efficiency: 1.5, newly_covered: 1 }, 1.5);
        assert_eq!(sol.cost(), 3.5);
        assert_eq!(sol.num_picked(), 2);
        assert_eq!(sol.mask(), vec![true, false, true, false]);
        assert!(sol.is_selected(2) && sol.is_selected(0));
        assert!(!sol.is_selected(1) && !sol.is_selected(3));
        assert_eq!(sol.picks().iter().map(|p| p.set).collect::<Vec<_>>(), vec![2, 0]);
    }

    #[test]
    fn integral_cost_prints_without_fraction() {
        let mut sol = Solution::new(3);
        sol.record(Pick { set: 1, efficiency: 1.0, newly_covered: 3 }, 3.0);
        assert_eq!(sol.to_string(), "3 0\n0 1 0");
    }

    #[test]
    fn fractional_cost_prints_shortest_form() {
        let mut sol = Solution::new(2);
        sol.record(Pick { set: 0, efficiency: 2.25, newly_covered: 2 }, 4.5);
        sol.record(Pick { set: 1, efficiency: 0.25, newly_covered: 1 }, 0.25);
        assert_eq!(sol.to_string(), "4.75 0\n1 1");
    }

    #[test]
    fn empty_solution() {
        let sol = Solution::new(0);
        assert_eq!(sol.to_string(), "0 0\n");
        assert!(sol.mask().is_empty());
    }
}
