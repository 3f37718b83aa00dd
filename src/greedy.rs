use std::time::Instant;

use crate::error::SolveError;
use crate::problem::Problem;
use crate::selector::{FullScan, LazyHeap, Selector};
use crate::solution::{Pick, Solution};

/// How the engine finds the next most cost efficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Rescan all sets after every pick.
    #[default]
    FullScan,
    /// Keep a lazily refreshed heap of efficiencies. Picks the same sets as
    /// `FullScan`.
    LazyHeap,
}

#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Print progress lines to stderr.
    pub verbose: bool,
}

/// Greedy weighted set cover, after Cormen et al., "Introduction to
/// Algorithms", section 35.3.
///
/// Each round picks the set with the lowest cost per uncovered element, then
/// walks its remaining elements and unlinks every one of them from every set
/// that contains it, using the occurrence index. Apart from selecting the next
/// set, the work done is proportional to the number of (set, element)
/// occurrences in the instance.
pub struct GreedyEngine {
    problem: Problem,
    selector: Box<dyn Selector>,
    verbose: bool,
}

impl GreedyEngine {
    pub fn new(problem: Problem, config: &SolverConfig) -> GreedyEngine {
        let selector: Box<dyn Selector> = match config.strategy {
            Strategy::FullScan => Box::new(FullScan),
            Strategy::LazyHeap => Box::new(LazyHeap::new(&problem)),
        };
        GreedyEngine::with_selector(problem, selector, config.verbose)
    }

    pub fn with_selector(problem: Problem, selector: Box<dyn Selector>, verbose: bool) -> GreedyEngine {
        GreedyEngine { problem, selector, verbose }
    }

    pub fn solve(self) -> Result<Solution, SolveError> {
        self.solve_with(|| false)
    }

    /// Like [`solve`](GreedyEngine::solve), but asks `cancel` before every pick
    /// and gives up with [`SolveError::Cancelled`] once it returns true.
    pub fn solve_with(mut self, mut cancel: impl FnMut() -> bool) -> Result<Solution, SolveError> {
        let start = Instant::now();
        let n = self.problem.num_elements();
        let mut solution = Solution::new(self.problem.num_sets());
        let mut covered = 0;
        if self.verbose {
            eprintln!("c elements {} sets {} occurrences {}", n, self.problem.num_sets(), self.problem.total_occurrences());
        }
        if n == 0 {
            return Ok(solution);
        }

        let best = self.selector.next_best(&self.problem);
        self.problem.set_best(best);
        loop {
            if cancel() {
                return Err(SolveError::Cancelled { picked: solution.num_picked() });
            }
            let set = self.problem.best().ok_or(SolveError::Infeasible { uncovered: n - covered })?;
            let cost = self.problem.set(set).cost();
            let efficiency = cost / self.problem.set(set).live() as f64;
            self.problem.select(set);

            let mut newly_covered = 0;
            while let Some(head) = self.problem.set(set).list().head() {
                let value = self.problem.node(head).value;
                self.problem.cover_element(value)?;
                if self.problem.set(set).list().head() == Some(head) {
                    return Err(SolveError::InternalInconsistency {
                        set,
                        node: head,
                        reason: "covered element is still the head of its set",
                    });
                }
                newly_covered += 1;
                covered += 1;
                if covered == n {
                    break;
                }
            }
            solution.record(Pick { set, efficiency, newly_covered }, cost);

            if self.verbose {
                eprintln!("c pick {} set {} efficiency {:.4} covered {}/{} elapsed {:.3}s",
                    solution.num_picked(), set, efficiency, covered, n, start.elapsed().as_secs_f64());
            }
            if covered == n {
                if self.verbose {
                    eprintln!("c done: {} sets, cost {}", solution.num_picked(), solution.cost());
                }
                return Ok(solution);
            }

            let best = self.selector.next_best(&self.problem);
            self.problem.set_best(best);
        }
    }
}

/// Runs the greedy engine on `problem` with the given configuration.
pub fn solve(problem: Problem, config: &SolverConfig) -> Result<Solution, SolveError> {
    GreedyEngine::new(problem, config).solve()
}
