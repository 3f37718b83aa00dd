use highs::{HighsModelStatus, RowProblem, Sense};
use itertools::Itertools;

use crate::problem::Problem;

/// Lower bound on the cost of any cover of `problem`: the optimum of the LP
/// relaxation of the covering ILP
///
/// ```text
/// minimise   sum_s cost(s) x_s
/// subject to sum_{s ∋ e} x_s >= 1   for every element e
///            0 <= x_s <= 1
/// ```
///
/// solved with the [highs] LP solver. Returns `None` if the instance cannot be
/// covered at all, or if the solver does not report an optimum.
///
/// Uses the loaded membership of the sets, so it gives the same answer
/// before and after a solve.
///
/// [highs]: https://highs.dev/
pub fn lp_lower_bound(problem: &Problem) -> Option<f64> {
    if problem.occurrences().orphans().next().is_some() {
        return None;
    }
    if problem.num_elements() == 0 {
        return Some(0.0);
    }

    let mut lp = RowProblem::new();
    let cols = problem.sets().iter().map(|s| lp.add_column(s.cost(), 0..=1)).collect_vec();
    for e in 0..problem.num_elements() {
        // occurrences come in set order, so repeats of a set are adjacent
        let row = problem.occurrences().for_element(e).iter()
            .map(|occ| occ.set)
            .dedup()
            .map(|s| (cols[s], 1.0))
            .collect_vec();
        lp.add_row(1.., &row);
    }

    let mut model = lp.optimise(Sense::Minimise);
    model.set_option("output_flag", false);
    model.set_option("parallel", "off");
    model.set_option("threads", 1);
    let solved = model.solve();
    if !matches!(solved.status(), HighsModelStatus::Optimal) {
        return None;
    }
    let vals = solved.get_solution().columns().to_vec();
    Some(problem.sets().iter().zip(vals.iter()).map(|(s, x)| s.cost() * x).sum())
}
