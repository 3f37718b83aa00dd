pub mod buffer;
pub mod element_list;
pub mod occurrence;
pub mod problem;
pub mod selector;
pub mod greedy;
pub mod solution;
pub mod parse;
pub mod bound;
pub mod error;

// Re-exports to flatten the crate.
pub use error::{InstanceError, SolveError};
pub use greedy::{solve, GreedyEngine, SolverConfig, Strategy};
pub use problem::{Problem, SetId};
pub use solution::{Pick, Solution};
