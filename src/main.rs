use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum, ValueHint};
use setcover::{bound, GreedyEngine, Problem, SolverConfig, Strategy};

/// Greedy weighted set cover.
#[derive(Parser, Debug)]
#[command(name = "setcover", version, about)]
struct Cli {
    /// Instance file: `numElements numSets`, then one `cost element...` line per set.
    /// Reads stdin if omitted or `-`
    #[arg(value_hint = ValueHint::FilePath)]
    instance: Option<PathBuf>,

    /// How to find the next most cost efficient set
    #[arg(long, value_enum, default_value_t = StrategyArg::FullScan)]
    strategy: StrategyArg,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Also compute the LP lower bound and report the gap on stderr
    #[arg(long)]
    bound: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum StrategyArg { FullScan, LazyHeap }

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Strategy {
        match arg {
            StrategyArg::FullScan => Strategy::FullScan,
            StrategyArg::LazyHeap => Strategy::LazyHeap,
        }
    }
}

fn read_instance(path: Option<&Path>) -> anyhow::Result<Problem> {
    match path {
        Some(path) if path != Path::new("-") => Problem::from_path(path)
            .with_context(|| format!("failed to read instance {}", path.display())),
        _ => Problem::from_stdin().context("failed to read instance from stdin"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SolverConfig { strategy: cli.strategy.into(), verbose: cli.verbose };

    let problem = read_instance(cli.instance.as_deref())?;
    let lower_bound = if cli.bound { bound::lp_lower_bound(&problem) } else { None };

    let solution = GreedyEngine::new(problem, &config).solve()?;

    if cli.bound {
        match lower_bound {
            Some(lb) => eprintln!("c lp bound {} greedy {} gap {:.4}", lb, solution.cost(), solution.cost() - lb),
            None => eprintln!("c lp bound unavailable"),
        }
    }
    println!("{}", solution);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_file_error_names_the_path() {
        let err = read_instance(Some(Path::new("no/such/instance.txt"))).unwrap_err();
        assert_eq!(err.to_string(), "failed to read instance no/such/instance.txt");
        let cause = err.chain().nth(1).unwrap().to_string();
        assert!(cause.starts_with("failed to read instance: "));
    }

    #[test]
    fn instance_argument_is_optional() {
        let cli = Cli::try_parse_from(["setcover", "--strategy", "lazy-heap"]).unwrap();
        assert_eq!(cli.instance, None);
        assert_eq!(cli.strategy, StrategyArg::LazyHeap);
        let cli = Cli::try_parse_from(["setcover", "-"]).unwrap();
        assert_eq!(cli.instance.as_deref(), Some(Path::new("-")));
    }
}
