//! Command-line front-end: reads a matrix file, runs the parallel search, and
//! prints progress/solutions/final tallies. Thin by design — all the actual
//! work happens in the library crate; this binary only wires flags to it.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Instant;

use structopt::StructOpt;

use xcover::{parse, solve_parallel, ConsoleReporter, SearchConfig, Topology};
#[cfg(feature = "mpi")]
use xcover::MpiTopology;
#[cfg(not(feature = "mpi"))]
use xcover::SingleProcessTopology;

/// Solves an exact-cover instance in parallel across threads (and, with the
/// `mpi` feature, processes).
#[derive(StructOpt, Debug)]
#[structopt(name = "xcover")]
struct Cli {
    /// Path to the matrix input file.
    #[structopt(long = "in")]
    input: String,

    /// Emit a progress line roughly every N nodes explored (0 disables).
    #[structopt(long = "progress-report", default_value = "0")]
    progress_report: u64,

    /// Print each solution as it is found.
    #[structopt(long = "print-solutions")]
    print_solutions: bool,

    /// Soft-stop a task once it has found this many solutions (0 = unlimited).
    #[structopt(long = "stop-after", default_value = "0")]
    stop_after: u64,

    /// Number of worker threads in this process (defaults to the number of
    /// hardware threads available).
    #[structopt(long = "threads")]
    threads: Option<usize>,

    /// Overrides the rank/size pair used for the outer stride partition,
    /// formatted `rank,size`. Only meant for exercising the partitioning
    /// logic locally without actually launching multiple processes.
    #[structopt(long = "rank-stride-override", parse(try_from_str = parse_rank_size))]
    rank_stride_override: Option<(usize, usize)>,
}

fn parse_rank_size(s: &str) -> Result<(usize, usize), String> {
    let (rank_str, size_str) = s
        .split_once(',')
        .ok_or_else(|| "expected RANK,SIZE".to_string())?;
    let rank: usize = rank_str.parse().map_err(|_| "rank must be a non-negative integer".to_string())?;
    let size: usize = size_str.parse().map_err(|_| "size must be a non-negative integer".to_string())?;
    if size == 0 || rank >= size {
        return Err("rank must be < size and size must be > 0".to_string());
    }
    Ok((rank, size))
}

/// A fixed rank/size pair, bypassing the real topology for local testing of
/// the stride partitioner. `reduce_sum` is the identity since there is no
/// actual peer to talk to.
struct OverrideTopology {
    rank: usize,
    size: usize,
}

impl Topology for OverrideTopology {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn reduce_sum(&self, local: i64) -> Option<i64> {
        Some(local)
    }
}

fn main() -> ExitCode {
    let cli = Cli::from_args();

    let file = match File::open(&cli.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: could not open {:?}: {e}", cli.input);
            return ExitCode::FAILURE;
        }
    };

    let instance = match parse(BufReader::new(file)) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = SearchConfig {
        progress_report_interval: cli.progress_report,
        max_solutions: cli.stop_after,
        print_solutions: cli.print_solutions,
    };

    let nb_threads = cli.threads.unwrap_or_else(num_cpus::get);
    let start = Instant::now();
    let reporter = ConsoleReporter::new(start);

    let topology: Box<dyn Topology> = match cli.rank_stride_override {
        Some((rank, size)) => Box::new(OverrideTopology { rank, size }),
        #[cfg(feature = "mpi")]
        None => Box::new(MpiTopology::init()),
        #[cfg(not(feature = "mpi"))]
        None => Box::new(SingleProcessTopology),
    };

    let outcome = solve_parallel(&instance, &config, &reporter, topology.as_ref(), nb_threads);
    let total = topology.reduce_sum(outcome.solutions as i64).unwrap_or(outcome.solutions as i64);

    if topology.rank() == 0 {
        println!("DONE. Found {} solutions in {:.3}s", total, start.elapsed().as_secs_f64());
    }

    ExitCode::SUCCESS
}
