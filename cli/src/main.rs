mod printer;

use printer::{PrintObserver, SingleOutput, range_lines, single_line};

use aks_prime::aks::{self, LogObserver};
use aks_prime::errors::AksError;
use aks_prime::scan::{self, ScanRange, ScanReport};

use clap::Parser;

use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "aks", about = "Deterministic AKS primality test")]
struct Cli {
    /// The number to test, or the lower bound of a range to search for primes
    a: u64,

    /// The upper bound (inclusive) of a range to search for primes
    b: Option<u64>,

    /// Print every stage of the AKS computation
    #[arg(short, long)]
    verbose: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Worker threads for range searches (0 = all cores)
    #[arg(long, env = "AKS_THREADS", default_value_t = 0)]
    threads: usize,
}

fn main() -> ExitCode {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AksError> {
    match cli.b {
        Some(hi) => run_range(cli, ScanRange::try_new(cli.a, hi)?),
        None => run_single(cli),
    }
}

fn run_single(cli: &Cli) -> Result<(), AksError> {
    let n = cli.a;
    if n == 0 {
        return Err(AksError::InvalidNumber(n));
    }

    let verdict = if cli.verbose {
        aks::decide(n, &mut PrintObserver)?
    } else {
        aks::decide(n, &mut LogObserver)?
    };

    if cli.json {
        let output = SingleOutput {
            n,
            is_prime: verdict.is_prime(),
            verdict,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", single_line(n, &verdict));
    }

    Ok(())
}

fn run_range(cli: &Cli, range: ScanRange) -> Result<(), AksError> {
    let report = if cli.verbose {
        // Sequential so the stage lines of different candidates do not interleave.
        scan::scan(range, &mut PrintObserver)?
    } else {
        parallel_scan(range, cli.threads)?
    };

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        for line in range_lines(&report) {
            println!("{line}");
        }
    }

    Ok(())
}

fn parallel_scan(range: ScanRange, threads: usize) -> Result<ScanReport, AksError> {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => {
            log::debug!("scanning on {} threads", pool.current_num_threads());
            pool.install(|| scan::par_scan(range))
        }
        Err(e) => {
            log::warn!("Could not build a {threads}-thread pool ({e}), using the global pool");
            scan::par_scan(range)
        }
    }
}
