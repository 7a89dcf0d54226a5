use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sort_test_tools::patterns;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quicksort_study::experiment::{self, Algorithm, BenchConfig, Distribution};
use quicksort_study::{deterministic, randomized, report, verify, Error, Result};

#[derive(Parser, Debug)]
#[command(name = "quicksort-study", version, about = "Deterministic vs randomized quicksort")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check both variants, sort a sample and run a quick comparison.
    Demo {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the correctness checks.
    Verify(VerifyArgs),
    /// Time both variants over a grid of sizes and distributions.
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Random rounds per variant on top of the representative cases.
    #[arg(long, default_value_t = 10)]
    rounds: usize,
    #[arg(long, default_value_t = 1_000)]
    max_size: usize,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// JSON file with a benchmark configuration. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,
    #[arg(long, value_delimiter = ',')]
    distributions: Option<Vec<Distribution>>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    recursion_limit: Option<usize>,
    #[arg(long)]
    pin_core: Option<usize>,
    /// Write the result records as JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,
}

impl BenchArgs {
    fn into_config(self) -> Result<(BenchConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::from_json_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(sizes) = self.sizes {
            config.sizes = sizes;
        }
        if let Some(distributions) = self.distributions {
            config.distributions = distributions;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(recursion_limit) = self.recursion_limit {
            config.recursion_limit = recursion_limit;
        }
        if self.pin_core.is_some() {
            config.pin_core = self.pin_core;
        }

        Ok((config, self.json))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        // Already logged with its diagnostic by the correctness harness.
        Err(Error::Verify(_)) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Demo { seed } => demo(seed),
        Command::Verify(args) => verify_cmd(args),
        Command::Bench(args) => bench(args),
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(patterns::random_init_seed);
    info!(seed, "seeding rng");
    StdRng::seed_from_u64(seed)
}

fn verify_cmd(args: VerifyArgs) -> Result<()> {
    let mut rng = seeded_rng(args.seed);

    let cases = verify::representative_cases(&mut rng);
    let report = verify::run_suite(&cases, &mut rng)?;
    println!("{} representative checks passed", report.passed.len());

    for algorithm in Algorithm::ALL {
        verify::verify_random(algorithm, args.rounds, args.max_size, &mut rng)?;
        println!("All {} random rounds passed for {algorithm}", args.rounds);
    }

    Ok(())
}

fn demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);

    println!("--- Correctness Verification ---");
    let cases = verify::representative_cases(&mut rng);
    let report = verify::run_suite(&cases, &mut rng)?;
    for outcome in &report.passed {
        println!(
            "  PASS {:<16} {:<14} partitions={}",
            outcome.case, outcome.algorithm, outcome.stats.partitions
        );
    }

    println!("\n--- Sorting Demonstration ---");
    let sample = vec![38, 27, 43, 3, 9, 82, 10];
    let mut det = sample.clone();
    deterministic::sort(&mut det);
    let mut rand = sample.clone();
    randomized::sort_with_rng(&mut rand, &mut rng);
    println!("Original array:  {sample:?}");
    println!("Deterministic:   {det:?}");
    println!("Randomized:      {rand:?}");

    println!("\n--- Quick Performance Comparison ---");
    let config = BenchConfig {
        sizes: vec![1_000, 5_000, 10_000],
        distributions: vec![
            Distribution::Random,
            Distribution::Sorted,
            Distribution::Reverse,
        ],
        trials: 1,
        seed,
        ..BenchConfig::default()
    };
    let records = experiment::run_experiments(&config)?;
    print!("{}", report::summary_table(&records));

    Ok(())
}

fn bench(args: BenchArgs) -> Result<()> {
    let (config, json) = args.into_config()?;
    let records = experiment::run_experiments(&config)?;

    print!("{}", report::summary_table(&records));

    println!("\nSpeedup (deterministic / randomized):");
    for speedup in report::speedups(&records) {
        let ratio = speedup
            .ratio
            .map_or_else(|| "N/A".to_string(), |ratio| format!("{ratio:.2}x"));
        println!("  {:<14} {:>6}  {ratio}", speedup.distribution, speedup.size);
    }

    if let Some(path) = json {
        let file = File::create(&path).map_err(|source| Error::WriteResults {
            path: path.clone(),
            source,
        })?;
        report::write_json(&records, BufWriter::new(file))?;
        info!(path = %path.display(), "wrote result records");
    }

    Ok(())
}
