//! # u-stage
//!
//! Command-line front end for the interval partitioner.
//!
//! ## Usage
//! ```bash
//! # Plan a line-up read from a text file (`<label> <start> <end>` per line)
//! u-stage plan --input input.txt
//!
//! # Compare both strategies with timing
//! u-stage plan --input shows.json --strategy both --boundary exclusive
//!
//! # One JSON document keyed by strategy name
//! u-stage plan --input shows.json --strategy both --output json
//!
//! # Generate a random line-up
//! u-stage generate --count 50 --seed 7 > input.txt
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_stage::config::PlannerConfig;
use u_stage::generator::{EventGenerator, EventGeneratorConfig};
use u_stage::input::{load_events, to_text, InputFormat};
use u_stage::kpi::PartitionKpi;
use u_stage::models::{BoundaryPolicy, Partition};
use u_stage::partitioning::{sort_events, Strategy};

#[derive(Parser)]
#[command(
    name = "u-stage",
    about = "Assign shows to the minimum number of conflict-free stages",
    version
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a show list into stages.
    Plan {
        /// Show list file.
        #[arg(short, long)]
        input: PathBuf,

        /// Input format: text, json (default: from file extension).
        #[arg(short, long)]
        format: Option<InputFormat>,

        /// Strategy (default: from config, else heap).
        #[arg(short, long, value_enum, ignore_case = true)]
        strategy: Option<StrategyArg>,

        /// Boundary convention: inclusive, exclusive.
        #[arg(short, long)]
        boundary: Option<BoundaryPolicy>,

        /// JSON config file; command-line flags take precedence.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, ignore_case = true, default_value = "text")]
        output: OutputFormat,
    },

    /// Print a random show list in text format.
    Generate {
        /// Number of shows.
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
        /// Random seed.
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Shows start in 0..horizon.
        #[arg(long, default_value = "100")]
        horizon: i64,
        /// Longest show duration.
        #[arg(long, default_value = "10")]
        max_duration: i64,
    },
}

/// `--strategy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    #[value(alias = "priority-queue", alias = "pq")]
    Heap,
    #[value(alias = "scan", alias = "nested-loops")]
    LinearScan,
    /// Run every strategy and compare.
    #[value(alias = "all")]
    Both,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            Self::Heap => vec![Strategy::Heap],
            Self::LinearScan => vec![Strategy::LinearScan],
            Self::Both => Strategy::ALL.to_vec(),
        }
    }
}

/// `--output` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Plan {
            input,
            format,
            strategy,
            boundary,
            config,
            output,
        } => run_plan(input, format, strategy, boundary, config, output),
        Commands::Generate {
            count,
            seed,
            horizon,
            max_duration,
        } => {
            let config = EventGeneratorConfig::default()
                .with_count(count)
                .with_horizon(horizon)
                .with_duration_range(1, max_duration);
            let events = EventGenerator::new(config, seed).generate();
            print!("{}", to_text(&events));
            Ok(())
        }
    }
}

fn run_plan(
    input: PathBuf,
    format: Option<InputFormat>,
    strategy: Option<StrategyArg>,
    boundary: Option<BoundaryPolicy>,
    config_path: Option<PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => PlannerConfig::from_json_file(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(boundary) = boundary {
        config = config.with_boundary(boundary);
    }

    let strategies = match strategy {
        Some(arg) => arg.strategies(),
        None => vec![config.strategy],
    };

    let format = format.unwrap_or_else(|| InputFormat::from_path(&input));
    let events = load_events(&input, format)
        .with_context(|| format!("rejected input {}", input.display()))?;
    info!(events = events.len(), boundary = %config.boundary, "loaded show list");

    let sorted = sort_events(&events);
    let mut results: Vec<(Strategy, Partition)> = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        let partitioner = strategy.partitioner(config.boundary);
        let started = Instant::now();
        let partition = partitioner.partition_sorted(&sorted);
        let elapsed = started.elapsed();

        info!(
            strategy = partitioner.name(),
            stages = partition.stage_count(),
            micros = elapsed.as_micros() as u64,
            "partitioned"
        );

        let violations = partition.violations(&events, config.boundary);
        if !violations.is_empty() {
            for v in &violations {
                warn!(strategy = partitioner.name(), "{}", v.message);
            }
            bail!("{} produced an invalid partition", partitioner.name());
        }

        if output == OutputFormat::Text {
            println!("------------");
            println!("{} duration : {} microseconds", partitioner.name(), elapsed.as_micros());
            print!("{partition}");
            println!("{}", PartitionKpi::calculate(&partition, config.boundary));
        }
        results.push((strategy, partition));
    }

    if output == OutputFormat::Json {
        println!("{}", render_json(&results)?);
    }

    if let Some((first, reference)) = results.first() {
        for (other, partition) in &results[1..] {
            if partition.stage_count() != reference.stage_count() {
                warn!(
                    "{first} used {} stages but {other} used {}",
                    reference.stage_count(),
                    partition.stage_count()
                );
            }
        }
    }

    Ok(())
}

/// Renders every partition as one JSON object keyed by strategy name.
fn render_json(results: &[(Strategy, Partition)]) -> Result<String> {
    let by_name: BTreeMap<&str, &Partition> = results
        .iter()
        .map(|(strategy, partition)| (strategy.name(), partition))
        .collect();
    Ok(serde_json::to_string_pretty(&by_name)?)
}
