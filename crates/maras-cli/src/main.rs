//! MARAS CLI
//!
//! Diagnostic tool for the rule filters: runs filter pipelines over a
//! deterministic synthetic workload and reports what each step keeps.

mod config;
mod synthetic;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use maras_core::{RuleFilter, RuleSet};

use config::RunConfig;
use synthetic::{SyntheticOptions, DEFAULT_SEED};

#[derive(Parser)]
#[command(name = "maras")]
#[command(about = "MARAS association rule filtering tools")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a filter pipeline over a synthetic rule workload
    Run {
        /// JSON config with item domain and pipeline
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter steps in order (overrides the config pipeline)
        #[arg(short, long = "filter")]
        filters: Vec<RuleFilter>,

        /// Number of drugs in the item domain
        #[arg(long)]
        drugs: Option<u32>,

        /// Number of reactions in the item domain
        #[arg(long)]
        reactions: Option<u32>,

        /// Number of mined rules to generate
        #[arg(short, long, default_value_t = 10_000)]
        rules: usize,

        /// Percent of rules whose interaction is closed
        #[arg(long, default_value_t = 30)]
        closed_pct: u32,

        /// Percent of items drawn from the wrong side of a rule
        #[arg(long, default_value_t = 15)]
        noise_pct: u32,

        /// RNG seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u32,

        /// Print the first N surviving rules
        #[arg(long, default_value_t = 0)]
        show: usize,
    },

    /// List available filters
    Filters,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            filters,
            drugs,
            reactions,
            rules,
            closed_pct,
            noise_pct,
            seed,
            show,
        } => {
            let run = RunArgs {
                config,
                filters,
                drugs,
                reactions,
                rules,
                closed_pct,
                noise_pct,
                seed,
                show,
            };
            cmd_run(run)
        }
        Commands::Filters => cmd_filters(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

struct RunArgs {
    config: Option<PathBuf>,
    filters: Vec<RuleFilter>,
    drugs: Option<u32>,
    reactions: Option<u32>,
    rules: usize,
    closed_pct: u32,
    noise_pct: u32,
    seed: u32,
    show: usize,
}

fn cmd_run(args: RunArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let (domain, pipeline) = config.resolve(args.drugs, args.reactions, &args.filters)?;

    let start = Instant::now();
    let workload = synthetic::generate(&SyntheticOptions {
        domain,
        rules: args.rules,
        closed_pct: args.closed_pct,
        noise_pct: args.noise_pct,
        seed: args.seed,
    })?;
    let gen_time = start.elapsed();

    let adapt_start = Instant::now();
    let mined = RuleSet::adapt("Mined Rules", &domain, &workload.rules)
        .map_err(|e| format!("Failed to adapt rules: {}", e))?;
    let adapt_time = adapt_start.elapsed();

    println!(
        "Domain: {} drugs, {} reactions (seed {:#x})",
        domain.drug_count(), domain.reaction_count(), args.seed
    );
    println!(
        "Closures: {} closed sets over {} levels",
        workload.closures.len(),
        workload.closures.level_count()
    );
    println!("  {}", mined.summary());

    let mut current = mined.clone();
    let filter_start = Instant::now();
    for step in &pipeline.steps {
        let step_start = Instant::now();
        let next = step.apply(&current, &workload.closures);
        println!(
            "  {:<14} {:>8} -> {:<8} {:.2}ms  [{}]",
            step.as_str(),
            current.len(),
            next.len(),
            step_start.elapsed().as_secs_f64() * 1000.0,
            next.name()
        );
        current = next;
    }
    let filter_time = filter_start.elapsed();

    println!(
        "Kept {} of {} rules ({:.1}%)",
        current.len(),
        mined.len(),
        if mined.is_empty() { 0.0 } else { current.len() as f64 * 100.0 / mined.len() as f64 }
    );
    println!(
        "Time: generate {:.1}ms, adapt {:.1}ms, filter {:.1}ms",
        gen_time.as_secs_f64() * 1000.0,
        adapt_time.as_secs_f64() * 1000.0,
        filter_time.as_secs_f64() * 1000.0,
    );

    if args.show > 0 {
        let top = current.sorted_by_confidence();
        println!();
        for rule in top.iter().take(args.show) {
            println!("  {}", rule);
        }
    }

    Ok(())
}

fn cmd_filters() -> Result<(), String> {
    for filter in RuleFilter::ALL {
        let description = match filter {
            RuleFilter::Closures => "rule items form a closed interaction of the same size",
            RuleFilter::DrugReaction => "drugs only in antecedent, reactions only in consequent",
            RuleFilter::NoSingletons => "antecedent has at least two items",
            RuleFilter::NoComplex => "at most two antecedent items and one consequent item",
        };
        println!("  {:<14} {}", filter.as_str(), description);
    }
    Ok(())
}
