//! Reinforcement planner - command-line entry point
//!
//! Reads a roster snapshot (JSON array of characters), runs one of the
//! registered assignment strategies, and writes the assigned roster back
//! out as JSON.

use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use reinforcement_engine::core::config::load_config;
use reinforcement_engine::report::{assignment_text, RosterReport};
use reinforcement_engine::{AlgorithmRegistry, Character, EngineConfig, Result, TieBreak};

/// Assign reinforcement marches for an event roster
#[derive(Parser, Debug)]
#[command(name = "reinforce-plan")]
#[command(about = "Assign reinforcement marches for an event roster")]
struct Args {
    /// Roster JSON file (reads stdin when omitted)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Strategy name; unknown names fall back to the default
    #[arg(long, short = 'a')]
    algorithm: Option<String>,

    /// TOML file overriding engine constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible tie-breaking
    #[arg(long, conflicts_with = "stable")]
    seed: Option<u64>,

    /// Break ties by roster order instead of shuffling
    #[arg(long)]
    stable: bool,

    /// Output file (writes stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// List available strategies and exit
    #[arg(long)]
    list: bool,

    /// Log a per-status summary of the result
    #[arg(long)]
    report: bool,

    /// Expected reinforcement a character needs to count as holding
    #[arg(long, default_value_t = 1.5)]
    survival_threshold: f64,

    /// Print each character's assignment list instead of JSON
    #[arg(long)]
    text: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("reinforcement_engine=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.tie_break = TieBreak::Seeded { seed };
    } else if args.stable {
        config.tie_break = TieBreak::Stable;
    }

    let registry = AlgorithmRegistry::builtin(config.clone());

    if args.list {
        for info in registry.available_algorithms() {
            println!("{:<8} {}", info.name, info.description);
        }
        return Ok(());
    }

    let roster = read_roster(args.roster.as_ref())?;
    tracing::info!(characters = roster.len(), "roster loaded");

    let assigned = registry.calculate_assignments(&roster, args.algorithm.as_deref());

    if args.report {
        let report = RosterReport::build(&assigned, args.survival_threshold, &config);
        tracing::info!(
            edges = report.total_edges,
            unused_marches = report.unused_marches,
            online_holding = report.online.holding,
            online_avg = report.online.average_expected(),
            offline_empty_holding = report.offline_empty.holding,
            offline_empty_avg = report.offline_empty.average_expected(),
            offline_not_empty_avg = report.offline_not_empty.average_expected(),
            "assignment report"
        );
    }

    let rendered = if args.text {
        assigned
            .iter()
            .map(|c| assignment_text(c, &assigned))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        serde_json::to_string_pretty(&assigned)?
    };

    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", rendered)?;
        }
    }

    Ok(())
}

fn read_roster(path: Option<&PathBuf>) -> Result<Vec<Character>> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&contents)?)
}
