//! Prospector: plans one turn of harvesting targets.
//!
//! Reads a JSON turn snapshot (from a file, stdin, or a seeded random map),
//! scores every unit and prints the resulting assignments as JSON on stdout.
//! Logs go to stderr and are filtered with `RUST_LOG`.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::Parser;

use prospector::config::ScoringConfig;
use prospector::eval::NoDiagnostics;
use prospector::planner::{self, Assignment};
use prospector::protocol::{random_snapshot, TurnReport, TurnSnapshot};

#[derive(Debug, Parser)]
#[command(author, version, about = "Cluster-aware target planner for harvesting units")]
struct Cli {
    /// Snapshot JSON file; read from stdin when omitted
    #[arg(long, conflicts_with = "random")]
    snapshot: Option<PathBuf>,

    /// Scoring configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Generate a random map from this seed instead of reading a snapshot
    #[arg(long)]
    random: Option<u64>,

    /// Width of the generated map
    #[arg(long, default_value_t = 24, value_parser = map_side())]
    width: usize,

    /// Height of the generated map
    #[arg(long, default_value_t = 24, value_parser = map_side())]
    height: usize,

    /// Score all units independently in parallel without committing claims
    #[arg(long)]
    parallel: bool,

    /// Print the input snapshot instead of planning
    #[arg(long)]
    dump_snapshot: bool,
}

/// Side length of a generated map: at least one cell, and small enough that
/// the path distance table fits.
fn map_side() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..=64)
}

fn read_snapshot(cli: &Cli) -> Result<TurnSnapshot> {
    if let Some(seed) = cli.random {
        return Ok(random_snapshot(seed, cli.width, cli.height));
    }
    match &cli.snapshot {
        Some(path) => Ok(TurnSnapshot::load(path)?),
        None => {
            let mut data = String::new();
            io::stdin()
                .read_to_string(&mut data)
                .context("failed to read snapshot from stdin")?;
            Ok(TurnSnapshot::from_json(&data)?)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let snapshot = read_snapshot(&cli)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if cli.dump_snapshot {
        writeln!(out, "{}", snapshot.to_json()?)?;
        return Ok(());
    }

    let units = snapshot.validated_units()?;
    let mut ctx = snapshot
        .build_context(&config.rates)
        .context("invalid turn snapshot")?;
    let pathing = snapshot.distance_table()?;
    tracing::info!(
        width = ctx.width(),
        height = ctx.height(),
        clusters = ctx.registry.len(),
        units = units.len(),
        "loaded turn"
    );

    let report = if cli.parallel {
        let choices = planner::score_units(&ctx, &units, &pathing, &config)?;
        let assignments = units
            .iter()
            .zip(&choices)
            .map(|(unit, choice)| Assignment::new(unit, choice))
            .collect();
        TurnReport::new(false, assignments)
    } else {
        let assignments =
            planner::plan_turn(&mut ctx, &units, &pathing, &config, &mut NoDiagnostics)?;
        TurnReport::new(true, assignments)
    };

    report.write_json(&mut out)?;
    out.flush()?;
    Ok(())
}
