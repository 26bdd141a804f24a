//! Command-line entity resolution of patent assignees.
//!
//! Usage:
//!     orglink resolve --inputs inputs.csv --candidates hits.csv --latlong latlong.tsv
//!     orglink explain --inputs inputs.csv --candidates hits.csv --latlong latlong.tsv --id 42
//!     orglink normalize "Acme Mfg. Co., Inc."

mod config;
mod io;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use orglink_explain::{explain_result, summarize_match, Explanation};
use orglink_features::normalize_name_detailed;
use orglink_geo::GeoResolver;
use orglink_rank::{
    bucket_histogram, resolve_batch, selection_order, BatchOutcome, RankedCandidate,
};
use orglink_score::CandidateScorer;
use serde::Serialize;

use crate::config::OrglinkConfig;
use crate::io::OutputFormat;

#[derive(Parser)]
#[command(name = "orglink")]
#[command(about = "Match patent assignees to company registry records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with `score` and `rank` settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for every scored pair
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Input records (CSV)
    #[arg(long)]
    inputs: PathBuf,

    /// Registry candidates, one row per hit (CSV)
    #[arg(long)]
    candidates: PathBuf,

    /// City/state coordinates (TSV)
    #[arg(long)]
    latlong: PathBuf,

    /// Patent reassignment transactions (CSV)
    #[arg(long)]
    reassignments: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the best candidate for every input record
    Resolve {
        #[command(flatten)]
        batch: BatchArgs,

        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// Show the score breakdown of every candidate of one input record
    Explain {
        #[command(flatten)]
        batch: BatchArgs,

        /// Input record id
        #[arg(long)]
        id: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized form of organization names
    Normalize {
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "orglink=debug" } else { "orglink=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = OrglinkConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            batch,
            output,
            format,
        } => run_resolve(&batch, &config, output.as_deref(), format),
        Commands::Explain { batch, id, json } => run_explain(&batch, &config, &id, json),
        Commands::Normalize { names } => {
            run_normalize(&names);
            Ok(())
        }
    }
}

fn run_batch(args: &BatchArgs, config: &OrglinkConfig) -> Result<BatchOutcome> {
    let mut inputs = io::read_inputs_path(&args.inputs)?;
    tracing::info!(records = inputs.len(), "Loaded inputs");

    if let Some(path) = &args.reassignments {
        let transactions = io::read_reassignments_path(path)?;
        let merged = io::merge_reassignments(&mut inputs, &transactions);
        tracing::info!(transactions = transactions.len(), merged, "Merged reassignments");
    }

    let candidates = io::read_candidates_path(&args.candidates, &inputs)?;
    tracing::info!(
        ids = candidates.len(),
        rows = candidates.values().map(Vec::len).sum::<usize>(),
        "Loaded candidates"
    );

    let geo = GeoResolver::new(io::read_latlong_path(&args.latlong)?);
    let scorer = CandidateScorer::new(geo, config.score.clone());

    Ok(resolve_batch(&inputs, &candidates, &scorer, &config.rank))
}

fn run_resolve(
    args: &BatchArgs,
    config: &OrglinkConfig,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let outcome = run_batch(args, config)?;

    for (bucket, count) in bucket_histogram(&outcome.selections) {
        tracing::info!(bucket, count, "Score bucket");
    }

    io::write_selections(&outcome.selections, output, format)
}

#[derive(Serialize)]
struct CandidateReport<'a> {
    #[serde(flatten)]
    ranked: &'a RankedCandidate,
    selected: bool,
    summary: String,
    explanations: Vec<Explanation>,
}

fn run_explain(args: &BatchArgs, config: &OrglinkConfig, id: &str, json: bool) -> Result<()> {
    let outcome = run_batch(args, config)?;
    let organization = input_organization(&args.inputs, id)?;

    let best = outcome.candidates_for(id).min_by(|a, b| selection_order(a, b));

    let reports: Vec<CandidateReport> = outcome
        .candidates_for(id)
        .map(|ranked| CandidateReport {
            ranked,
            selected: best.is_some_and(|best| std::ptr::eq(best, ranked)),
            summary: summarize_match(&ranked.scored.result),
            explanations: explain_result(&ranked.scored.result, &organization),
        })
        .collect();

    if reports.is_empty() {
        bail!("No candidates scored for id {id}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Input {id}: {organization}");
    println!("---");
    for (i, report) in reports.iter().enumerate() {
        let candidate = &report.ranked.scored.candidate;
        let marker = if report.selected { " [selected]" } else { "" };
        println!(
            "\n{}. {} ({}){}",
            i + 1,
            candidate.name,
            candidate.company_number.as_deref().unwrap_or("-"),
            marker
        );
        println!(
            "   Total: {} | Confidence: {:.2} | Bucket: {}",
            report.ranked.scored.result.total_score,
            report.ranked.confidence,
            report.ranked.score_bucket
        );
        println!("   {}", report.summary);
        for explanation in &report.explanations {
            println!("   {:+} {}: {}", explanation.delta, explanation.summary, explanation.detail);
        }
    }

    Ok(())
}

/// Organization name of one input id, for display.
fn input_organization(inputs: &Path, id: &str) -> Result<String> {
    io::read_inputs_path(inputs)?
        .into_iter()
        .find(|input| input.id == id)
        .map(|input| input.organization)
        .ok_or_else(|| anyhow::anyhow!("No input record with id {id}"))
}

fn run_normalize(names: &[String]) {
    for name in names {
        let normalized = normalize_name_detailed(name);
        if normalized.suffix_only {
            tracing::warn!(%name, "Name is only legal designators; kept unstripped");
        }
        println!("{}\t{}", name, normalized.value);
    }
}
