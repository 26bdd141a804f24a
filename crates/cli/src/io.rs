//! Tabular loading and writing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use orglink_extract::{
    apply_transaction, assemble_candidate, earliest_by_id, RawCandidate, ReassignmentTransaction,
};
use orglink_geo::LatLongTable;
use orglink_model::{CandidateRecord, InputRecord, SelectedMatch};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Deserialize)]
struct LatLongRow {
    city: String,
    state: String,
    latitude: f64,
    longitude: f64,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Open {}", path.display()))
}

/// Deserialize every readable row, logging and skipping the rest.
fn read_rows<T, R>(mut reader: csv::Reader<R>, what: &str) -> Vec<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<T>().enumerate() {
        match row {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!(what, row = index + 1, error = %e, "Skipping unreadable row"),
        }
    }
    rows
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().flexible(true).from_reader(reader)
}

pub fn read_inputs<R: Read>(reader: R) -> Vec<InputRecord> {
    read_rows(csv_reader(reader), "input")
}

pub fn read_inputs_path(path: &Path) -> Result<Vec<InputRecord>> {
    Ok(read_inputs(open(path)?))
}

/// Registry rows assembled into candidates, grouped by input id.
///
/// Rows for ids without an input record are assembled without a location so
/// they can still be reported.
pub fn read_candidates<R: Read>(
    reader: R,
    inputs: &[InputRecord],
) -> HashMap<String, Vec<CandidateRecord>> {
    let by_id: HashMap<&str, &InputRecord> =
        inputs.iter().rev().map(|input| (input.id.as_str(), input)).collect();
    let mut grouped: HashMap<String, Vec<CandidateRecord>> = HashMap::new();

    for raw in read_rows::<RawCandidate, _>(csv_reader(reader), "candidate") {
        let candidate = match by_id.get(raw.id.as_str()) {
            Some(input) => assemble_candidate(&raw, input),
            None => assemble_candidate(&raw, &InputRecord::new(raw.id.as_str(), "")),
        };
        grouped.entry(raw.id).or_default().push(candidate);
    }

    grouped
}

pub fn read_candidates_path(
    path: &Path,
    inputs: &[InputRecord],
) -> Result<HashMap<String, Vec<CandidateRecord>>> {
    Ok(read_candidates(open(path)?, inputs))
}

/// Tab-separated `city, state, latitude, longitude` rows.
pub fn read_latlong<R: Read>(reader: R) -> LatLongTable {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);
    LatLongTable::from_rows(
        read_rows::<LatLongRow, _>(reader, "latlong")
            .into_iter()
            .map(|row| (row.city, row.state, row.latitude, row.longitude)),
    )
}

pub fn read_latlong_path(path: &Path) -> Result<LatLongTable> {
    let table = read_latlong(open(path)?);
    tracing::info!(entries = table.len(), "Loaded lat/long table");
    Ok(table)
}

pub fn read_reassignments<R: Read>(reader: R) -> Vec<ReassignmentTransaction> {
    read_rows(csv_reader(reader), "reassignment")
}

pub fn read_reassignments_path(path: &Path) -> Result<Vec<ReassignmentTransaction>> {
    Ok(read_reassignments(open(path)?))
}

/// Attach the earliest qualifying transaction to inputs that carry none.
///
/// Returns the number of inputs updated.
pub fn merge_reassignments(
    inputs: &mut [InputRecord],
    transactions: &[ReassignmentTransaction],
) -> usize {
    let earliest = earliest_by_id(transactions);
    let mut merged = 0;
    for input in inputs.iter_mut() {
        if input.record_date.is_some() {
            continue;
        }
        if let Some(txn) = earliest.get(input.id.as_str()) {
            *input = apply_transaction(input, txn);
            merged += 1;
        }
    }
    merged
}

/// Write selections to `output`, or stdout when no path is given.
pub fn write_selections(
    selections: &[SelectedMatch],
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_to(selections, sink, format)
}

fn write_to<W: Write>(selections: &[SelectedMatch], mut sink: W, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(true)
                .quote_style(csv::QuoteStyle::Necessary)
                .from_writer(sink);
            for selection in selections {
                writer.serialize(selection)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, selections)?;
            writeln!(sink)?;
        }
    }
    Ok(())
}
