//! Extraction of typed values from loosely structured registry exports.
//!
//! Registry rows carry name histories and free-text location descriptions as
//! serialized blobs; this crate turns them into typed lists once, so nothing
//! downstream re-parses text. It also selects the reassignment transaction
//! that supplies an input record's alternate reference date.

pub mod data;
pub mod history;
pub mod raw;
pub mod reassignment;
mod repr;

use thiserror::Error;

pub use data::{parse_descriptions, resolve_data_location, DataLocation};
pub use history::{parse_name_history, HistoricalName};
pub use raw::{assemble_candidate, present, RawCandidate};
pub use reassignment::{
    apply_transaction, earliest_by_id, earliest_transaction, ReassignmentTransaction,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Unrecognized blob: {snippet}")]
    Unrecognized { snippet: String },
}

const SNIPPET_CHARS: usize = 40;

fn snippet(blob: &str) -> String {
    let mut out: String = blob.chars().take(SNIPPET_CHARS).collect();
    if blob.chars().count() > SNIPPET_CHARS {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(100);
        assert_eq!(snippet(&long).len(), SNIPPET_CHARS + 3);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_error_display() {
        let err = ExtractError::Unrecognized { snippet: "??".to_string() };
        assert_eq!(err.to_string(), "Unrecognized blob: ??");
    }
}
