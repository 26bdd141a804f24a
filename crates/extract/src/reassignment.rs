//! Patent reassignment transactions.

use std::collections::BTreeMap;

use orglink_model::{parse_date, InputRecord};
use serde::{Deserialize, Serialize};

/// Conveyance types that move a patent to a (possibly renamed) holder.
pub const QUALIFYING_CONVEYANCES: [&str; 4] = ["assignment", "correct", "namechg", "merger"];

/// One recorded reassignment of a patent held by an input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentTransaction {
    /// Id of the input record the patent belongs to
    pub id: String,

    #[serde(default)]
    pub assignee: Option<String>,

    #[serde(default)]
    pub assignor: Option<String>,

    #[serde(default)]
    pub record_date: Option<String>,

    #[serde(default)]
    pub convey_type: Option<String>,
}

impl ReassignmentTransaction {
    pub fn qualifies(&self) -> bool {
        self.convey_type.as_deref().is_some_and(|convey| {
            QUALIFYING_CONVEYANCES
                .iter()
                .any(|q| q.eq_ignore_ascii_case(convey.trim()))
        })
    }
}

/// The qualifying transaction with the earliest parseable record date.
///
/// Ties keep the first transaction seen.
pub fn earliest_transaction<'a, I>(transactions: I) -> Option<&'a ReassignmentTransaction>
where
    I: IntoIterator<Item = &'a ReassignmentTransaction>,
{
    transactions
        .into_iter()
        .filter(|txn| txn.qualifies())
        .filter_map(|txn| {
            parse_date(txn.record_date.as_deref())
                .valid()
                .map(|date| (date, txn))
        })
        .min_by_key(|(date, _)| *date)
        .map(|(_, txn)| txn)
}

/// Earliest qualifying transaction for every id that has one.
pub fn earliest_by_id(
    transactions: &[ReassignmentTransaction],
) -> BTreeMap<&str, &ReassignmentTransaction> {
    let mut grouped: BTreeMap<&str, Vec<&ReassignmentTransaction>> = BTreeMap::new();
    for txn in transactions {
        grouped.entry(txn.id.as_str()).or_default().push(txn);
    }

    grouped
        .into_iter()
        .filter_map(|(id, txns)| earliest_transaction(txns).map(|txn| (id, txn)))
        .collect()
}

/// Copy of `input` carrying the transaction's assignee, assignor and record date.
pub fn apply_transaction(input: &InputRecord, txn: &ReassignmentTransaction) -> InputRecord {
    InputRecord {
        assignee: txn.assignee.clone(),
        assignor: txn.assignor.clone(),
        record_date: txn.record_date.clone(),
        ..input.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn txn(id: &str, assignee: &str, date: &str, convey: &str) -> ReassignmentTransaction {
        ReassignmentTransaction {
            id: id.to_string(),
            assignee: Some(assignee.to_string()),
            assignor: Some("Old Holder".to_string()),
            record_date: Some(date.to_string()),
            convey_type: Some(convey.to_string()),
        }
    }

    #[test]
    fn test_earliest_qualifying() {
        let txns = vec![
            txn("1", "Late", "2012-01-01", "assignment"),
            txn("1", "Security", "2001-01-01", "security"),
            txn("1", "Early", "2008-05-05", "namechg"),
            txn("1", "Unparsed", "soon", "merger"),
        ];
        let earliest = earliest_transaction(&txns).unwrap();
        assert_eq!(earliest.assignee.as_deref(), Some("Early"));
    }

    #[test]
    fn test_tie_keeps_first() {
        let txns = vec![
            txn("1", "First", "2008-05-05", "merger"),
            txn("1", "Second", "2008-05-05", "correct"),
        ];
        assert_eq!(earliest_transaction(&txns).unwrap().assignee.as_deref(), Some("First"));
    }

    #[test]
    fn test_none_qualifying() {
        let txns = vec![txn("1", "Lender", "2008-05-05", "security")];
        assert!(earliest_transaction(&txns).is_none());
    }

    #[test]
    fn test_earliest_by_id() {
        let txns = vec![
            txn("2", "B-late", "2015-01-01", "assignment"),
            txn("1", "A", "2010-01-01", "Assignment"),
            txn("2", "B-early", "2011-01-01", "merger"),
        ];
        let by_id = earliest_by_id(&txns);
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id["2"].assignee.as_deref(), Some("B-early"));
    }

    #[test]
    fn test_apply_transaction() {
        let input = InputRecord::new("1", "Acme").with_date_filed_min("2000-01-01");
        let updated = apply_transaction(&input, &txn("1", "Acme", "2006-01-01", "assignment"));
        assert_eq!(updated.record_date.as_deref(), Some("2006-01-01"));
        assert_eq!(updated.assignor.as_deref(), Some("Old Holder"));
        assert_eq!(updated.date_filed_min, input.date_filed_min);
    }
}
