//! CSV import and merge
//!
//! Parses an external CSV source into candidate records and reconciles
//! them with the existing collection under an explicit conflict policy.
//! The caller (UI layer) chooses the policy interactively; `merge` itself
//! is pure and deterministic.

use std::io::Read;

use crate::csv;
use crate::error::{Result, StoreError};
use crate::storage::models::CredentialRecord;
use crate::CSV_MIN_FIELDS;

use super::store::CredentialStore;

/// Rule for resolving duplicate `(url, username)` pairs during import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Overwrite the existing matching record with the incoming one
    Replace,
    /// Keep the existing record, discard the incoming duplicate
    Skip,
}

/// Aggregate outcome of one CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records parsed from the source
    pub imported: usize,
    /// Existing records overwritten (Replace policy)
    pub replaced: usize,
    /// Incoming duplicates discarded (Skip policy)
    pub skipped_duplicates: usize,
    /// Malformed rows dropped during parsing
    pub skipped_rows: usize,
}

/// Parse a CSV source into credential records
///
/// The first row is a header and is discarded unconditionally. Every
/// following row with at least 4 fields becomes a record
/// (`name,url,username,password,note`); the note is absent when the
/// fifth field is missing or empty. Shorter rows are dropped and counted
/// in the returned skip tally. An empty or entirely malformed source
/// yields no records, not a failure; only an unreadable source fails.
pub fn parse<R: Read>(source: R) -> Result<(Vec<CredentialRecord>, usize)> {
    let rows = csv::read_rows(source)
        .map_err(|e| StoreError::ImportParse(format!("Cannot read CSV source: {}", e)))?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for row in rows.iter().skip(1) {
        if row.len() < CSV_MIN_FIELDS {
            skipped += 1;
            continue;
        }

        let note = row.get(4).filter(|n| !n.is_empty()).cloned();
        records.push(CredentialRecord {
            name: row[0].clone(),
            url: row[1].clone(),
            username: row[2].clone(),
            password: row[3].clone(),
            note,
        });
    }

    if skipped > 0 {
        tracing::warn!("Dropped {} malformed CSV rows during import", skipped);
    }

    Ok((records, skipped))
}

/// Merge incoming records into the existing collection
///
/// For each incoming record, an existing record sharing `(url, username)`
/// is a conflict resolved by `policy`; everything else is appended. When
/// the inputs share no keys the result is a plain concatenation under
/// either policy. Pure function: same inputs, same output.
pub fn merge(
    existing: &[CredentialRecord],
    incoming: &[CredentialRecord],
    policy: ConflictPolicy,
) -> Vec<CredentialRecord> {
    merge_counting(existing, incoming, policy).0
}

/// Merge plus conflict tallies: (merged, replaced, skipped duplicates)
fn merge_counting(
    existing: &[CredentialRecord],
    incoming: &[CredentialRecord],
    policy: ConflictPolicy,
) -> (Vec<CredentialRecord>, usize, usize) {
    let mut merged = existing.to_vec();
    let mut replaced = 0;
    let mut skipped_duplicates = 0;

    for record in incoming {
        match merged.iter().position(|r| r.matches_key(&record.url, &record.username)) {
            Some(pos) => match policy {
                ConflictPolicy::Replace => {
                    merged[pos] = record.clone();
                    replaced += 1;
                }
                ConflictPolicy::Skip => skipped_duplicates += 1,
            },
            None => merged.push(record.clone()),
        }
    }

    (merged, replaced, skipped_duplicates)
}

/// Parse a CSV source and merge it into the store under the given policy
///
/// Loads the existing collection, merges and persists the result as one
/// read-modify-write cycle.
pub fn import_csv<R: Read>(
    store: &mut CredentialStore,
    source: R,
    policy: ConflictPolicy,
) -> Result<ImportSummary> {
    let (incoming, skipped_rows) = parse(source)?;
    let existing = store.load_all()?;

    let (merged, replaced, skipped_duplicates) = merge_counting(&existing, &incoming, policy);
    store.save_all(&merged)?;

    Ok(ImportSummary {
        imported: incoming.len(),
        replaced,
        skipped_duplicates,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::store::tests::create_test_store;

    const HEADER: &str = "name,url,username,password,note\n";

    #[test]
    fn test_parse_basic() {
        let input = format!("{}A,a.com,alice,pw1,personal\nB,b.com,bob,pw2\n", HEADER);
        let (records, skipped) = parse(input.as_bytes()).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].note.as_deref(), Some("personal"));
        assert_eq!(records[1].note, None);
    }

    #[test]
    fn test_parse_skips_header_unconditionally() {
        // Even a data-looking first row is discarded
        let input = "A,a.com,alice,pw1\nB,b.com,bob,pw2\n";
        let (records, _) = parse(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "B");
    }

    #[test]
    fn test_parse_drops_short_rows() {
        let input = format!("{}A,a.com,alice\nB,b.com,bob,pw2\n", HEADER);
        let (records, skipped) = parse(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "B");
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_parse_four_fields_no_note() {
        let input = format!("{}A,B,C,D\n", HEADER);
        let (records, _) = parse(input.as_bytes()).unwrap();
        assert_eq!(records[0].note, None);

        let input = format!("{}A,B,C,D,E\n", HEADER);
        let (records, _) = parse(input.as_bytes()).unwrap();
        assert_eq!(records[0].note.as_deref(), Some("E"));
    }

    #[test]
    fn test_parse_empty_note_is_absent() {
        let input = format!("{}A,a.com,alice,pw1,\n", HEADER);
        let (records, _) = parse(input.as_bytes()).unwrap();
        assert_eq!(records[0].note, None);
    }

    #[test]
    fn test_parse_empty_source() {
        let (records, skipped) = parse(&b""[..]).unwrap();
        assert!(records.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let input = format!("{}\"A\",\"a.com\",\"alice\",\"pw,with,commas\",\"note\"\n", HEADER);
        let (records, _) = parse(input.as_bytes()).unwrap();
        assert_eq!(records[0].password, "pw,with,commas");
    }

    #[test]
    fn test_merge_replace() {
        let existing = vec![CredentialRecord::new("A", "a", "x", "old")];
        let incoming = vec![CredentialRecord::new("A", "a", "x", "new")];

        let merged = merge(&existing, &incoming, ConflictPolicy::Replace);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].password, "new");
    }

    #[test]
    fn test_merge_skip() {
        let existing = vec![CredentialRecord::new("A", "a", "x", "old")];
        let incoming = vec![CredentialRecord::new("A", "a", "x", "new")];

        let merged = merge(&existing, &incoming, ConflictPolicy::Skip);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].password, "old");
    }

    #[test]
    fn test_merge_disjoint_concatenates() {
        let existing = vec![CredentialRecord::new("A", "a", "x", "p1")];
        let incoming = vec![CredentialRecord::new("B", "b", "y", "p2")];

        let replace = merge(&existing, &incoming, ConflictPolicy::Replace);
        let skip = merge(&existing, &incoming, ConflictPolicy::Skip);

        assert_eq!(replace, skip);
        assert_eq!(replace.len(), 2);
        assert_eq!(replace[0].name, "A");
        assert_eq!(replace[1].name, "B");
    }

    #[test]
    fn test_merge_deterministic() {
        let existing = vec![
            CredentialRecord::new("A", "a", "x", "p1"),
            CredentialRecord::new("B", "b", "y", "p2"),
        ];
        let incoming = vec![
            CredentialRecord::new("B2", "b", "y", "p3"),
            CredentialRecord::new("C", "c", "z", "p4"),
        ];

        let first = merge(&existing, &incoming, ConflictPolicy::Replace);
        let second = merge(&existing, &incoming, ConflictPolicy::Replace);
        assert_eq!(first, second);
    }

    #[test]
    fn test_import_csv_into_store() {
        let mut store = create_test_store();
        store
            .save_all(&[CredentialRecord::new("A", "a.com", "alice", "old")])
            .unwrap();

        let input = format!("{}A,a.com,alice,new\nB,b.com,bob,pw2\nshort,row\n", HEADER);
        let summary = import_csv(&mut store, input.as_bytes(), ConflictPolicy::Replace).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                replaced: 1,
                skipped_duplicates: 0,
                skipped_rows: 1,
            }
        );

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].password, "new");
    }

    #[test]
    fn test_import_csv_skip_policy() {
        let mut store = create_test_store();
        store
            .save_all(&[CredentialRecord::new("A", "a.com", "alice", "old")])
            .unwrap();

        let input = format!("{}A,a.com,alice,new\n", HEADER);
        let summary = import_csv(&mut store, input.as_bytes(), ConflictPolicy::Skip).unwrap();

        assert_eq!(summary.skipped_duplicates, 1);
        assert_eq!(store.load_all().unwrap()[0].password, "old");
    }
}
