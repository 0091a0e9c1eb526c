use std::collections::{BTreeMap, BTreeSet};

use crate::report::RunReport;
use crate::schema::RawRecord;
use crate::types::party;

/// Vote-counting mode excluded from general-election totals.
const PROVISIONAL_MODE: &str = "provisional";

/// A record after cleaning: vote counts filled and coerced, party aliases
/// normalized. Office and mode have served their purpose by now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub year: i32,
    pub state: String,
    pub district: String,
    pub candidate: String,
    pub party: Option<String>,
    pub votes: i64,
    pub total_votes: i64,
}

/// Clean raw records: fill missing vote counts with zero, drop provisional
/// rows, normalize party aliases, and drop every state in which some
/// district recorded zero votes (incomplete data). Dropped states are
/// recorded in the report; they are a data-quality condition, not an error.
pub fn clean(records: Vec<RawRecord>, report: &mut RunReport) -> Vec<Record> {
    let mut cleaned: Vec<Record> = records
        .into_iter()
        .filter(|r| r.mode != PROVISIONAL_MODE)
        .map(|r| Record {
            year: r.year,
            state: r.state,
            district: r.district,
            candidate: r.candidate,
            party: r.party.map(party::canonicalize),
            votes: r.candidate_votes.unwrap_or(0),
            total_votes: r.total_votes.unwrap_or(0),
        })
        .collect();

    // A district where nobody received a single vote means the state's data
    // is incomplete; keeping the rest of the state would skew its metrics.
    let mut district_sums: BTreeMap<(String, String), i64> = BTreeMap::new();
    for r in &cleaned {
        *district_sums.entry((r.state.clone(), r.district.clone())).or_insert(0) += r.votes;
    }
    let invalid: BTreeSet<String> = district_sums
        .into_iter()
        .filter(|(_, sum)| *sum == 0)
        .map(|((state, _), _)| state)
        .collect();
    if !invalid.is_empty() {
        cleaned.retain(|r| !invalid.contains(&r.state));
    }
    report.exclude("Invalid/incomplete data", invalid);

    cleaned
}
