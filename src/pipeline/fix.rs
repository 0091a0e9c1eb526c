//! Corrections for known distributor errors: mislabeled parties,
//! mis-assigned districts, and vote totals split across duplicate rows.
//!
//! These tables are compiled from manual ballot research per election
//! cycle and chamber. They are pure data, loaded from JSON, never code.

use std::fs::File;
use std::path::Path;

use ahash::AHashSet;
use anyhow::{Context, Result};
use serde::Deserialize;

use super::clean::Record;

/// Assign the listed candidates a party, optionally scoped to one state.
#[derive(Debug, Clone, Deserialize)]
pub struct PartyOverride {
    #[serde(default)]
    pub state: Option<String>,
    pub candidates: Vec<String>,
    pub party: String,
}

/// Move the listed candidates from one district to another within a state.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictOverride {
    pub state: String,
    pub from: String,
    pub to: String,
    pub candidates: Vec<String>,
}

/// Combine one candidate's rows that were erroneously split across party
/// (or district) labels: the surviving row keeps the configured party and
/// the summed votes, every other row of that candidate is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteMerge {
    pub state: String,
    pub candidate: String,
    pub party: String,
    /// District the merged row must live in, when the split also crossed
    /// district labels.
    #[serde(default)]
    pub district: Option<String>,
}

/// The full correction set for one election-year/chamber combination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixSet {
    #[serde(default)]
    pub party_overrides: Vec<PartyOverride>,
    #[serde(default)]
    pub district_overrides: Vec<DistrictOverride>,
    #[serde(default)]
    pub vote_merges: Vec<VoteMerge>,
}

impl FixSet {
    pub fn read_from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open fix set: {}", path.display()))?;
        let fixes = serde_json::from_reader(file)
            .with_context(|| format!("Malformed fix set: {}", path.display()))?;
        Ok(fixes)
    }

    /// Apply every correction, in table order: parties, then districts,
    /// then vote merges.
    pub fn apply(&self, mut records: Vec<Record>) -> Vec<Record> {
        for fix in &self.party_overrides {
            let names: AHashSet<&str> = fix.candidates.iter().map(String::as_str).collect();
            for record in &mut records {
                let state_matches = fix.state.as_deref().is_none_or(|s| s == record.state);
                if state_matches && names.contains(record.candidate.as_str()) {
                    record.party = Some(fix.party.clone());
                }
            }
        }

        for fix in &self.district_overrides {
            let names: AHashSet<&str> = fix.candidates.iter().map(String::as_str).collect();
            for record in &mut records {
                if record.state == fix.state
                    && record.district == fix.from
                    && names.contains(record.candidate.as_str())
                {
                    record.district = fix.to.clone();
                }
            }
        }

        for fix in &self.vote_merges {
            records = merge_votes(records, fix);
        }

        records
    }
}

/// Fold all of one candidate's rows into the first row matching the
/// configured party (and district, when given). Matching on the first row
/// keeps the merge deterministic if the data ever holds several rows under
/// the target label.
fn merge_votes(records: Vec<Record>, fix: &VoteMerge) -> Vec<Record> {
    let affected = |r: &Record| r.state == fix.state && r.candidate == fix.candidate;
    let total: i64 = records.iter().filter(|&r| affected(r)).map(|r| r.votes).sum();

    let mut kept_one = false;
    records
        .into_iter()
        .filter_map(|mut r| {
            if !affected(&r) {
                return Some(r);
            }
            let target = r.party.as_deref() == Some(fix.party.as_str())
                && fix.district.as_deref().is_none_or(|d| d == r.district);
            if target && !kept_one {
                kept_one = true;
                r.votes = total;
                Some(r)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, district: &str, candidate: &str, party: Option<&str>, votes: i64) -> Record {
        Record {
            year: 2018,
            state: state.to_string(),
            district: district.to_string(),
            candidate: candidate.to_string(),
            party: party.map(str::to_string),
            votes,
            total_votes: votes,
        }
    }

    #[test]
    fn party_override_reassigns_named_candidates() {
        let fixes: FixSet = serde_json::from_str(
            r#"{"party_overrides": [{"candidates": ["Dallas Heard"], "party": "republican"}]}"#,
        )
        .unwrap();
        let records = vec![
            record("OR", "1", "Dallas Heard", None, 100),
            record("OR", "1", "Someone Else", None, 50),
        ];
        let fixed = fixes.apply(records);
        assert_eq!(fixed[0].party.as_deref(), Some("republican"));
        assert_eq!(fixed[1].party, None);
    }

    #[test]
    fn state_scoped_override_leaves_other_states_alone() {
        let fixes: FixSet = serde_json::from_str(
            r#"{"party_overrides": [{"state": "KS", "candidates": ["Jim Ward"], "party": "democrat"}]}"#,
        )
        .unwrap();
        let records = vec![
            record("KS", "1", "Jim Ward", None, 100),
            record("OK", "1", "Jim Ward", None, 100),
        ];
        let fixed = fixes.apply(records);
        assert_eq!(fixed[0].party.as_deref(), Some("democrat"));
        assert_eq!(fixed[1].party, None);
    }

    #[test]
    fn district_override_moves_candidates() {
        let fixes: FixSet = serde_json::from_str(
            r#"{"district_overrides": [{
                "state": "SD", "from": "District 29", "to": "District 30",
                "candidates": ["Kristine Ina Winter"]
            }]}"#,
        )
        .unwrap();
        let records = vec![
            record("SD", "District 29", "Kristine Ina Winter", Some("democrat"), 100),
            record("SD", "District 29", "Larry Rhoden", Some("republican"), 200),
        ];
        let fixed = fixes.apply(records);
        assert_eq!(fixed[0].district, "District 30");
        assert_eq!(fixed[1].district, "District 29");
    }

    #[test]
    fn vote_merge_combines_split_rows() {
        let fixes: FixSet = serde_json::from_str(
            r#"{"vote_merges": [{"state": "KS", "candidate": "Jesse Burris", "party": "republican"}]}"#,
        )
        .unwrap();
        let records = vec![
            record("KS", "82", "Jesse Burris", Some("republican"), 4000),
            record("KS", "82", "Jesse Burris", None, 500),
            record("KS", "82", "Opponent", Some("democrat"), 3000),
        ];
        let fixed = fixes.apply(records);
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed[0].votes, 4500);
        assert_eq!(fixed[0].party.as_deref(), Some("republican"));
    }

    #[test]
    fn vote_merge_with_district_keeps_the_right_row() {
        let fixes: FixSet = serde_json::from_str(
            r#"{"vote_merges": [{
                "state": "MT", "candidate": "Daniel Zolnikov",
                "party": "republican", "district": "District 45"
            }]}"#,
        )
        .unwrap();
        let records = vec![
            record("MT", "District 40", "Daniel Zolnikov", Some("republican"), 1000),
            record("MT", "District 45", "Daniel Zolnikov", Some("republican"), 2000),
        ];
        let fixed = fixes.apply(records);
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].district, "District 45");
        assert_eq!(fixed[0].votes, 3000);
    }
}
