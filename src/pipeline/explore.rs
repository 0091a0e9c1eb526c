//! Data-exploration queries used to scout a new election cycle before
//! writing its correction tables. Read-only; nothing here mutates a run.

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::RawRecord;
use crate::types::party;

/// Placeholder candidate the distributor uses for pooled write-ins.
const ALL_OTHERS: &str = "All Others";

/// Candidates missing a party label, excluding pooled write-ins and
/// unnamed rows. These usually need a `party_overrides` entry.
pub fn candidates_missing_party(records: &[RawRecord]) -> Vec<&RawRecord> {
    records
        .iter()
        .filter(|r| r.party.is_none() && !r.candidate.is_empty() && r.candidate != ALL_OTHERS)
        .collect()
}

/// Candidates appearing in more than one district of the same state, a
/// common symptom of mis-assigned districts.
pub fn multi_district_candidates(records: &[RawRecord]) -> Vec<(String, String, usize)> {
    let mut districts: BTreeMap<(&str, &str), BTreeSet<&str>> = BTreeMap::new();
    for r in records {
        if r.candidate.is_empty() {
            continue;
        }
        districts
            .entry((r.state.as_str(), r.candidate.as_str()))
            .or_default()
            .insert(r.district.as_str());
    }
    districts
        .into_iter()
        .filter(|(_, d)| d.len() > 1)
        .map(|((state, candidate), d)| (state.to_string(), candidate.to_string(), d.len()))
        .collect()
}

/// District winners that lack a party label. A no-party winner would be
/// dropped by aggregation, so these must be fixed before conforming.
pub fn no_party_winners(records: &[RawRecord]) -> Vec<&RawRecord> {
    let mut best: BTreeMap<(&str, &str), &RawRecord> = BTreeMap::new();
    for r in records {
        best.entry((r.state.as_str(), r.district.as_str()))
            .and_modify(|current| {
                if r.candidate_votes.unwrap_or(0) > current.candidate_votes.unwrap_or(0) {
                    *current = r;
                }
            })
            .or_insert(r);
    }
    best.into_values().filter(|r| r.party.is_none()).collect()
}

/// (state, party, statewide voteshare) for every non-major party at or
/// above `threshold` of the state's votes.
pub fn third_party_voteshares(records: &[RawRecord], threshold: f64) -> Vec<(String, String, f64)> {
    let mut state_totals: BTreeMap<&str, i64> = BTreeMap::new();
    let mut party_totals: BTreeMap<(&str, &str), i64> = BTreeMap::new();
    for r in records {
        let votes = r.candidate_votes.unwrap_or(0);
        *state_totals.entry(r.state.as_str()).or_insert(0) += votes;
        if let Some(p) = &r.party {
            *party_totals.entry((r.state.as_str(), p.as_str())).or_insert(0) += votes;
        }
    }

    let mut out = Vec::new();
    for ((state, p), votes) in party_totals {
        if party::is_major(p) {
            continue;
        }
        let total = state_totals[state];
        if total == 0 {
            continue;
        }
        let share = votes as f64 / total as f64;
        if share >= threshold {
            out.push((state.to_string(), p.to_string(), share));
        }
    }
    out
}

/// Number of distinct districts per state.
pub fn districts_per_state(records: &[RawRecord]) -> Vec<(String, usize)> {
    let mut districts: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for r in records {
        districts.entry(r.state.as_str()).or_default().insert(r.district.as_str());
    }
    districts
        .into_iter()
        .map(|(state, d)| (state.to_string(), d.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(state: &str, district: &str, candidate: &str, party: Option<&str>, votes: i64) -> RawRecord {
        RawRecord {
            year: 2018,
            state: state.to_string(),
            district: district.to_string(),
            office: "State Senator".to_string(),
            candidate: candidate.to_string(),
            party: party.map(str::to_string),
            mode: "general".to_string(),
            candidate_votes: Some(votes),
            total_votes: Some(votes),
        }
    }

    #[test]
    fn missing_party_skips_pooled_write_ins() {
        let records = vec![
            raw("KS", "1", "Jim Ward", None, 100),
            raw("KS", "1", ALL_OTHERS, None, 5),
            raw("KS", "1", "B", Some("republican"), 200),
        ];
        let missing = candidates_missing_party(&records);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].candidate, "Jim Ward");
    }

    #[test]
    fn multi_district_candidates_are_counted_per_state() {
        let records = vec![
            raw("MT", "District 40", "Daniel Zolnikov", Some("republican"), 10),
            raw("MT", "District 45", "Daniel Zolnikov", Some("republican"), 20),
            raw("KS", "1", "Daniel Zolnikov", Some("republican"), 5),
        ];
        let multi = multi_district_candidates(&records);
        assert_eq!(multi, vec![("MT".to_string(), "Daniel Zolnikov".to_string(), 2)]);
    }

    #[test]
    fn winners_without_party_are_flagged() {
        let records = vec![
            raw("KS", "1", "A", None, 900),
            raw("KS", "1", "B", Some("republican"), 100),
            raw("KS", "2", "C", Some("democrat"), 500),
        ];
        let winners = no_party_winners(&records);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].candidate, "A");
    }

    #[test]
    fn third_parties_below_threshold_are_ignored() {
        let records = vec![
            raw("VT", "1", "A", Some("democrat"), 950),
            raw("VT", "1", "B", Some("green"), 50),
        ];
        assert!(third_party_voteshares(&records, 0.10).is_empty());
        let shares = third_party_voteshares(&records, 0.01);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].1, "green");
        assert!((shares[0].2 - 0.05).abs() < 1e-12);
    }
}
