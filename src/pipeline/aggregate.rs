use std::collections::BTreeMap;

use super::clean::Record;

/// One candidate's total in one district, under their canonical party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTotal {
    pub state: String,
    pub district: String,
    pub candidate: String,
    pub party: String,
    pub votes: i64,
}

/// Collapse duplicate rows down to one per (state, district, candidate).
///
/// First sums vote-mode duplicates per (state, district, candidate, party),
/// then folds each candidate's remaining party rows together: the canonical
/// party is the labeled party under which the candidate received the most
/// votes, and the candidate's total is the sum across all their party rows,
/// unlabeled ones included.
///
/// Ties on the maximum are resolved deterministically: the
/// lexicographically smallest label wins. Candidates with no party label on
/// any row are dropped.
pub fn aggregate(records: Vec<Record>) -> Vec<CandidateTotal> {
    // Vote-mode duplicates collapse under a plain sum.
    let mut by_party: BTreeMap<(String, String, String, Option<String>), i64> = BTreeMap::new();
    for r in records {
        *by_party.entry((r.state, r.district, r.candidate, r.party)).or_insert(0) += r.votes;
    }

    let mut by_candidate: BTreeMap<(String, String, String), Vec<(Option<String>, i64)>> =
        BTreeMap::new();
    for ((state, district, candidate, party), votes) in by_party {
        by_candidate.entry((state, district, candidate)).or_default().push((party, votes));
    }

    let mut totals = Vec::with_capacity(by_candidate.len());
    for ((state, district, candidate), parties) in by_candidate {
        let votes: i64 = parties.iter().map(|(_, v)| v).sum();
        // Only labeled rows may supply the canonical party; an unlabeled
        // row can outvote them without discarding the candidate.
        let Some(party) = parties
            .into_iter()
            .filter_map(|(party, v)| party.map(|p| (p, v)))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(party, _)| party)
        else {
            continue; // never labeled, e.g. "All Others"
        };
        totals.push(CandidateTotal { state, district, candidate, party, votes });
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(candidate: &str, party: Option<&str>, votes: i64) -> Record {
        Record {
            year: 2018,
            state: "KS".to_string(),
            district: "1".to_string(),
            candidate: candidate.to_string(),
            party: party.map(str::to_string),
            votes,
            total_votes: votes,
        }
    }

    #[test]
    fn vote_mode_duplicates_collapse_to_one_row() {
        // Two rows for the same candidate and party, differing only by the
        // vote-counting mode they came from.
        let totals = aggregate(vec![
            record("A", Some("democrat"), 100),
            record("A", Some("democrat"), 200),
        ]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].party, "democrat");
        assert_eq!(totals[0].votes, 300);
    }

    #[test]
    fn canonical_party_takes_the_max_vote_row() {
        let totals = aggregate(vec![
            record("A", Some("republican"), 50),
            record("A", None, 10),
        ]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].party, "republican");
        assert_eq!(totals[0].votes, 60);
    }

    #[test]
    fn equal_maxima_break_to_the_smallest_label() {
        let totals = aggregate(vec![
            record("A", Some("republican"), 40),
            record("A", Some("independent"), 40),
        ]);
        assert_eq!(totals[0].party, "independent");
        assert_eq!(totals[0].votes, 80);
    }

    #[test]
    fn unlabeled_majority_still_yields_the_labeled_party() {
        // The unlabeled row outvotes the labeled one; the candidate keeps
        // the labeled party and the full vote total.
        let totals = aggregate(vec![
            record("A", None, 100),
            record("A", Some("republican"), 50),
        ]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].party, "republican");
        assert_eq!(totals[0].votes, 150);
    }

    #[test]
    fn named_party_beats_missing_label_on_ties() {
        let totals = aggregate(vec![
            record("A", None, 40),
            record("A", Some("republican"), 40),
        ]);
        assert_eq!(totals[0].party, "republican");
    }

    #[test]
    fn unlabeled_candidates_are_dropped() {
        let totals = aggregate(vec![record("All Others", None, 12)]);
        assert!(totals.is_empty());
    }
}
