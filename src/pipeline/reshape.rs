use std::collections::{BTreeMap, BTreeSet};

use super::aggregate::CandidateTotal;

/// One district in wide form: a vote cell per party column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    pub state: String,
    pub district: String,
    /// Party -> votes of that party's strongest candidate, 0 where the
    /// party fielded nobody. Every row carries the same key set.
    pub votes: BTreeMap<String, i64>,
}

impl WideRow {
    /// The party column holding the most votes. Ties resolve to the
    /// lexicographically smallest label (the map iterates in label order).
    pub fn winner(&self) -> Option<&str> {
        let mut best: Option<(&str, i64)> = None;
        for (party, votes) in &self.votes {
            if best.is_none_or(|(_, b)| *votes > b) {
                best = Some((party, *votes));
            }
        }
        best.map(|(party, _)| party)
    }
}

/// Pivot candidate totals into one row per (state, district) with one column
/// per party seen anywhere in the input.
///
/// Cells take the max-voted candidate of the party in that district, so a
/// party running several candidates in one district (multi-member seats,
/// stray duplicates) contributes its strongest showing, not a sum. Assumes
/// candidate aggregation already ran: at most one row per candidate.
pub fn pivot(totals: &[CandidateTotal]) -> Vec<WideRow> {
    let parties: BTreeSet<&str> = totals.iter().map(|t| t.party.as_str()).collect();

    let mut cells: BTreeMap<(&str, &str), BTreeMap<&str, i64>> = BTreeMap::new();
    for t in totals {
        let cell = cells
            .entry((t.state.as_str(), t.district.as_str()))
            .or_default()
            .entry(t.party.as_str())
            .or_insert(0);
        *cell = (*cell).max(t.votes);
    }

    cells
        .into_iter()
        .map(|((state, district), row)| {
            let votes = parties
                .iter()
                .map(|p| (p.to_string(), row.get(p).copied().unwrap_or(0)))
                .collect();
            WideRow { state: state.to_string(), district: district.to_string(), votes }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(state: &str, district: &str, candidate: &str, party: &str, votes: i64) -> CandidateTotal {
        CandidateTotal {
            state: state.to_string(),
            district: district.to_string(),
            candidate: candidate.to_string(),
            party: party.to_string(),
            votes,
        }
    }

    #[test]
    fn one_row_per_district_with_party_columns() {
        let wide = pivot(&[
            total("KS", "1", "A", "democrat", 600),
            total("KS", "1", "B", "republican", 400),
            total("KS", "2", "C", "republican", 900),
        ]);
        assert_eq!(wide.len(), 2);
        assert_eq!(wide[0].votes["democrat"], 600);
        assert_eq!(wide[0].votes["republican"], 400);
        // Absent parties fill with zero across the whole column set.
        assert_eq!(wide[1].votes["democrat"], 0);
        assert_eq!(wide[1].votes["republican"], 900);
    }

    #[test]
    fn duplicate_party_rows_take_the_max() {
        // Two candidates of the same party in one district.
        let wide = pivot(&[
            total("NH", "1", "A", "democrat", 300),
            total("NH", "1", "B", "democrat", 500),
        ]);
        assert_eq!(wide[0].votes["democrat"], 500);
    }

    #[test]
    fn winner_is_the_max_column() {
        let wide = pivot(&[
            total("KS", "1", "A", "democrat", 600),
            total("KS", "1", "B", "republican", 400),
            total("KS", "1", "C", "green", 700),
        ]);
        assert_eq!(wide[0].winner(), Some("green"));
    }

    #[test]
    fn winner_ties_break_to_the_smallest_label() {
        let wide = pivot(&[
            total("KS", "1", "A", "republican", 500),
            total("KS", "1", "B", "democrat", 500),
        ]);
        assert_eq!(wide[0].winner(), Some("democrat"));
    }
}
