use std::collections::BTreeSet;

use super::reshape::WideRow;
use crate::report::RunReport;
use crate::types::party;

/// Remove every state in which some district was won by a party other than
/// the two majors. The downstream metrics engine models two-party races
/// only, so one third-party seat invalidates the whole chamber for that
/// state, not just the district.
pub fn filter_two_party(rows: Vec<WideRow>, report: &mut RunReport) -> Vec<WideRow> {
    let mut excluded: BTreeSet<String> = BTreeSet::new();
    for row in &rows {
        if let Some(winner) = row.winner()
            && !party::is_major(winner)
        {
            excluded.insert(row.state.clone());
        }
    }

    let rows = rows.into_iter().filter(|r| !excluded.contains(&r.state)).collect();
    report.exclude("Third party wins", excluded);
    rows
}
